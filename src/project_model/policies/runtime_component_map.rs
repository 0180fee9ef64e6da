/// Package whose version identifies the shared runtime a project runs on
pub const NETCORE_APP_PACKAGE: &str = "Microsoft.NETCore.App";

/// Setup component ids for runtimes the IDE can offer to install, by
/// `major.minor`.
const COMPONENT_IDS: &[(&str, &str)] = &[
    ("2.1", "Microsoft.Net.Core.Component.SDK.2.1"),
    ("3.1", "Microsoft.NetCore.Component.Runtime.3.1"),
    ("5.0", "Microsoft.NetCore.Component.Runtime.5.0"),
    ("6.0", "Microsoft.NetCore.Component.Runtime.6.0"),
    ("7.0", "Microsoft.NetCore.Component.Runtime.7.0"),
    ("8.0", "Microsoft.NetCore.Component.Runtime.8.0"),
];

/// RuntimeComponentMap policy for mapping runtime packages to setup components
///
/// Only the shared runtime package has install components. Versions the
/// table does not know map to an empty id: a project may target a runtime
/// the IDE has no install prompt for, which is not an error.
pub struct RuntimeComponentMap;

impl RuntimeComponentMap {
    /// Maps a runtime package and version to a setup component id
    ///
    /// # Arguments
    /// * `package_name` - Package name, compared case-insensitively
    /// * `version` - Package version such as `5.0.3`, `v5.0` or `8.0.0-rc.1`
    ///
    /// # Returns
    /// The component id, or an empty string when unmapped or unparseable
    pub fn map_package_name_to_component_id(package_name: &str, version: &str) -> String {
        if !package_name.eq_ignore_ascii_case(NETCORE_APP_PACKAGE) {
            return String::new();
        }

        Self::major_minor(version)
            .and_then(|major_minor| {
                COMPONENT_IDS
                    .iter()
                    .find(|(known, _)| *known == major_minor)
                    .map(|(_, id)| id.to_string())
            })
            .unwrap_or_default()
    }

    /// Normalised `major.minor` of a version string.
    pub fn major_minor(version: &str) -> Option<String> {
        let version = version.trim().trim_start_matches(['v', 'V']);
        let release = version.split(['-', '+']).next()?;
        let mut parts = release.split('.');
        let major: u32 = parts.next()?.parse().ok()?;
        let minor: u32 = parts.next()?.parse().ok()?;
        Some(format!("{}.{}", major, minor))
    }
}
