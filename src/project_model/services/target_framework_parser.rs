use crate::project_model::domain::TargetFramework;

const NET_CORE_APP: &str = ".NETCoreApp";
const NET_STANDARD: &str = ".NETStandard";
const NET_FRAMEWORK: &str = ".NETFramework";

/// Converts between short target framework monikers and full framework names.
///
/// Covers the frameworks managed projects target in practice: `netX.Y`
/// (5.0 and later, with optional platform suffix), `netcoreappX.Y`,
/// `netstandardX.Y` and the dotless .NET Framework monikers (`net48`,
/// `net472`). Anything else is left to the caller.
pub struct TargetFrameworkParser;

impl TargetFrameworkParser {
    /// Parses a short moniker such as `net8.0` or `net472`.
    pub fn parse_short_name(short_name: &str) -> Option<TargetFramework> {
        let lower = short_name.trim().to_ascii_lowercase();

        let (identifier, version) = if let Some(version) = lower.strip_prefix("netcoreapp") {
            (NET_CORE_APP, Self::dotted_version(version)?)
        } else if let Some(version) = lower.strip_prefix("netstandard") {
            (NET_STANDARD, Self::dotted_version(version)?)
        } else if let Some(rest) = lower.strip_prefix("net") {
            // Platform suffix: net8.0-windows10.0.19041
            let version = rest.split('-').next().unwrap_or(rest);
            if version.contains('.') {
                let version = Self::dotted_version(version)?;
                if Self::major(&version)? < 5 {
                    return None;
                }
                (NET_CORE_APP, version)
            } else {
                (NET_FRAMEWORK, Self::dotless_version(version)?)
            }
        } else {
            return None;
        };

        Some(TargetFramework::new(
            short_name.trim(),
            format!("{},Version=v{}", identifier, version),
        ))
    }

    /// Parses a full framework name such as `.NETCoreApp,Version=v8.0`.
    pub fn parse_full_name(full_name: &str) -> Option<TargetFramework> {
        let full_name = full_name.trim();
        let (identifier, rest) = full_name.split_once(',')?;
        let version = rest
            .split(',')
            .find_map(|part| part.trim().strip_prefix("Version="))?
            .trim_start_matches(['v', 'V']);
        Self::dotted_version(version)?;

        let short_name = if identifier.eq_ignore_ascii_case(NET_CORE_APP) {
            if Self::major(version)? >= 5 {
                format!("net{}", version)
            } else {
                format!("netcoreapp{}", version)
            }
        } else if identifier.eq_ignore_ascii_case(NET_STANDARD) {
            format!("netstandard{}", version)
        } else if identifier.eq_ignore_ascii_case(NET_FRAMEWORK) {
            format!("net{}", version.replace('.', ""))
        } else {
            return None;
        };

        Some(TargetFramework::new(short_name, full_name))
    }

    /// Accepts either form; unknown names become [`TargetFramework::unrecognized`].
    pub fn resolve(name: &str) -> TargetFramework {
        Self::parse_short_name(name)
            .or_else(|| Self::parse_full_name(name))
            .unwrap_or_else(|| TargetFramework::unrecognized(name.trim()))
    }

    fn dotted_version(version: &str) -> Option<String> {
        let valid = !version.is_empty()
            && version.split('.').all(|part| {
                !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
            });
        valid.then(|| version.to_string())
    }

    fn dotless_version(version: &str) -> Option<String> {
        if version.len() < 2 || !version.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits: Vec<String> = version.chars().map(String::from).collect();
        Some(digits.join("."))
    }

    fn major(version: &str) -> Option<u32> {
        version.split('.').next()?.parse().ok()
    }
}
