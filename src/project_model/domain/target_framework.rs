use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of one target framework of a project.
///
/// Compared and hashed by short name, ignoring ASCII case, because MSBuild
/// treats `net8.0` and `NET8.0` as the same target.
#[derive(Debug, Clone)]
pub struct TargetFramework {
    short_name: String,
    full_name: String,
}

impl TargetFramework {
    pub fn new(short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_name: full_name.into(),
        }
    }

    /// A framework the parser does not recognise keeps its raw name as both forms.
    pub fn unrecognized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: name.clone(),
            full_name: name,
        }
    }

    /// e.g. `net8.0`
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// e.g. `.NETCoreApp,Version=v8.0`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Framework identifier part of the full name, e.g. `.NETCoreApp`.
    pub fn identifier(&self) -> Option<&str> {
        let (identifier, _) = self.full_name.split_once(',')?;
        Some(identifier)
    }

    /// Version part of the full name without its `v` prefix, e.g. `8.0`.
    pub fn version(&self) -> Option<&str> {
        self.full_name
            .split(',')
            .find_map(|part| part.trim().strip_prefix("Version="))
            .map(|version| version.trim_start_matches(['v', 'V']))
    }

    /// Matches either the short or the full name.
    pub fn matches(&self, name: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(name) || self.full_name.eq_ignore_ascii_case(name)
    }
}

impl PartialEq for TargetFramework {
    fn eq(&self, other: &Self) -> bool {
        self.short_name.eq_ignore_ascii_case(&other.short_name)
    }
}

impl Eq for TargetFramework {}

impl Hash for TargetFramework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.short_name.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}
