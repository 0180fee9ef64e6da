//! Configuration file support for project-system.
//!
//! Provides YAML-based configuration through `project-system.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use project_system::application::dto::OutputFormat;
use project_system::shared::Result;

pub const CONFIG_FILENAME: &str = "project-system.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub log_level: Option<String>,
    /// Default target for `inspect`
    pub target: Option<String>,
    pub resolve_paths: Option<bool>,
    /// Searched after the package folders recorded in the assets file
    pub fallback_package_folders: Option<Vec<PathBuf>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|format| format.parse().ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in the first directory that has one. Returns `None`
/// silently if none is found.
pub fn discover_config<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> Result<Option<ConfigFile>> {
    for dir in dirs {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            return load_config_from_path(&config_path).map(Some);
        }
    }
    Ok(None)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: {}", e);
        }
    }

    if let Some(level) = &config.log_level {
        if level.parse::<LevelFilter>().is_err() {
            bail!(
                "Invalid config: log_level '{}' is not a log level.\n\n\
                 💡 Hint: Use one of off, error, warn, info, debug or trace.",
                level
            );
        }
    }

    if let Some(folders) = &config.fallback_package_folders {
        for (i, folder) in folders.iter().enumerate() {
            if folder.as_os_str().is_empty() {
                bail!(
                    "Invalid config: fallback_package_folders[{}] must not be empty.\n\n\
                     💡 Hint: Each entry must be a directory path (e.g., \"/usr/share/dotnet/sdk/NuGetFallbackFolder\").",
                    i
                );
            }
        }
    }

    if matches!(config.target.as_deref(), Some(target) if target.trim().is_empty()) {
        bail!("Invalid config: target must not be empty.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: markdown
log_level: debug
target: net8.0
resolve_paths: true
fallback_package_folders:
  - /usr/share/dotnet/sdk/NuGetFallbackFolder
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.output_format(), Some(OutputFormat::Markdown));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.target.as_deref(), Some("net8.0"));
        assert_eq!(config.resolve_paths, Some(true));
        assert_eq!(
            config.fallback_package_folders.unwrap(),
            [PathBuf::from("/usr/share/dotnet/sdk/NuGetFallbackFolder")]
        );
    }

    #[test]
    fn test_discover_config_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(second.path().join(CONFIG_FILENAME), "format: json\n").unwrap();
        fs::write(first.path().join(CONFIG_FILENAME), "format: md\n").unwrap();

        let config = discover_config([first.path(), second.path()]).unwrap().unwrap();
        assert_eq!(config.output_format(), Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config([dir.path()]).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: xml\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Invalid format"));
    }

    #[test]
    fn test_invalid_log_level_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "log_level: loud\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("is not a log level"));
    }

    #[test]
    fn test_empty_fallback_folder_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "fallback_package_folders:\n  - \"\"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("must not be empty"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
exclude_packages: [pip]
check_cve: true
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("exclude_packages"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.format.is_none());
        assert!(config.log_level.is_none());
        assert!(config.target.is_none());
        assert!(config.fallback_package_folders.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
