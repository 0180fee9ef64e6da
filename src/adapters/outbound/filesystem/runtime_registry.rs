use crate::ports::outbound::InstalledRuntimeRegistry;
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SHARED_FRAMEWORK_DIR: &str = "Microsoft.NETCore.App";

/// Installed runtimes found under a dotnet root's `shared/Microsoft.NETCore.App`
///
/// Every subdirectory name is taken as one installed runtime version. A
/// missing root or shared framework folder means nothing is installed.
#[derive(Debug, Clone)]
pub struct DotnetRootRuntimeRegistry {
    dotnet_root: PathBuf,
}

impl DotnetRootRuntimeRegistry {
    pub fn new(dotnet_root: impl Into<PathBuf>) -> Self {
        Self {
            dotnet_root: dotnet_root.into(),
        }
    }

    /// Uses `DOTNET_ROOT` when set, otherwise the platform install location
    pub fn from_environment() -> Self {
        match std::env::var_os("DOTNET_ROOT") {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::new(Self::default_root()),
        }
    }

    fn default_root() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\Program Files\dotnet")
        } else if cfg!(target_os = "macos") {
            PathBuf::from("/usr/local/share/dotnet")
        } else {
            PathBuf::from("/usr/share/dotnet")
        }
    }

    pub fn dotnet_root(&self) -> &Path {
        &self.dotnet_root
    }
}

impl InstalledRuntimeRegistry for DotnetRootRuntimeRegistry {
    fn installed_runtime_versions(&self) -> Result<Vec<String>> {
        let shared = self.dotnet_root.join("shared").join(SHARED_FRAMEWORK_DIR);
        let entries = match fs::read_dir(&shared) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ProjectSystemError::FileReadError {
                    path: shared,
                    details: e.to_string(),
                }
                .into())
            }
        };

        let mut versions: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        versions.sort();
        Ok(versions)
    }
}
