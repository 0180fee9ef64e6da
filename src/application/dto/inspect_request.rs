use std::path::PathBuf;

/// InspectRequest - Internal request DTO for the assets inspection use case
#[derive(Debug, Clone)]
pub struct InspectRequest {
    /// Path to `project.assets.json`, or the directory holding it
    pub assets_path: PathBuf,
    /// Restrict the report to one target framework
    pub target: Option<String>,
    /// Look up every package library in the package folders
    pub resolve_paths: bool,
    /// Package folders appended after the ones listed in the assets file
    pub fallback_package_folders: Vec<PathBuf>,
}

impl InspectRequest {
    pub fn new(assets_path: PathBuf) -> Self {
        Self {
            assets_path,
            target: None,
            resolve_paths: false,
            fallback_package_folders: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    pub fn with_resolve_paths(mut self, resolve_paths: bool) -> Self {
        self.resolve_paths = resolve_paths;
        self
    }

    pub fn with_fallback_package_folders(mut self, folders: Vec<PathBuf>) -> Self {
        self.fallback_package_folders = folders;
        self
    }
}
