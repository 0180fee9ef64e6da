//! Target view structs for read model
//!
//! These structs provide a flattened, query-optimized view of one assets
//! file target.

/// View representation of one target framework's restore results
#[derive(Debug, Clone)]
pub struct TargetView {
    /// Target key as written in the assets file
    pub target: String,
    /// Short framework name, e.g. `net8.0`
    pub short_name: String,
    /// Target alias from the project section
    pub alias: Option<String>,
    /// Directly referenced libraries
    pub top_level_dependencies: Vec<String>,
    /// Libraries sorted by name
    pub libraries: Vec<LibraryView>,
    /// Restore diagnostics for this target
    pub diagnostics: Vec<DiagnosticView>,
}

/// View representation of a resolved library
#[derive(Debug, Clone)]
pub struct LibraryView {
    pub name: String,
    pub version: String,
    /// `package`, `project` or `unknown`
    pub library_type: String,
    pub dependencies: Vec<String>,
    pub is_top_level: bool,
    /// Location in a package folder, when requested and found
    pub resolved_path: Option<String>,
}

/// View representation of a restore diagnostic
#[derive(Debug, Clone)]
pub struct DiagnosticView {
    pub code: String,
    pub level: String,
    pub warning_level: u32,
    pub message: String,
    pub library_id: Option<String>,
    pub target_graphs: Vec<String>,
}

impl DiagnosticView {
    pub fn is_error(&self) -> bool {
        self.level == "Error"
    }
}
