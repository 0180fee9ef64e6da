//! Assets read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! one assets snapshot in a report-friendly format.

use super::target_view::TargetView;

/// Main read model for an assets file report
#[derive(Debug, Clone)]
pub struct AssetsReadModel {
    pub metadata: ReportMetadataView,
    pub targets: Vec<TargetView>,
}

/// View representation of report metadata
#[derive(Debug, Clone)]
pub struct ReportMetadataView {
    /// Path of the inspected assets file
    pub assets_file: String,
    /// SHA-256 of the file contents
    pub content_hash: String,
    /// RFC 3339 timestamp of the report
    pub generated_at: String,
    pub tool_name: String,
    pub tool_version: String,
    /// Package folders in probing order
    pub package_folders: Vec<String>,
}

impl AssetsReadModel {
    pub fn library_count(&self) -> usize {
        self.targets.iter().map(|target| target.libraries.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.targets
            .iter()
            .flat_map(|target| &target.diagnostics)
            .filter(|diagnostic| diagnostic.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.targets
            .iter()
            .flat_map(|target| &target.diagnostics)
            .filter(|diagnostic| diagnostic.level == "Warning")
            .count()
    }
}
