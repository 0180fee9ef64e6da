use crate::application::read_models::{AssetsReadModel, DiagnosticView, TargetView};
use crate::ports::outbound::AssetsFormatter;
use crate::shared::Result;

/// Markdown table header for library information
const TABLE_HEADER: &str = "| Library | Version | Type | Top-level | Dependencies |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|------|-----------|--------------|\n";

/// Markdown table header for restore diagnostics
const LOG_TABLE_HEADER: &str = "| Code | Level | Library | Message |\n";

/// Markdown table separator line for diagnostics table
const LOG_TABLE_SEPARATOR: &str = "|------|-------|---------|---------|\n";

/// MarkdownFormatter adapter for human-readable assets reports
///
/// Renders one section per target with its libraries, resolved package
/// paths when present, and restore diagnostics.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &AssetsReadModel) {
        output.push_str("# Assets Report\n\n");
        output.push_str(&format!("- Assets file: `{}`\n", model.metadata.assets_file));
        if !model.metadata.content_hash.is_empty() {
            output.push_str(&format!("- Content hash: `{}`\n", model.metadata.content_hash));
        }
        output.push_str(&format!(
            "- Generated by {} {} at {}\n\n",
            model.metadata.tool_name, model.metadata.tool_version, model.metadata.generated_at
        ));
    }

    fn render_summary(&self, output: &mut String, model: &AssetsReadModel) {
        output.push_str("## Summary\n\n");
        output.push_str(&format!("- Targets: {}\n", model.targets.len()));
        output.push_str(&format!("- Libraries: {}\n", model.library_count()));
        output.push_str(&format!("- Errors: {}\n", model.error_count()));
        output.push_str(&format!("- Warnings: {}\n\n", model.warning_count()));

        if !model.metadata.package_folders.is_empty() {
            output.push_str("### Package Folders\n\n");
            for folder in &model.metadata.package_folders {
                output.push_str(&format!("1. `{}`\n", folder));
            }
            output.push('\n');
        }
    }

    fn render_target(&self, output: &mut String, target: &TargetView) {
        output.push_str(&format!("## Target `{}`\n\n", target.target));
        if let Some(alias) = &target.alias {
            output.push_str(&format!("Alias: `{}`\n\n", alias));
        }

        if target.libraries.is_empty() {
            output.push_str("*No libraries restored for this target.*\n\n");
        } else {
            output.push_str(TABLE_HEADER);
            output.push_str(TABLE_SEPARATOR);
            for library in &target.libraries {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(&library.name),
                    Self::escape_markdown_table_cell(&library.version),
                    library.library_type,
                    if library.is_top_level { "yes" } else { "" },
                    Self::escape_markdown_table_cell(&library.dependencies.join(", "))
                ));
            }
            output.push('\n');
        }

        let resolved: Vec<_> = target
            .libraries
            .iter()
            .filter_map(|library| library.resolved_path.as_ref().map(|path| (library, path)))
            .collect();
        if !resolved.is_empty() {
            output.push_str("### Package Paths\n\n");
            for (library, path) in resolved {
                output.push_str(&format!("- {} {}: `{}`\n", library.name, library.version, path));
            }
            output.push('\n');
        }

        if !target.diagnostics.is_empty() {
            self.render_diagnostics(output, &target.diagnostics);
        }
    }

    fn render_diagnostics(&self, output: &mut String, diagnostics: &[DiagnosticView]) {
        output.push_str("### Diagnostics\n\n");
        output.push_str(LOG_TABLE_HEADER);
        output.push_str(LOG_TABLE_SEPARATOR);
        for diagnostic in diagnostics {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&diagnostic.code),
                diagnostic.level,
                Self::escape_markdown_table_cell(diagnostic.library_id.as_deref().unwrap_or("")),
                Self::escape_markdown_table_cell(&diagnostic.message)
            ));
        }
        output.push('\n');
    }
}

impl AssetsFormatter for MarkdownFormatter {
    fn format(&self, model: &AssetsReadModel) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, model);
        self.render_summary(&mut output, model);
        for target in &model.targets {
            self.render_target(&mut output, target);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{LibraryView, ReportMetadataView};

    fn model(diagnostics: Vec<DiagnosticView>) -> AssetsReadModel {
        AssetsReadModel {
            metadata: ReportMetadataView {
                assets_file: "obj/project.assets.json".to_string(),
                content_hash: String::new(),
                generated_at: "2024-01-01T00:00:00Z".to_string(),
                tool_name: "project-system-core".to_string(),
                tool_version: "0.1.0".to_string(),
                package_folders: vec!["/packages/".to_string()],
            },
            targets: vec![TargetView {
                target: "net8.0".to_string(),
                short_name: "net8.0".to_string(),
                alias: None,
                top_level_dependencies: vec!["Serilog".to_string()],
                libraries: vec![
                    LibraryView {
                        name: "Serilog".to_string(),
                        version: "3.1.1".to_string(),
                        library_type: "package".to_string(),
                        dependencies: Vec::new(),
                        is_top_level: true,
                        resolved_path: Some("/packages/serilog/3.1.1".to_string()),
                    },
                    LibraryView {
                        name: "Shared|Lib".to_string(),
                        version: "1.0.0".to_string(),
                        library_type: "project".to_string(),
                        dependencies: vec!["Serilog".to_string()],
                        is_top_level: false,
                        resolved_path: None,
                    },
                ],
                diagnostics,
            }],
        }
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new().format(&model(Vec::new())).unwrap();

        assert!(output.starts_with("# Assets Report\n"));
        assert!(output.contains("- Libraries: 2\n"));
        assert!(output.contains("## Target `net8.0`"));
        assert!(output.contains("| Serilog | 3.1.1 | package | yes |  |\n"));
        assert!(output.contains("- Serilog 3.1.1: `/packages/serilog/3.1.1`"));
        assert!(!output.contains("### Diagnostics"));
    }

    #[test]
    fn test_markdown_escapes_table_cells() {
        let output = MarkdownFormatter::new().format(&model(Vec::new())).unwrap();
        assert!(output.contains("Shared\\|Lib"));
    }

    #[test]
    fn test_markdown_diagnostics_table() {
        let output = MarkdownFormatter::new()
            .format(&model(vec![DiagnosticView {
                code: "NU1101".to_string(),
                level: "Error".to_string(),
                warning_level: 0,
                message: "Unable to find package Missing".to_string(),
                library_id: Some("Missing".to_string()),
                target_graphs: vec!["net8.0".to_string()],
            }]))
            .unwrap();

        assert!(output.contains("- Errors: 1\n"));
        assert!(output.contains("| NU1101 | Error | Missing | Unable to find package Missing |"));
    }
}
