use crate::application::read_models::{
    AssetsReadModel, DiagnosticView, LibraryView, ReportMetadataView, TargetView,
};
use crate::ports::outbound::AssetsFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetsReport {
    metadata: Metadata,
    summary: Summary,
    targets: Vec<Target>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    assets_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    content_hash: String,
    timestamp: String,
    tools: Vec<Tool>,
    package_folders: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    targets: usize,
    libraries: usize,
    errors: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Target {
    name: String,
    framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    top_level_dependencies: Vec<String>,
    libraries: Vec<Library>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    logs: Vec<LogMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Library {
    name: String,
    version: String,
    #[serde(rename = "type")]
    library_type: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    top_level: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogMessage {
    code: String,
    level: String,
    warning_level: u32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    library_id: Option<String>,
    target_graphs: Vec<String>,
}

/// JsonFormatter adapter for machine-readable assets reports
///
/// Field names follow the camelCase convention of the assets file itself.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_metadata(&self, metadata: &ReportMetadataView) -> Metadata {
        Metadata {
            assets_file: metadata.assets_file.clone(),
            content_hash: metadata.content_hash.clone(),
            timestamp: metadata.generated_at.clone(),
            tools: vec![Tool {
                name: metadata.tool_name.clone(),
                version: metadata.tool_version.clone(),
            }],
            package_folders: metadata.package_folders.clone(),
        }
    }

    fn build_target(&self, target: &TargetView) -> Target {
        Target {
            name: target.target.clone(),
            framework: target.short_name.clone(),
            alias: target.alias.clone(),
            top_level_dependencies: target.top_level_dependencies.clone(),
            libraries: target.libraries.iter().map(|l| self.build_library(l)).collect(),
            logs: target.diagnostics.iter().map(|d| self.build_log(d)).collect(),
        }
    }

    fn build_library(&self, library: &LibraryView) -> Library {
        Library {
            name: library.name.clone(),
            version: library.version.clone(),
            library_type: library.library_type.clone(),
            top_level: library.is_top_level,
            dependencies: library.dependencies.clone(),
            path: library.resolved_path.clone(),
        }
    }

    fn build_log(&self, diagnostic: &DiagnosticView) -> LogMessage {
        LogMessage {
            code: diagnostic.code.clone(),
            level: diagnostic.level.clone(),
            warning_level: diagnostic.warning_level,
            message: diagnostic.message.clone(),
            library_id: diagnostic.library_id.clone(),
            target_graphs: diagnostic.target_graphs.clone(),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetsFormatter for JsonFormatter {
    fn format(&self, model: &AssetsReadModel) -> Result<String> {
        let report = AssetsReport {
            metadata: self.build_metadata(&model.metadata),
            summary: Summary {
                targets: model.targets.len(),
                libraries: model.library_count(),
                errors: model.error_count(),
                warnings: model.warning_count(),
            },
            targets: model.targets.iter().map(|t| self.build_target(t)).collect(),
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize assets report: {}", e))?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AssetsReadModel {
        AssetsReadModel {
            metadata: ReportMetadataView {
                assets_file: "obj/project.assets.json".to_string(),
                content_hash: "abc123".to_string(),
                generated_at: "2024-01-01T00:00:00Z".to_string(),
                tool_name: "project-system-core".to_string(),
                tool_version: "0.1.0".to_string(),
                package_folders: vec!["/home/user/.nuget/packages/".to_string()],
            },
            targets: vec![TargetView {
                target: "net8.0".to_string(),
                short_name: "net8.0".to_string(),
                alias: Some("net8.0".to_string()),
                top_level_dependencies: vec!["Newtonsoft.Json".to_string()],
                libraries: vec![LibraryView {
                    name: "Newtonsoft.Json".to_string(),
                    version: "13.0.3".to_string(),
                    library_type: "package".to_string(),
                    dependencies: Vec::new(),
                    is_top_level: true,
                    resolved_path: Some("/home/user/.nuget/packages/newtonsoft.json/13.0.3".to_string()),
                }],
                diagnostics: vec![DiagnosticView {
                    code: "NU1603".to_string(),
                    level: "Warning".to_string(),
                    warning_level: 1,
                    message: "Approximate best match".to_string(),
                    library_id: Some("Newtonsoft.Json".to_string()),
                    target_graphs: vec!["net8.0".to_string()],
                }],
            }],
        }
    }

    #[test]
    fn test_json_formatter_structure() {
        let output = JsonFormatter::new().format(&model()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["metadata"]["assetsFile"], "obj/project.assets.json");
        assert_eq!(value["metadata"]["tools"][0]["name"], "project-system-core");
        assert_eq!(value["summary"]["libraries"], 1);
        assert_eq!(value["summary"]["warnings"], 1);
        assert_eq!(value["summary"]["errors"], 0);

        let library = &value["targets"][0]["libraries"][0];
        assert_eq!(library["type"], "package");
        assert_eq!(library["topLevel"], true);
        assert_eq!(library["path"], "/home/user/.nuget/packages/newtonsoft.json/13.0.3");
        assert!(library.get("dependencies").is_none());

        assert_eq!(value["targets"][0]["logs"][0]["warningLevel"], 1);
    }

    #[test]
    fn test_json_formatter_omits_empty_logs() {
        let mut model = model();
        model.targets[0].diagnostics.clear();
        let output = JsonFormatter::new().format(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["targets"][0].get("logs").is_none());
    }
}
