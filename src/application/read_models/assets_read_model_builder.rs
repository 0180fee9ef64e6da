//! Builder for constructing AssetsReadModel from a snapshot

use super::assets_read_model::{AssetsReadModel, ReportMetadataView};
use super::target_view::{DiagnosticView, LibraryView, TargetView};
use crate::project_model::domain::{
    AssetsFileDependenciesSnapshot, AssetsFileLibraryType, AssetsFileTarget,
};
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use chrono::Utc;
use std::path::Path;

const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options controlling what the read model contains
#[derive(Debug, Clone, Default)]
pub struct ReadModelOptions {
    /// Only this target; all targets when `None`
    pub target: Option<String>,
    /// Look up each package library in the package folders
    pub resolve_paths: bool,
}

/// Builder for constructing AssetsReadModel from a snapshot
pub struct AssetsReadModelBuilder;

impl AssetsReadModelBuilder {
    /// Builds the read model
    ///
    /// # Arguments
    /// * `snapshot` - Parsed assets file
    /// * `assets_file` - Path the snapshot was read from
    /// * `options` - Target filter and path resolution
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::Validation`] if the requested target is
    /// not in the snapshot
    pub fn build(
        snapshot: &AssetsFileDependenciesSnapshot,
        assets_file: &Path,
        options: &ReadModelOptions,
    ) -> Result<AssetsReadModel> {
        let targets: Vec<&AssetsFileTarget> = match options.target.as_deref() {
            Some(name) => {
                let target = snapshot.target(Some(name)).ok_or_else(|| {
                    ProjectSystemError::Validation {
                        message: format!(
                            "Target '{}' not found. Available targets: {}",
                            name,
                            snapshot
                                .targets()
                                .map(|target| target.target())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    }
                })?;
                vec![target.as_ref()]
            }
            None => snapshot.targets().map(|target| target.as_ref()).collect(),
        };

        Ok(AssetsReadModel {
            metadata: Self::build_metadata(snapshot, assets_file),
            targets: targets
                .into_iter()
                .map(|target| Self::build_target(snapshot, target, options.resolve_paths))
                .collect(),
        })
    }

    fn build_metadata(snapshot: &AssetsFileDependenciesSnapshot, assets_file: &Path) -> ReportMetadataView {
        ReportMetadataView {
            assets_file: assets_file.display().to_string(),
            content_hash: snapshot
                .content_hash()
                .map(|hash| hash.to_string())
                .unwrap_or_default(),
            generated_at: Utc::now().to_rfc3339(),
            tool_name: TOOL_NAME.to_string(),
            tool_version: TOOL_VERSION.to_string(),
            package_folders: snapshot
                .package_folders()
                .iter()
                .map(|folder| folder.display().to_string())
                .collect(),
        }
    }

    fn build_target(
        snapshot: &AssetsFileDependenciesSnapshot,
        target: &AssetsFileTarget,
        resolve_paths: bool,
    ) -> TargetView {
        let top_level = target.top_level_dependencies();
        let is_top_level = |name: &str| top_level.iter().any(|dep| dep.eq_ignore_ascii_case(name));

        let mut libraries: Vec<LibraryView> = target
            .libraries()
            .map(|library| LibraryView {
                name: library.name().to_string(),
                version: library.version().to_string(),
                library_type: library.library_type().as_str().to_string(),
                dependencies: library.dependencies().to_vec(),
                is_top_level: is_top_level(library.name()),
                resolved_path: (resolve_paths
                    && library.library_type() == AssetsFileLibraryType::Package)
                    .then(|| snapshot.try_resolve_package_path(library.name(), library.version()))
                    .flatten()
                    .map(|path| path.display().to_string()),
            })
            .collect();
        libraries.sort_by_key(|library| library.name.to_ascii_lowercase());

        TargetView {
            target: target.target().to_string(),
            short_name: target.framework().short_name().to_string(),
            alias: target.alias().map(str::to_string),
            top_level_dependencies: top_level.iter().cloned().collect(),
            libraries,
            diagnostics: target
                .logs()
                .iter()
                .map(|log| DiagnosticView {
                    code: log.code().to_string(),
                    level: log.level().as_str().to_string(),
                    warning_level: log.warning_level(),
                    message: log.message().to_string(),
                    library_id: log.library_id().map(str::to_string),
                    target_graphs: log.target_graphs().to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project_model::services::AssetsFileSnapshotBuilder;

    const ASSETS: &[u8] = br#"{
        "version": 3,
        "targets": {
            "net8.0": {
                "Foo/1.0.0": {"type": "package", "dependencies": {"Bar": "2.0.0"}},
                "Bar/2.0.0": {"type": "package"}
            },
            "net48": {"Foo/1.0.0": {"type": "package"}}
        },
        "projectFileDependencyGroups": {"net8.0": ["Foo >= 1.0.0"]},
        "logs": [
            {"code": "NU1101", "level": "Error", "message": "Unable to find Baz", "targetGraphs": ["net8.0"]},
            {"code": "NU1603", "level": "Warning", "warningLevel": 1, "message": "Approx", "targetGraphs": ["net48"]}
        ]
    }"#;

    fn snapshot() -> AssetsFileDependenciesSnapshot {
        AssetsFileSnapshotBuilder::build(
            &AssetsFileDependenciesSnapshot::default(),
            ASSETS,
            Path::new("obj/project.assets.json"),
        )
        .unwrap()
    }

    #[test]
    fn test_build_all_targets() {
        let model = AssetsReadModelBuilder::build(
            &snapshot(),
            Path::new("obj/project.assets.json"),
            &ReadModelOptions::default(),
        )
        .unwrap();

        assert_eq!(model.targets.len(), 2);
        assert_eq!(model.library_count(), 3);
        assert_eq!(model.error_count(), 1);
        assert_eq!(model.warning_count(), 1);
        assert_eq!(model.metadata.tool_name, "project-system-core");
        assert_eq!(model.metadata.assets_file, "obj/project.assets.json");
    }

    #[test]
    fn test_build_single_target() {
        let options = ReadModelOptions {
            target: Some("net8.0".to_string()),
            resolve_paths: false,
        };
        let model =
            AssetsReadModelBuilder::build(&snapshot(), Path::new("project.assets.json"), &options)
                .unwrap();

        assert_eq!(model.targets.len(), 1);
        let target = &model.targets[0];
        assert_eq!(target.short_name, "net8.0");
        let names: Vec<_> = target.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Bar", "Foo"]);
        assert!(target.libraries[1].is_top_level);
        assert!(!target.libraries[0].is_top_level);
        assert!(target.libraries[1].resolved_path.is_none());
    }

    #[test]
    fn test_unknown_target_is_validation_error() {
        let options = ReadModelOptions {
            target: Some("net6.0".to_string()),
            resolve_paths: false,
        };
        let error =
            AssetsReadModelBuilder::build(&snapshot(), Path::new("project.assets.json"), &options)
                .unwrap_err();
        let message = error.to_string();
        assert!(message.contains("net6.0"));
        assert!(message.contains("net48"));
    }
}
