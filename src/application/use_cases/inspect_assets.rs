use crate::application::dto::{InspectRequest, InspectResponse};
use crate::application::read_models::{AssetsReadModelBuilder, ReadModelOptions};
use crate::ports::inbound::AssetsInspectionPort;
use crate::ports::outbound::{AssetsFileReader, ProgressReporter};
use crate::project_model::domain::AssetsFileDependenciesSnapshot;
use crate::project_model::services::AssetsFileSnapshotBuilder;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name NuGet restore writes into the intermediate output folder
pub const ASSETS_FILE_NAME: &str = "project.assets.json";

/// InspectAssetsUseCase - Reads an assets file into a snapshot and report view
///
/// # Type Parameters
/// * `R` - AssetsFileReader implementation
/// * `P` - ProgressReporter implementation
pub struct InspectAssetsUseCase<R, P> {
    assets_reader: R,
    progress_reporter: P,
}

impl<R, P> InspectAssetsUseCase<R, P>
where
    R: AssetsFileReader,
    P: ProgressReporter,
{
    /// Creates a new InspectAssetsUseCase with injected dependencies
    pub fn new(assets_reader: R, progress_reporter: P) -> Self {
        Self {
            assets_reader,
            progress_reporter,
        }
    }

    /// Executes the inspection
    ///
    /// # Arguments
    /// * `request` - Assets file location and report options
    ///
    /// # Returns
    /// The parsed snapshot together with its read model
    pub fn execute(&self, request: InspectRequest) -> Result<InspectResponse> {
        let assets_file = Self::locate_assets_file(&request.assets_path);

        self.progress_reporter.report(&format!(
            "📖 Loading assets file from: {}",
            assets_file.display()
        ));
        let contents = self.assets_reader.read_assets_file(&assets_file)?;

        let snapshot = AssetsFileSnapshotBuilder::build(
            &AssetsFileDependenciesSnapshot::default(),
            &contents,
            &assets_file,
        )?
        .with_additional_package_folders(request.fallback_package_folders);

        self.progress_reporter.report(&format!(
            "✅ Detected {} target(s)",
            snapshot.targets().count()
        ));

        let read_model = AssetsReadModelBuilder::build(
            &snapshot,
            &assets_file,
            &ReadModelOptions {
                target: request.target,
                resolve_paths: request.resolve_paths,
            },
        )?;

        let errors = read_model.error_count();
        if errors > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Restore reported {} error(s) in {}",
                errors,
                assets_file.display()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Inspected {} librar{} across {} target(s)",
            read_model.library_count(),
            if read_model.library_count() == 1 { "y" } else { "ies" },
            read_model.targets.len()
        ));

        Ok(InspectResponse::new(Arc::new(snapshot), read_model))
    }

    /// Accepts the assets file itself, the `obj` folder or the project folder
    fn locate_assets_file(path: &Path) -> PathBuf {
        if !path.is_dir() {
            return path.to_path_buf();
        }
        let direct = path.join(ASSETS_FILE_NAME);
        if direct.is_file() {
            return direct;
        }
        let in_obj = path.join("obj").join(ASSETS_FILE_NAME);
        if in_obj.is_file() {
            return in_obj;
        }
        direct
    }
}

impl<R, P> AssetsInspectionPort for InspectAssetsUseCase<R, P>
where
    R: AssetsFileReader,
    P: ProgressReporter,
{
    fn inspect(&self, request: InspectRequest) -> Result<InspectResponse> {
        self.execute(request)
    }
}
