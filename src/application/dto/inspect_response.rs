use crate::application::read_models::AssetsReadModel;
use crate::project_model::domain::AssetsFileDependenciesSnapshot;
use std::sync::Arc;

/// InspectResponse - Internal response DTO from the assets inspection use case
///
/// Carries both the parsed snapshot and its report view so adapters can
/// format the report or query the snapshot further.
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub snapshot: Arc<AssetsFileDependenciesSnapshot>,
    pub read_model: AssetsReadModel,
}

impl InspectResponse {
    pub fn new(snapshot: Arc<AssetsFileDependenciesSnapshot>, read_model: AssetsReadModel) -> Self {
        Self {
            snapshot,
            read_model,
        }
    }

    /// Whether restore reported at least one error-level diagnostic
    pub fn has_errors(&self) -> bool {
        self.read_model.error_count() > 0
    }
}
