use crate::project_model::domain::ConfiguredProject;
use crate::shared::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Active configured projects keyed by target framework short name, in
/// project order. A single entry with an empty key is the only configured
/// project of a project that does not cross-target.
pub type ActiveConfiguredProjects = Vec<(String, ConfiguredProject)>;

/// ActiveConfiguredProjectsProvider port for the project's active configurations
///
/// This port abstracts the host's configuration service: which configured
/// projects are active for the current solution configuration, and which
/// one of them is the primary (active) one.
#[async_trait]
pub trait ActiveConfiguredProjectsProvider: Send + Sync {
    /// Returns the active configured projects
    ///
    /// # Returns
    /// `None` when the host has not produced an active configuration set
    ///
    /// # Errors
    /// Returns an error if the host fails or `cancel` fires
    async fn active_configured_projects(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<ActiveConfiguredProjects>>;

    /// Returns the primary active configured project
    ///
    /// # Errors
    /// Returns an error if the host fails or `cancel` fires
    async fn active_configured_project(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<ConfiguredProject>>;
}
