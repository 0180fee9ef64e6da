use crate::ports::outbound::ActiveConfiguredProjectsProvider;
use crate::project_model::domain::{
    AggregateCrossTargetProjectContext, ConfiguredProject, TargetFramework,
    TARGET_FRAMEWORK_DIMENSION,
};
use crate::project_model::services::TargetFrameworkParser;
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use futures::future::try_join_all;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Builds [`AggregateCrossTargetProjectContext`]s from the active configured projects.
///
/// The last context built is kept and replaced as a whole on refresh.
pub struct CrossTargetContextProvider {
    projects: Arc<dyn ActiveConfiguredProjectsProvider>,
    current: Mutex<Option<Arc<AggregateCrossTargetProjectContext>>>,
}

impl CrossTargetContextProvider {
    pub fn new(projects: Arc<dyn ActiveConfiguredProjectsProvider>) -> Self {
        Self {
            projects,
            current: Mutex::new(None),
        }
    }

    /// Creates a context for the current configuration set
    ///
    /// # Errors
    /// - [`ProjectSystemError::Cancelled`] if `cancel` fired before work started
    /// - [`ProjectSystemError::InvalidOperation`] if the host has no active
    ///   configured projects, a project's target framework cannot be
    ///   determined, or the active project matches no target framework
    pub async fn create_project_context(
        &self,
        cancel: &CancellationToken,
    ) -> Result<AggregateCrossTargetProjectContext> {
        if cancel.is_cancelled() {
            return Err(ProjectSystemError::Cancelled.into());
        }

        let projects = self
            .projects
            .active_configured_projects(cancel)
            .await?
            .filter(|projects| !projects.is_empty())
            .ok_or_else(|| ProjectSystemError::InvalidOperation {
                message: "the project has no active configured projects".to_string(),
            })?;

        let frameworks = try_join_all(
            projects
                .iter()
                .map(|(key, project)| Self::resolve_target_framework(key, project)),
        )
        .await?;

        let is_cross_targeting = projects.len() > 1 || !projects[0].0.is_empty();

        let active_project = self
            .projects
            .active_configured_project(cancel)
            .await?
            .ok_or_else(|| ProjectSystemError::InvalidOperation {
                message: "the project has no active configured project".to_string(),
            })?;

        // First match wins
        let active_framework = frameworks
            .iter()
            .zip(&projects)
            .find(|(_, (_, project))| project.configuration() == active_project.configuration())
            .map(|(framework, _)| framework.clone())
            .ok_or_else(|| ProjectSystemError::InvalidOperation {
                message: format!(
                    "active configuration '{}' is not one of the active configured projects",
                    active_project.configuration()
                ),
            })?;

        debug!(
            targets = frameworks.len(),
            active = %active_framework,
            is_cross_targeting,
            "created cross-target context"
        );

        let pairs = frameworks
            .into_iter()
            .zip(projects.into_iter().map(|(_, project)| project))
            .collect();
        Ok(AggregateCrossTargetProjectContext::new(
            is_cross_targeting,
            pairs,
            &active_framework,
        )?)
    }

    /// Rebuilds the context and makes it current.
    pub async fn refresh(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Arc<AggregateCrossTargetProjectContext>> {
        let context = Arc::new(self.create_project_context(cancel).await?);
        *self.current.lock() = Some(Arc::clone(&context));
        Ok(context)
    }

    pub fn current_context(&self) -> Option<Arc<AggregateCrossTargetProjectContext>> {
        self.current.lock().clone()
    }

    async fn resolve_target_framework(
        key: &str,
        project: &ConfiguredProject,
    ) -> Result<TargetFramework> {
        if !key.is_empty() {
            return Ok(TargetFrameworkParser::resolve(key));
        }

        let value = project
            .properties()
            .evaluated_property_value(TARGET_FRAMEWORK_DIMENSION)
            .await?
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ProjectSystemError::InvalidOperation {
                message: format!(
                    "configured project '{}' has no TargetFramework property",
                    project.configuration()
                ),
            })?;
        Ok(TargetFrameworkParser::resolve(&value))
    }
}
