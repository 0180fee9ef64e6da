use super::InMemoryProjectProperties;
use crate::ports::outbound::{ActiveConfiguredProjects, ActiveConfiguredProjectsProvider};
use crate::project_model::domain::{
    AssetsFileDependenciesSnapshot, ConfiguredProject, ProjectConfiguration, ProjectProperties,
    TARGET_FRAMEWORK_DIMENSION,
};
use crate::project_model::services::{DefaultValueInterceptor, InterceptedProjectProperties};
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A fixed set of active configured projects
#[derive(Debug, Clone, Default)]
pub struct StaticActiveConfiguredProjects {
    projects: Option<ActiveConfiguredProjects>,
    active: Option<ConfiguredProject>,
}

impl StaticActiveConfiguredProjects {
    pub fn new(projects: Option<ActiveConfiguredProjects>, active: Option<ConfiguredProject>) -> Self {
        Self { projects, active }
    }

    /// One configured project per target of an assets snapshot
    ///
    /// A snapshot with a single target stands for a project that does not
    /// cross-target, so its entry has an empty key. `active` selects the
    /// active target by name or alias; the first target is used otherwise.
    ///
    /// `TargetFramework` evaluates to the restore alias of the target, and
    /// to the framework's short name when the assets file records no alias.
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::Validation`] if `active` names no target
    pub fn from_assets_snapshot(
        snapshot: &AssetsFileDependenciesSnapshot,
        active: Option<&str>,
    ) -> Result<Self> {
        let targets: Vec<_> = snapshot.targets().collect();
        let cross_targeting = targets.len() > 1;

        let projects: ActiveConfiguredProjects = targets
            .iter()
            .map(|target| {
                let short_name = target.framework().short_name().to_string();
                let configuration = ProjectConfiguration::new([
                    ("Configuration", "Debug".to_string()),
                    (TARGET_FRAMEWORK_DIMENSION, short_name.clone()),
                ]);
                let mut evaluated = InMemoryProjectProperties::new([(
                    "TargetFrameworkMoniker",
                    target.framework().full_name().to_string(),
                )]);
                if let Some(alias) = target.alias() {
                    evaluated.set(TARGET_FRAMEWORK_DIMENSION, alias);
                }
                let evaluated: Arc<dyn ProjectProperties> = Arc::new(evaluated);
                let properties = InterceptedProjectProperties::new(
                    evaluated,
                    vec![Arc::new(DefaultValueInterceptor::new(
                        TARGET_FRAMEWORK_DIMENSION,
                        short_name.clone(),
                    ))],
                );
                let key = if cross_targeting { short_name } else { String::new() };
                (key, ConfiguredProject::new(configuration, Arc::new(properties)))
            })
            .collect();

        let active_project = match active {
            Some(name) => {
                let index = targets
                    .iter()
                    .position(|target| target.is_named(name))
                    .ok_or_else(|| ProjectSystemError::Validation {
                        message: format!("Active target '{}' is not in the assets file", name),
                    })?;
                Some(projects[index].1.clone())
            }
            None => projects.first().map(|(_, project)| project.clone()),
        };

        Ok(Self::new(Some(projects), active_project))
    }
}

#[async_trait]
impl ActiveConfiguredProjectsProvider for StaticActiveConfiguredProjects {
    async fn active_configured_projects(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<ActiveConfiguredProjects>> {
        if cancel.is_cancelled() {
            return Err(ProjectSystemError::Cancelled.into());
        }
        Ok(self.projects.clone())
    }

    async fn active_configured_project(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<ConfiguredProject>> {
        if cancel.is_cancelled() {
            return Err(ProjectSystemError::Cancelled.into());
        }
        Ok(self.active.clone())
    }
}
