use async_trait::async_trait;
use project_system::ports::outbound::ActiveConfiguredProjects;
use project_system::prelude::*;
use tokio_util::sync::CancellationToken;

/// Mock ActiveConfiguredProjectsProvider with a fixed answer
#[derive(Clone, Default)]
pub struct MockConfiguredProjects {
    pub projects: Option<ActiveConfiguredProjects>,
    pub active: Option<ConfiguredProject>,
}

impl MockConfiguredProjects {
    pub fn new(projects: ActiveConfiguredProjects, active: ConfiguredProject) -> Self {
        Self {
            projects: Some(projects),
            active: Some(active),
        }
    }
}

#[async_trait]
impl ActiveConfiguredProjectsProvider for MockConfiguredProjects {
    async fn active_configured_projects(
        &self,
        _cancel: &CancellationToken,
    ) -> Result<Option<ActiveConfiguredProjects>> {
        Ok(self.projects.clone())
    }

    async fn active_configured_project(
        &self,
        _cancel: &CancellationToken,
    ) -> Result<Option<ConfiguredProject>> {
        Ok(self.active.clone())
    }
}
