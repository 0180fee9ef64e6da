use super::project_configuration::{ConfiguredProject, ProjectConfiguration};
use super::target_framework::TargetFramework;
use crate::shared::error::ProjectSystemError;

/// One logical project view over all of its per-target configured projects.
///
/// Immutable: a change to the target framework set produces a new context.
/// Construction enforces that the framework list is non-empty and free of
/// duplicates, and that the active framework is one of them.
#[derive(Debug, Clone)]
pub struct AggregateCrossTargetProjectContext {
    is_cross_targeting: bool,
    projects: Vec<(TargetFramework, ConfiguredProject)>,
    active_index: usize,
}

impl AggregateCrossTargetProjectContext {
    /// Builds a context from ordered `(framework, project)` pairs.
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::InvalidContext`] if `projects` is empty,
    /// lists a framework twice, or does not contain `active_target_framework`.
    pub fn new(
        is_cross_targeting: bool,
        projects: Vec<(TargetFramework, ConfiguredProject)>,
        active_target_framework: &TargetFramework,
    ) -> Result<Self, ProjectSystemError> {
        if projects.is_empty() {
            return Err(ProjectSystemError::InvalidContext {
                reason: "at least one target framework is required".to_string(),
            });
        }

        for (index, (framework, _)) in projects.iter().enumerate() {
            if projects[..index].iter().any(|(seen, _)| seen == framework) {
                return Err(ProjectSystemError::InvalidContext {
                    reason: format!("target framework '{}' is listed twice", framework),
                });
            }
        }

        let active_index = projects
            .iter()
            .position(|(framework, _)| framework == active_target_framework)
            .ok_or_else(|| ProjectSystemError::InvalidContext {
                reason: format!(
                    "active target framework '{}' is not one of the project's target frameworks",
                    active_target_framework
                ),
            })?;

        Ok(Self {
            is_cross_targeting,
            projects,
            active_index,
        })
    }

    pub fn is_cross_targeting(&self) -> bool {
        self.is_cross_targeting
    }

    pub fn target_frameworks(&self) -> impl Iterator<Item = &TargetFramework> {
        self.projects.iter().map(|(framework, _)| framework)
    }

    pub fn active_target_framework(&self) -> &TargetFramework {
        &self.projects[self.active_index].0
    }

    pub fn active_configured_project(&self) -> &ConfiguredProject {
        &self.projects[self.active_index].1
    }

    pub fn configured_projects(&self) -> impl Iterator<Item = &ConfiguredProject> {
        self.projects.iter().map(|(_, project)| project)
    }

    pub fn has_target_framework(&self, framework: &TargetFramework) -> bool {
        self.projects.iter().any(|(candidate, _)| candidate == framework)
    }

    /// Looks a framework up by short or full name.
    pub fn target_framework(&self, name: &str) -> Option<&TargetFramework> {
        self.projects
            .iter()
            .map(|(framework, _)| framework)
            .find(|framework| framework.matches(name))
    }

    pub fn configured_project(&self, framework: &TargetFramework) -> Option<&ConfiguredProject> {
        self.projects
            .iter()
            .find(|(candidate, _)| candidate == framework)
            .map(|(_, project)| project)
    }

    /// Project for a named target, or the sole project when `target` is `None`.
    ///
    /// An omitted target with more than one framework is ambiguous and yields
    /// `None` rather than picking one.
    pub fn configured_project_for(&self, target: Option<&str>) -> Option<&ConfiguredProject> {
        match target {
            Some(name) => {
                let framework = self.target_framework(name)?;
                self.configured_project(framework)
            }
            None if self.projects.len() == 1 => Some(&self.projects[0].1),
            None => None,
        }
    }

    /// Framework whose configured project has the given configuration.
    pub fn target_framework_for(&self, configuration: &ProjectConfiguration) -> Option<&TargetFramework> {
        self.projects
            .iter()
            .find(|(_, project)| project.configuration() == configuration)
            .map(|(framework, _)| framework)
    }
}
