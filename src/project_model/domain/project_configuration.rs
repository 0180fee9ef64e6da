use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Dimension holding the target framework of a configuration
pub const TARGET_FRAMEWORK_DIMENSION: &str = "TargetFramework";

/// One point in the project's configuration space, e.g.
/// `Debug|AnyCPU|net8.0`.
///
/// Dimension names compare exactly; MSBuild normalises them before they
/// reach the project system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectConfiguration {
    dimensions: BTreeMap<String, String>,
}

impl ProjectConfiguration {
    pub fn new<I, K, V>(dimensions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dimensions: dimensions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dimensions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Display name joining dimension values with `|`.
    pub fn name(&self) -> String {
        self.dimensions
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for ProjectConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read access to evaluated MSBuild properties of one configured project.
#[async_trait]
pub trait ProjectProperties: Send + Sync {
    /// Evaluated value of a property; `None` when undefined.
    async fn evaluated_property_value(&self, name: &str) -> Result<Option<String>>;
}

/// A project loaded in one configuration.
#[derive(Clone)]
pub struct ConfiguredProject {
    configuration: ProjectConfiguration,
    properties: Arc<dyn ProjectProperties>,
}

impl ConfiguredProject {
    pub fn new(configuration: ProjectConfiguration, properties: Arc<dyn ProjectProperties>) -> Self {
        Self {
            configuration,
            properties,
        }
    }

    pub fn configuration(&self) -> &ProjectConfiguration {
        &self.configuration
    }

    pub fn properties(&self) -> &Arc<dyn ProjectProperties> {
        &self.properties
    }
}

impl fmt::Debug for ConfiguredProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredProject")
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}
