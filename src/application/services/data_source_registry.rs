use crate::application::data_sources::{
    AssetsFileDependenciesDataSource, RuntimeDescriptorDataSource,
    WebWorkloadDescriptorDataSource, WorkloadDescriptorDataSource,
    WpfWorkloadDescriptorDataSource,
};
use crate::dataflow::ProjectValueSource;
use crate::ports::outbound::{FaultHandler, InstalledRuntimeRegistry};
use crate::project_model::domain::{
    AssetsFileDependenciesSnapshot, ProjectCapabilitiesSnapshot, ProjectSubscriptionUpdate,
    RuntimeDescriptor, WorkloadDescriptor,
};
use crate::project_model::policies::CapabilityExpression;
use crate::shared::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Inputs shared by every data source created for one project.
#[derive(Clone)]
pub struct DataSourceContext {
    pub subscription: Arc<dyn ProjectValueSource<ProjectSubscriptionUpdate>>,
    pub capabilities: Arc<dyn ProjectValueSource<ProjectCapabilitiesSnapshot>>,
    pub runtime_registry: Arc<dyn InstalledRuntimeRegistry>,
    pub fault_handler: Arc<dyn FaultHandler>,
    pub cancel: CancellationToken,
}

/// A data source created from the registry, by the value it produces.
#[derive(Clone)]
pub enum RegisteredDataSource {
    AssetsFile(Arc<dyn ProjectValueSource<Arc<AssetsFileDependenciesSnapshot>>>),
    Runtimes(Arc<dyn ProjectValueSource<Vec<RuntimeDescriptor>>>),
    Workloads(Arc<dyn ProjectValueSource<Vec<WorkloadDescriptor>>>),
}

type Factory = Box<dyn Fn(&DataSourceContext) -> RegisteredDataSource + Send + Sync>;

struct Registration {
    name: String,
    applies_to: CapabilityExpression,
    factory: Factory,
}

/// Startup-time table of data source factories keyed by capability predicate.
///
/// Registrations are evaluated in order; every registration whose
/// predicate holds for the project's capabilities produces one data source.
#[derive(Default)]
pub struct DataSourceRegistry {
    registrations: Vec<Registration>,
}

impl DataSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The project system's own data sources.
    ///
    /// # Errors
    /// Returns an error if a built-in predicate fails to parse
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(AssetsFileDependenciesDataSource::KEY, "PackageReferences", |context| {
            RegisteredDataSource::AssetsFile(Arc::new(AssetsFileDependenciesDataSource::new(
                Arc::clone(&context.subscription),
                Arc::clone(&context.fault_handler),
                context.cancel.clone(),
            )))
        })?;
        registry.register(RuntimeDescriptorDataSource::KEY, "DotNetCore", |context| {
            RegisteredDataSource::Runtimes(Arc::new(RuntimeDescriptorDataSource::create(
                Arc::clone(&context.subscription),
                Arc::clone(&context.runtime_registry),
                Arc::clone(&context.fault_handler),
                context.cancel.clone(),
            )))
        })?;
        registry.register(WorkloadDescriptorDataSource::KEY, "DotNetCore", |context| {
            RegisteredDataSource::Workloads(Arc::new(WorkloadDescriptorDataSource::create(
                Arc::clone(&context.subscription),
                Arc::clone(&context.fault_handler),
            )))
        })?;
        registry.register(
            WpfWorkloadDescriptorDataSource::KEY,
            "DotNetCore & WindowsXaml",
            |context| {
                RegisteredDataSource::Workloads(Arc::new(WpfWorkloadDescriptorDataSource::create(
                    Arc::clone(&context.capabilities),
                    Arc::clone(&context.subscription),
                    Arc::clone(&context.fault_handler),
                )))
            },
        )?;
        registry.register(WebWorkloadDescriptorDataSource::KEY, "DotNetCore", |context| {
            RegisteredDataSource::Workloads(Arc::new(WebWorkloadDescriptorDataSource::create(
                Arc::clone(&context.capabilities),
                Arc::clone(&context.fault_handler),
            )))
        })?;
        Ok(registry)
    }

    /// Adds a factory applied when `applies_to` holds
    ///
    /// # Errors
    /// Returns [`crate::shared::error::ProjectSystemError::InvalidCapabilityExpression`]
    /// if `applies_to` does not parse
    pub fn register<F>(&mut self, name: impl Into<String>, applies_to: &str, factory: F) -> Result<()>
    where
        F: Fn(&DataSourceContext) -> RegisteredDataSource + Send + Sync + 'static,
    {
        self.registrations.push(Registration {
            name: name.into(),
            applies_to: CapabilityExpression::parse(applies_to)?,
            factory: Box::new(factory),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Creates the data sources that apply to a project with `capabilities`.
    pub fn create_applicable(
        &self,
        capabilities: &ProjectCapabilitiesSnapshot,
        context: &DataSourceContext,
    ) -> Vec<(String, RegisteredDataSource)> {
        self.registrations
            .iter()
            .filter(|registration| registration.applies_to.is_satisfied_by(capabilities))
            .map(|registration| {
                debug!(
                    name = registration.name.as_str(),
                    applies_to = %registration.applies_to,
                    "creating data source"
                );
                (registration.name.clone(), (registration.factory)(context))
            })
            .collect()
    }
}
