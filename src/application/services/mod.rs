/// Application services
///
/// Long-lived collaborators built over the data sources: the cross-target
/// context provider, missing-component registration and the data source
/// registration table.
mod cross_target_context_provider;
mod data_source_registry;
mod setup_component_registration;

pub use cross_target_context_provider::CrossTargetContextProvider;
pub use data_source_registry::{DataSourceContext, DataSourceRegistry, RegisteredDataSource};
pub use setup_component_registration::SetupComponentRegistrationService;
