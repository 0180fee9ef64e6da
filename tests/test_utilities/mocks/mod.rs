/// Mock implementations for testing
mod mock_assets_file_reader;
mod mock_configured_projects;
mod mock_fault_handler;
mod mock_progress_reporter;
mod mock_runtime_registry;

#[allow(unused_imports)]
pub use mock_assets_file_reader::MockAssetsFileReader;
#[allow(unused_imports)]
pub use mock_configured_projects::MockConfiguredProjects;
#[allow(unused_imports)]
pub use mock_fault_handler::MockFaultHandler;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
#[allow(unused_imports)]
pub use mock_runtime_registry::MockRuntimeRegistry;
