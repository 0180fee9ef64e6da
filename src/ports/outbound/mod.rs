/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the project system core uses to
/// interact with its host and the machine (file system, runtime registry,
/// configuration service, fault reporting, console).
pub mod active_configured_projects;
pub mod assets_file_reader;
pub mod fault_handler;
pub mod formatter;
pub mod installed_runtime_registry;
pub mod output_presenter;
pub mod progress_reporter;

pub use active_configured_projects::{ActiveConfiguredProjects, ActiveConfiguredProjectsProvider};
pub use assets_file_reader::AssetsFileReader;
pub use fault_handler::FaultHandler;
pub use formatter::AssetsFormatter;
pub use installed_runtime_registry::InstalledRuntimeRegistry;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
