//! project-system-core - dataflow kernel for managed project state
//!
//! This library models the state a managed-language project system keeps
//! about a project: versioned data sources that transform upstream
//! subscription updates, immutable snapshots of NuGet's `project.assets.json`,
//! the aggregate cross-target context of a multi-targeting project, and the
//! data sources that report runtimes and workloads a project needs installed.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Project model** (`project_model`): Snapshot types, target frameworks,
//!   descriptors, policies and pure services
//! - **Dataflow** (`dataflow`): Versioned source blocks, links and joins
//! - **Application Layer** (`application`): Data sources, services, use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Errors, file checks and concurrent collections
//!
//! # Example
//!
//! ```no_run
//! use project_system::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = InspectAssetsUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
//!
//! let request = InspectRequest::new(PathBuf::from("obj/project.assets.json"))
//!     .with_target(Some("net8.0".to_string()));
//! let response = use_case.execute(request)?;
//!
//! let formatter = FormatterFactory::create(OutputFormat::Markdown);
//! println!("{}", formatter.format(&response.read_model)?);
//!
//! if let Some(path) = response.snapshot.try_resolve_package_path("Newtonsoft.Json", "13.0.3") {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dataflow;
pub mod ports;
pub mod project_model;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DotnetRootRuntimeRegistry, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::logging::TracingFaultHandler;
    pub use crate::application::data_sources::{
        AssetsFileDependenciesDataSource, ProjectValueDataSource, RuntimeDescriptorDataSource,
        WebWorkloadDescriptorDataSource, WorkloadDescriptorDataSource,
        WpfWorkloadDescriptorDataSource,
    };
    pub use crate::application::dto::{InspectRequest, InspectResponse, OutputFormat};
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::services::{
        CrossTargetContextProvider, DataSourceRegistry, SetupComponentRegistrationService,
    };
    pub use crate::application::use_cases::InspectAssetsUseCase;
    pub use crate::dataflow::{ChainedDataSource, DataSourceVersion, SourceKey, VersionedValue};
    pub use crate::ports::outbound::{
        ActiveConfiguredProjectsProvider, AssetsFileReader, AssetsFormatter, FaultHandler,
        InstalledRuntimeRegistry, OutputPresenter, ProgressReporter,
    };
    pub use crate::project_model::domain::{
        AggregateCrossTargetProjectContext, AssetsFileDependenciesSnapshot, ConfiguredProject,
        ProjectSubscriptionUpdate, RuntimeDescriptor, TargetFramework, WorkloadDescriptor,
    };
    pub use crate::shared::Result;
}
