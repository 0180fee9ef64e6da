/// Project value data sources
///
/// Each data source derives one typed, versioned value stream from the
/// host-fed roots (rule subscription updates and project capabilities).
mod assets_file_dependencies;
mod descriptor_source;
mod project_value;
mod runtime_descriptors;
mod web_workload;
mod workload_descriptors;
mod wpf_workload;

pub use assets_file_dependencies::{AssetsFileDependenciesDataSource, PROJECT_ASSETS_FILE_PROPERTY};
pub use descriptor_source::{DescriptorDataSource, DescriptorSourceState};
pub use project_value::ProjectValueDataSource;
pub use runtime_descriptors::{
    RuntimeDescriptorDataSource, TARGET_FRAMEWORK_IDENTIFIER_PROPERTY,
    TARGET_FRAMEWORK_VERSION_PROPERTY,
};
pub use web_workload::{WebWorkloadDescriptorDataSource, WEB_CAPABILITY};
pub use workload_descriptors::{WorkloadDescriptorDataSource, VISUAL_STUDIO_COMPONENT_IDS_METADATA};
pub use wpf_workload::{WpfWorkloadDescriptorDataSource, USE_WPF_PROPERTY};
