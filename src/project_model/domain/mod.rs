pub mod assets_snapshot;
pub mod cross_target_context;
pub mod descriptors;
pub mod project_configuration;
pub mod subscription;
pub mod target_framework;

pub use assets_snapshot::{
    AssetsFileDependenciesSnapshot, AssetsFileLibraryType, AssetsFileLogLevel,
    AssetsFileLogMessage, AssetsFileTarget, AssetsFileTargetLibrary,
};
pub use cross_target_context::AggregateCrossTargetProjectContext;
pub use descriptors::{RuntimeDescriptor, WorkloadDescriptor};
pub use project_configuration::{
    ConfiguredProject, ProjectConfiguration, ProjectProperties, TARGET_FRAMEWORK_DIMENSION,
};
pub use subscription::{
    ProjectCapabilitiesSnapshot, ProjectSubscriptionUpdate, RuleSnapshot,
    CONFIGURATION_GENERAL_RULE, SUGGESTED_WORKLOAD_RULE,
};
pub use target_framework::TargetFramework;
