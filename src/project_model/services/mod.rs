mod lock_file;
mod property_interception;
mod snapshot_builder;
mod target_framework_parser;

pub use lock_file::LockFile;
pub use property_interception::{
    DefaultValueInterceptor, InterceptedProjectProperties, PropertyValueInterceptor,
};
pub use snapshot_builder::{diff_log_messages, AssetsFileSnapshotBuilder};
pub use target_framework_parser::TargetFrameworkParser;
