/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod runtime_registry;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use runtime_registry::DotnetRootRuntimeRegistry;
