/// Shared kernel - error types, result alias, file checks and collections
///
/// Everything in here is free of project-system semantics and may be used
/// from any layer.
pub mod collections;
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
