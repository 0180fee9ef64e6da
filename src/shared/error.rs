use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the assets file was inspected and carries no error diagnostics
    Success = 0,
    /// The assets file carries error-level restore diagnostics
    DiagnosticsFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O error, unresolved package, bad config, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DiagnosticsFound => write!(f, "Diagnostics Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the project system.
///
/// Transient I/O and parse failures of the assets file never surface as
/// these errors from the snapshot model itself; they are only produced by
/// the CLI paths that must report them. Precondition and consistency
/// violations are always explicit.
#[derive(Debug, Error)]
pub enum ProjectSystemError {
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Invalid cross-target context: {reason}")]
    InvalidContext { reason: String },

    #[error("Failed to read assets file: {path}\nDetails: {details}\n\n💡 Hint: Run a NuGet restore so that project.assets.json exists and is readable")]
    AssetsFileReadError { path: PathBuf, details: String },

    #[error("Failed to parse assets file: {path}\nDetails: {details}\n\n💡 Hint: The file may be mid-write by a restore; retry once the restore has finished")]
    AssetsFileParseError { path: PathBuf, details: String },

    #[error("Source '{source_key}' is not joined to upstream source '{upstream}'")]
    NotJoined { source_key: String, upstream: String },

    #[error("Source '{source_key}' completed before version {version} of '{upstream}' was observed")]
    SourceCompleted {
        source_key: String,
        upstream: String,
        version: u64,
    },

    #[error("Source '{source_key}' failed to produce a value for version {version} of '{upstream}'")]
    SourceFaulted {
        source_key: String,
        upstream: String,
        version: u64,
    },

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Invalid capability expression '{expression}': {reason}")]
    InvalidCapabilityExpression { expression: String, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },
}
