use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound on the size of any file the project system reads (256 MB).
///
/// Assets files of very large solutions reach tens of megabytes; anything
/// beyond this is treated as corrupt rather than parsed.
pub const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Checks that `path` names a regular file of acceptable size
///
/// Symbolic links are followed, so a link to an assets file is inspected as
/// the file it points to.
///
/// # Arguments
/// * `path` - The file to inspect
/// * `file_description` - Human-readable description used in error messages
///
/// # Returns
/// The file size in bytes
///
/// # Errors
/// Returns an error if the file is missing, does not resolve to a regular
/// file, or exceeds [`MAX_FILE_SIZE`]
pub fn check_readable_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| ProjectSystemError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;
    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
