use crate::shared::Result;
use std::path::Path;

/// AssetsFileReader port for reading `project.assets.json`
///
/// This port abstracts the file system operations needed to read the
/// NuGet restore output of a project.
pub trait AssetsFileReader {
    /// Reads the raw bytes of the assets file at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is too large
    /// - The file cannot be read due to permissions or I/O errors
    fn read_assets_file(&self, path: &Path) -> Result<Vec<u8>>;
}
