use crate::ports::outbound::AssetsFileReader;
use crate::project_model::services::AssetsFileSnapshotBuilder;
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading assets files from the file system
///
/// Symbolic links, non-regular files and oversized files are rejected
/// before any bytes are read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetsFileReader for FileSystemReader {
    fn read_assets_file(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(ProjectSystemError::AssetsFileReadError {
                path: path.to_path_buf(),
                details: "project.assets.json does not exist. \
                          Pass the assets file, its obj folder or the project folder."
                    .to_string(),
            }
            .into());
        }

        AssetsFileSnapshotBuilder::read(path)
    }
}
