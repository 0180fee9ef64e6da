use project_system::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock AssetsFileReader serving fixed bytes and recording requested paths
#[derive(Clone)]
pub struct MockAssetsFileReader {
    pub contents: Vec<u8>,
    pub should_fail: bool,
    pub requested: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockAssetsFileReader {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            should_fail: false,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn requested_paths(&self) -> Vec<PathBuf> {
        self.requested.lock().unwrap().clone()
    }
}

impl AssetsFileReader for MockAssetsFileReader {
    fn read_assets_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(path.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock assets file read failure");
        }
        Ok(self.contents.clone())
    }
}
