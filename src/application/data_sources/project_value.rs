use crate::dataflow::{DataSourceVersion, ProjectValueSource, SourceBlock, SourceKey, SourceLink};
use crate::shared::Result;
use tracing::debug;

/// Root data source whose values are pushed in by its owner.
///
/// Used for the host-fed inputs of the graph: rule subscription updates and
/// project capabilities.
pub struct ProjectValueDataSource<T> {
    block: SourceBlock<T>,
}

impl<T: Send + Sync + 'static> ProjectValueDataSource<T> {
    pub fn new(key: impl Into<SourceKey>) -> Self {
        Self {
            block: SourceBlock::new(key.into()),
        }
    }

    /// Publishes the next value.
    ///
    /// # Errors
    /// Fails once the source has been completed.
    pub fn post(&self, value: T) -> Result<DataSourceVersion> {
        let version = self.block.publish(value)?;
        debug!(source = %self.block.key(), %version, "posted value");
        Ok(version)
    }

    pub fn version(&self) -> DataSourceVersion {
        self.block.version()
    }

    pub fn complete(&self) {
        self.block.complete();
    }
}

impl<T: Send + Sync + 'static> ProjectValueSource<T> for ProjectValueDataSource<T> {
    fn key(&self) -> &SourceKey {
        self.block.key()
    }

    fn subscribe(&self) -> Result<SourceLink<T>> {
        Ok(self.block.link())
    }

    fn source_block(&self) -> Result<SourceBlock<T>> {
        Ok(self.block.clone())
    }
}
