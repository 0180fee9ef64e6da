use crate::dataflow::{
    ChainedDataSource, ProjectValueSource, SourceBlock, SourceKey, SourceLink, Transform,
    VersionedValue,
};
use crate::ports::outbound::FaultHandler;
use crate::project_model::domain::{
    AssetsFileDependenciesSnapshot, ProjectSubscriptionUpdate, CONFIGURATION_GENERAL_RULE,
};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Evaluated property holding the path of `project.assets.json`
pub const PROJECT_ASSETS_FILE_PROPERTY: &str = "ProjectAssetsFile";

/// Publishes the project's assets file snapshot.
///
/// Follows `ConfigurationGeneral.ProjectAssetsFile` on every subscription
/// update and re-reads the file only when its path or last write time
/// changed. Until a file has been read the empty snapshot is published.
pub struct AssetsFileDependenciesDataSource {
    inner: ChainedDataSource<Arc<AssetsFileDependenciesSnapshot>>,
}

impl AssetsFileDependenciesDataSource {
    pub const KEY: &'static str = "AssetsFileDependencies";

    pub fn new(
        subscription: Arc<dyn ProjectValueSource<ProjectSubscriptionUpdate>>,
        fault_handler: Arc<dyn FaultHandler>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner: ChainedDataSource::from_upstream(
                SourceKey::new(Self::KEY),
                subscription,
                AssetsFileTransform {
                    current: AssetsFileDependenciesSnapshot::empty(),
                    last_seen: None,
                    cancel,
                },
                fault_handler,
            ),
        }
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }
}

impl ProjectValueSource<Arc<AssetsFileDependenciesSnapshot>> for AssetsFileDependenciesDataSource {
    fn key(&self) -> &SourceKey {
        self.inner.key()
    }

    fn subscribe(&self) -> Result<SourceLink<Arc<AssetsFileDependenciesSnapshot>>> {
        self.inner.subscribe()
    }

    fn source_block(&self) -> Result<SourceBlock<Arc<AssetsFileDependenciesSnapshot>>> {
        self.inner.source_block()
    }
}

struct AssetsFileTransform {
    current: Arc<AssetsFileDependenciesSnapshot>,
    last_seen: Option<(PathBuf, DateTime<Utc>)>,
    cancel: CancellationToken,
}

fn last_write_time(path: &Path) -> Option<DateTime<Utc>> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified))
}

#[async_trait]
impl Transform<ProjectSubscriptionUpdate> for AssetsFileTransform {
    type Output = Arc<AssetsFileDependenciesSnapshot>;

    async fn transform(
        &mut self,
        input: &VersionedValue<ProjectSubscriptionUpdate>,
    ) -> Result<Arc<AssetsFileDependenciesSnapshot>> {
        let Some(path) = input
            .value()
            .rule(CONFIGURATION_GENERAL_RULE)
            .and_then(|rule| rule.property(PROJECT_ASSETS_FILE_PROPERTY))
            .map(PathBuf::from)
        else {
            return Ok(Arc::clone(&self.current));
        };

        if self.cancel.is_cancelled() {
            return Ok(Arc::clone(&self.current));
        }

        let modified = last_write_time(&path);
        if let (Some(modified), Some((seen_path, seen_time))) = (modified, &self.last_seen) {
            if *seen_path == path && *seen_time == modified {
                debug!(path = %path.display(), "assets file not modified");
                return Ok(Arc::clone(&self.current));
            }
        }

        let current = Arc::clone(&self.current);
        let read_path = path.clone();
        let next =
            tokio::task::spawn_blocking(move || current.update_from_assets_file(&read_path)).await?;

        self.current = next;
        self.last_seen = modified.map(|modified| (path, modified));
        Ok(Arc::clone(&self.current))
    }
}
