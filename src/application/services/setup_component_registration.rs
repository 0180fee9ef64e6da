use crate::dataflow::{AbortOnDispose, DisposableBag, ProjectValueSource};
use crate::project_model::domain::{RuntimeDescriptor, WorkloadDescriptor};
use crate::shared::collections::ConcurrentHashSet;
use crate::shared::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Collects the setup components the project's descriptor sources report missing.
///
/// Any number of runtime and workload sources can be registered; component
/// ids are deduplicated across all of them. Registration must happen within
/// a Tokio runtime.
pub struct SetupComponentRegistrationService {
    component_ids: Arc<ConcurrentHashSet<String>>,
    changes: Arc<watch::Sender<usize>>,
    links: Mutex<DisposableBag>,
}

impl SetupComponentRegistrationService {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            component_ids: Arc::new(ConcurrentHashSet::new()),
            changes: Arc::new(changes),
            links: Mutex::new(DisposableBag::new()),
        }
    }

    pub fn register_runtime_source(
        &self,
        source: &dyn ProjectValueSource<Vec<RuntimeDescriptor>>,
    ) -> Result<()> {
        self.register(source, |descriptor: &RuntimeDescriptor| {
            vec![descriptor.component_id().to_string()]
        })
    }

    pub fn register_workload_source(
        &self,
        source: &dyn ProjectValueSource<Vec<WorkloadDescriptor>>,
    ) -> Result<()> {
        self.register(source, |descriptor: &WorkloadDescriptor| {
            descriptor.component_ids().to_vec()
        })
    }

    fn register<D>(
        &self,
        source: &dyn ProjectValueSource<Vec<D>>,
        component_ids_of: fn(&D) -> Vec<String>,
    ) -> Result<()>
    where
        D: Send + Sync + 'static,
    {
        let mut link = source.subscribe()?;
        let component_ids = Arc::clone(&self.component_ids);
        let changes = Arc::clone(&self.changes);
        let source_key = source.key().clone();

        let task = tokio::spawn(async move {
            while let Some(descriptors) = link.recv().await {
                for descriptor in descriptors.value() {
                    for id in component_ids_of(descriptor) {
                        if component_ids.add(id.clone()) {
                            info!(source = %source_key, component = %id, "missing setup component");
                            changes.send_replace(component_ids.len());
                        }
                    }
                }
            }
        });
        self.links.lock().add(AbortOnDispose::new(task));
        Ok(())
    }

    /// Missing component ids reported so far, sorted.
    pub fn missing_component_ids(&self) -> Vec<String> {
        let mut ids = self.component_ids.snapshot();
        ids.sort();
        ids
    }

    /// Watches the number of distinct missing components.
    pub fn subscribe_changes(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }

    /// Stops following every registered source.
    pub fn dispose(&self) {
        self.links.lock().dispose();
    }
}

impl Default for SetupComponentRegistrationService {
    fn default() -> Self {
        Self::new()
    }
}
