use crate::dataflow::{
    ChainedDataSource, ProjectValueSource, SourceBlock, SourceKey, SourceLink, Transform,
    VersionedValue,
};
use crate::ports::outbound::FaultHandler;
use crate::shared::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle of a descriptor data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSourceState {
    /// Not linked to any upstream source yet.
    Idle,
    /// Linked; no update has been transformed yet.
    Subscribed,
    /// The last update emitted descriptors.
    Reporting,
    /// The last update emitted nothing: condition absent or already reported.
    Quiesced,
}

/// A chained data source emitting sets of missing-component descriptors.
///
/// Each concrete detector latches what it has reported, so a condition is
/// announced at most once and later updates emit an empty set.
pub struct DescriptorDataSource<D> {
    inner: ChainedDataSource<Vec<D>>,
    state: Arc<Mutex<DescriptorSourceState>>,
}

impl<D: Send + Sync + 'static> DescriptorDataSource<D> {
    pub(crate) fn from_upstream<I, X>(
        key: SourceKey,
        upstream: Arc<dyn ProjectValueSource<I>>,
        detector: X,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> Self
    where
        I: Send + Sync + 'static,
        X: Transform<I, Output = Vec<D>>,
    {
        let state = Arc::new(Mutex::new(DescriptorSourceState::Idle));
        let tracking = StateTracking {
            detector,
            state: Arc::clone(&state),
        };
        Self {
            inner: ChainedDataSource::from_upstream(key, upstream, tracking, fault_handler),
            state,
        }
    }

    pub(crate) fn from_joined<A, B, X>(
        key: SourceKey,
        left: Arc<dyn ProjectValueSource<A>>,
        right: Arc<dyn ProjectValueSource<B>>,
        detector: X,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> Self
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        X: Transform<(Arc<A>, Arc<B>), Output = Vec<D>>,
    {
        let state = Arc::new(Mutex::new(DescriptorSourceState::Idle));
        let tracking = StateTracking {
            detector,
            state: Arc::clone(&state),
        };
        Self {
            inner: ChainedDataSource::from_joined(key, left, right, tracking, fault_handler),
            state,
        }
    }

    pub fn state(&self) -> DescriptorSourceState {
        *self.state.lock()
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }

    fn mark_subscribed(&self) {
        let mut state = self.state.lock();
        if *state == DescriptorSourceState::Idle {
            *state = DescriptorSourceState::Subscribed;
        }
    }
}

impl<D: Send + Sync + 'static> ProjectValueSource<Vec<D>> for DescriptorDataSource<D> {
    fn key(&self) -> &SourceKey {
        self.inner.key()
    }

    fn subscribe(&self) -> Result<SourceLink<Vec<D>>> {
        let link = self.inner.subscribe()?;
        self.mark_subscribed();
        Ok(link)
    }

    fn source_block(&self) -> Result<SourceBlock<Vec<D>>> {
        let block = self.inner.source_block()?;
        self.mark_subscribed();
        Ok(block)
    }
}

struct StateTracking<X> {
    detector: X,
    state: Arc<Mutex<DescriptorSourceState>>,
}

#[async_trait]
impl<I, D, X> Transform<I> for StateTracking<X>
where
    I: Send + Sync + 'static,
    D: Send + Sync + 'static,
    X: Transform<I, Output = Vec<D>>,
{
    type Output = Vec<D>;

    async fn transform(&mut self, input: &VersionedValue<I>) -> Result<Vec<D>> {
        let descriptors = self.detector.transform(input).await?;
        let next = if descriptors.is_empty() {
            DescriptorSourceState::Quiesced
        } else {
            info!(count = descriptors.len(), "reporting missing components");
            DescriptorSourceState::Reporting
        };
        let previous = std::mem::replace(&mut *self.state.lock(), next);
        if previous != next {
            debug!(?previous, ?next, "descriptor source state changed");
        }
        Ok(descriptors)
    }
}
