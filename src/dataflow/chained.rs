use super::disposable::{AbortOnDispose, DisposableBag};
use super::join::{InputLink, SyncLink2};
use super::source_block::{LinkEvent, SourceBlock, SourceLink};
use super::versioned::{SourceKey, VersionMap, VersionedValue};
use crate::ports::outbound::FaultHandler;
use crate::shared::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Uniform downstream contract of every data source.
pub trait ProjectValueSource<T>: Send + Sync {
    fn key(&self) -> &SourceKey;

    /// Links a new consumer, initialising the source on first use.
    fn subscribe(&self) -> Result<SourceLink<T>>;

    /// The block values are published to, for upstream joins and version waits.
    fn source_block(&self) -> Result<SourceBlock<T>>;
}

/// A root block is a data source fed directly by its owner.
impl<T: Send + Sync + 'static> ProjectValueSource<T> for SourceBlock<T> {
    fn key(&self) -> &SourceKey {
        SourceBlock::key(self)
    }

    fn subscribe(&self) -> Result<SourceLink<T>> {
        Ok(self.link())
    }

    fn source_block(&self) -> Result<SourceBlock<T>> {
        Ok(self.clone())
    }
}

/// Turns one upstream input into the next published value.
#[async_trait]
pub trait Transform<I>: Send + 'static {
    type Output: Send + Sync + 'static;

    async fn transform(&mut self, input: &VersionedValue<I>) -> Result<Self::Output>;
}

/// Adapts a synchronous closure into a [`Transform`].
pub struct FnTransform<I, F> {
    f: F,
    _input: PhantomData<fn(&I)>,
}

pub fn transform_fn<I, O, F>(f: F) -> FnTransform<I, F>
where
    F: FnMut(&I) -> Result<O> + Send + 'static,
{
    FnTransform {
        f,
        _input: PhantomData,
    }
}

#[async_trait]
impl<I, O, F> Transform<I> for FnTransform<I, F>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
    F: FnMut(&I) -> Result<O> + Send + 'static,
{
    type Output = O;

    async fn transform(&mut self, input: &VersionedValue<I>) -> Result<O> {
        (self.f)(input.value())
    }
}

type LinkStep<T> = Box<dyn FnOnce(&SourceBlock<T>) -> Result<DisposableBag> + Send>;

/// Data source derived from one or more upstream sources.
///
/// Nothing is linked until the first subscriber arrives; the link step then
/// subscribes upstream, registers the upstream joins and spawns the transform
/// task. Everything it creates lives in one [`DisposableBag`]. Must be first
/// subscribed from within a Tokio runtime.
pub struct ChainedDataSource<T> {
    block: SourceBlock<T>,
    link_step: Mutex<Option<LinkStep<T>>>,
    links: Mutex<Option<DisposableBag>>,
}

impl<T: Send + Sync + 'static> ChainedDataSource<T> {
    pub fn new(
        key: SourceKey,
        link_step: impl FnOnce(&SourceBlock<T>) -> Result<DisposableBag> + Send + 'static,
    ) -> Self {
        Self {
            block: SourceBlock::new(key),
            link_step: Mutex::new(Some(Box::new(link_step))),
            links: Mutex::new(None),
        }
    }

    /// Derives values from a single upstream source.
    pub fn from_upstream<I, X>(
        key: SourceKey,
        upstream: Arc<dyn ProjectValueSource<I>>,
        transform: X,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> Self
    where
        I: Send + Sync + 'static,
        X: Transform<I, Output = T>,
    {
        Self::new(key, move |target| {
            let link = upstream.subscribe()?;
            let mut bag = DisposableBag::new();
            bag.add(target.join_upstream(&upstream.source_block()?));
            let task = tokio::spawn(pump(link, transform, target.clone(), fault_handler));
            bag.add(AbortOnDispose::new(task));
            Ok(bag)
        })
    }

    /// Derives values from two upstream sources joined by version.
    pub fn from_joined<A, B, X>(
        key: SourceKey,
        left: Arc<dyn ProjectValueSource<A>>,
        right: Arc<dyn ProjectValueSource<B>>,
        transform: X,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> Self
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        X: Transform<(Arc<A>, Arc<B>), Output = T>,
    {
        Self::new(key, move |target| {
            let link = SyncLink2::new(left.subscribe()?, right.subscribe()?);
            let mut bag = DisposableBag::new();
            bag.add(target.join_upstream(&left.source_block()?));
            bag.add(target.join_upstream(&right.source_block()?));
            let task = tokio::spawn(pump(link, transform, target.clone(), fault_handler));
            bag.add(AbortOnDispose::new(task));
            Ok(bag)
        })
    }

    pub fn is_linked(&self) -> bool {
        self.links.lock().is_some()
    }

    /// Runs the link step once. A step that fails completes the source, so
    /// later subscribers see end-of-stream rather than a source that silently
    /// never produces.
    fn ensure_linked(&self) -> Result<()> {
        let step = self.link_step.lock().take();
        if let Some(step) = step {
            debug!(source = %self.block.key(), "linking external input");
            match step(&self.block) {
                Ok(bag) => *self.links.lock() = Some(bag),
                Err(error) => {
                    warn!(source = %self.block.key(), error = %error, "linking failed");
                    self.block.complete();
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// Releases upstream links, joins and the transform task, then completes.
    pub fn dispose(&self) {
        self.link_step.lock().take();
        if let Some(mut bag) = self.links.lock().take() {
            bag.dispose();
        }
        self.block.complete();
    }
}

impl<T: Send + Sync + 'static> ProjectValueSource<T> for ChainedDataSource<T> {
    fn key(&self) -> &SourceKey {
        self.block.key()
    }

    fn subscribe(&self) -> Result<SourceLink<T>> {
        self.ensure_linked()?;
        Ok(self.block.link())
    }

    fn source_block(&self) -> Result<SourceBlock<T>> {
        self.ensure_linked()?;
        Ok(self.block.clone())
    }
}

impl<T> Drop for ChainedDataSource<T> {
    fn drop(&mut self) {
        if let Some(mut bag) = self.links.get_mut().take() {
            bag.dispose();
        }
    }
}

/// Feeds inputs through the transform and republishes the results.
///
/// A failed transform is reported as a fault and the last good value is
/// republished under the new input versions, so consumers waiting on those
/// versions are released with the frozen value instead of hanging. Without a
/// last good value the versions are published as a fault. Upstream faults are
/// handled the same way.
async fn pump<I, L, X>(
    mut link: L,
    mut transform: X,
    target: SourceBlock<X::Output>,
    fault_handler: Arc<dyn FaultHandler>,
) where
    L: InputLink<I>,
    X: Transform<I>,
{
    while let Some(event) = link.next_input().await {
        let published = match event {
            LinkEvent::Value(input) => match transform.transform(&input).await {
                Ok(output) => target
                    .publish_with_upstream(output, input.versions())
                    .map(|_| ()),
                Err(error) => {
                    warn!(source = %target.key(), error = %error, "transform failed");
                    fault_handler.report_fault(target.key(), &error);
                    degrade(&target, input.versions())
                }
            },
            LinkEvent::Faulted(versions) => {
                debug!(source = %target.key(), "upstream faulted");
                degrade(&target, &versions)
            }
        };

        if let Err(error) = published {
            debug!(source = %target.key(), error = %error, "stopping transform");
            break;
        }
    }
    target.complete();
}

fn degrade<T>(target: &SourceBlock<T>, versions: &VersionMap) -> Result<()> {
    match target.republish_latest(versions)? {
        Some(_) => Ok(()),
        None => target.publish_fault(versions),
    }
}
