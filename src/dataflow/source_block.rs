use super::disposable::Disposable;
use super::versioned::{DataSourceVersion, SourceKey, VersionMap, VersionedValue};
use crate::shared::error::ProjectSystemError;
use crate::shared::Result;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Push-based production endpoint for versioned values.
///
/// Every publish advances the block's own version by one and stamps it into
/// the value's version map next to the upstream versions it was derived from.
/// Each link receives values in publish order, exactly once, starting with
/// the latest value at the time it was linked. Completion is terminal.
///
/// A producer that cannot derive any value for some upstream versions
/// publishes a fault instead, so that waiters and downstream sources learn
/// those versions will never be reflected.
pub struct SourceBlock<T> {
    inner: Arc<BlockInner<T>>,
}

impl<T> Clone for SourceBlock<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct BlockInner<T> {
    key: SourceKey,
    state: Mutex<BlockState<T>>,
    published: watch::Sender<Published<T>>,
    upstream: Arc<UpstreamSet>,
}

struct BlockState<T> {
    version: DataSourceVersion,
    latest: Option<VersionedValue<T>>,
    faulted: Option<VersionMap>,
    links: Vec<LinkEntry<T>>,
    next_link_id: u64,
    completed: bool,
}

struct LinkEntry<T> {
    id: u64,
    sender: mpsc::UnboundedSender<LinkEvent<T>>,
}

struct Published<T> {
    latest: Option<VersionedValue<T>>,
    faulted: Option<VersionMap>,
    completed: bool,
}

/// What a link delivers.
pub enum LinkEvent<T> {
    Value(VersionedValue<T>),
    /// The producer has no value for these upstream versions and never will.
    Faulted(VersionMap),
}

impl<T> Clone for LinkEvent<T> {
    fn clone(&self) -> Self {
        match self {
            LinkEvent::Value(value) => LinkEvent::Value(value.clone()),
            LinkEvent::Faulted(versions) => LinkEvent::Faulted(versions.clone()),
        }
    }
}

impl<T> SourceBlock<T> {
    pub fn new(key: SourceKey) -> Self {
        let (published, _) = watch::channel(Published {
            latest: None,
            faulted: None,
            completed: false,
        });
        Self {
            inner: Arc::new(BlockInner {
                key,
                state: Mutex::new(BlockState {
                    version: DataSourceVersion::INITIAL,
                    latest: None,
                    faulted: None,
                    links: Vec::new(),
                    next_link_id: 0,
                    completed: false,
                }),
                published,
                upstream: Arc::new(UpstreamSet::default()),
            }),
        }
    }

    pub fn key(&self) -> &SourceKey {
        &self.inner.key
    }

    pub fn version(&self) -> DataSourceVersion {
        self.inner.state.lock().version
    }

    pub fn latest(&self) -> Option<VersionedValue<T>> {
        self.inner.state.lock().latest.clone()
    }

    pub fn is_completed(&self) -> bool {
        self.inner.state.lock().completed
    }

    pub fn link_count(&self) -> usize {
        self.inner.state.lock().links.len()
    }

    /// Publishes a value that depends on no other source.
    pub fn publish(&self, value: T) -> Result<DataSourceVersion> {
        self.publish_arc(Arc::new(value), &VersionMap::new())
    }

    /// Publishes a value derived from inputs carrying `upstream` versions.
    pub fn publish_with_upstream(&self, value: T, upstream: &VersionMap) -> Result<DataSourceVersion> {
        self.publish_arc(Arc::new(value), upstream)
    }

    /// Republishes the latest value under new upstream versions.
    ///
    /// Returns `Ok(None)` when nothing has been published yet.
    pub fn republish_latest(&self, upstream: &VersionMap) -> Result<Option<DataSourceVersion>> {
        let latest = self.inner.state.lock().latest.clone();
        match latest {
            Some(latest) => self
                .publish_arc(Arc::clone(latest.value_arc()), upstream)
                .map(Some),
            None => Ok(None),
        }
    }

    pub fn publish_arc(&self, value: Arc<T>, upstream: &VersionMap) -> Result<DataSourceVersion> {
        let mut state = self.inner.state.lock();
        if state.completed {
            return Err(ProjectSystemError::InvalidOperation {
                message: format!("cannot publish to completed source '{}'", self.inner.key),
            }
            .into());
        }

        let version = state.version.next();
        let value = VersionedValue::from_arc(value, upstream.with(self.inner.key.clone(), version));
        state.version = version;
        state.latest = Some(value.clone());
        state.faulted = None;
        // Sending under the state lock keeps per-link delivery in version order
        let event = LinkEvent::Value(value.clone());
        state.links.retain(|link| link.sender.send(event.clone()).is_ok());
        let link_count = state.links.len();
        self.inner.published.send_replace(Published {
            latest: Some(value),
            faulted: None,
            completed: false,
        });
        drop(state);

        debug!(source = %self.inner.key, %version, link_count, "published value");
        Ok(version)
    }

    /// Records that no value will be produced for `upstream`.
    ///
    /// The block's own version does not advance. Waiters for any of these
    /// versions fail with [`ProjectSystemError::SourceFaulted`] and linked
    /// consumers receive [`LinkEvent::Faulted`]. The next publish clears it.
    pub fn publish_fault(&self, upstream: &VersionMap) -> Result<()> {
        let mut state = self.inner.state.lock();
        if state.completed {
            return Err(ProjectSystemError::InvalidOperation {
                message: format!("cannot fault completed source '{}'", self.inner.key),
            }
            .into());
        }

        state.faulted = Some(upstream.clone());
        let event = LinkEvent::Faulted(upstream.clone());
        state.links.retain(|link| link.sender.send(event.clone()).is_ok());
        self.inner
            .published
            .send_modify(|published| published.faulted = Some(upstream.clone()));
        drop(state);

        debug!(source = %self.inner.key, "published fault");
        Ok(())
    }

    /// Links a new consumer.
    ///
    /// The consumer first receives the latest value, if any, and a pending
    /// fault, then everything published afterwards. Linking a completed block
    /// yields the latest value followed by end-of-stream.
    pub fn link(&self) -> SourceLink<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.inner.state.lock();
        let id = state.next_link_id;
        state.next_link_id += 1;

        if let Some(latest) = &state.latest {
            let _ = sender.send(LinkEvent::Value(latest.clone()));
        }
        if let Some(faulted) = &state.faulted {
            let _ = sender.send(LinkEvent::Faulted(faulted.clone()));
        }
        if !state.completed {
            state.links.push(LinkEntry { id, sender });
        }
        drop(state);

        trace!(source = %self.inner.key, link = id, "linked consumer");
        SourceLink {
            id,
            receiver,
            block: Arc::downgrade(&self.inner),
        }
    }

    /// Marks the block terminal; linked consumers drain and then see end-of-stream.
    pub fn complete(&self) {
        let mut state = self.inner.state.lock();
        if state.completed {
            return;
        }
        state.completed = true;
        state.links.clear();
        self.inner.published.send_modify(|published| published.completed = true);
        drop(state);

        debug!(source = %self.inner.key, "completed");
    }

    /// Records that values of this block reflect `upstream` and, transitively,
    /// everything `upstream` is joined to.
    pub fn join_upstream<U>(&self, upstream: &SourceBlock<U>) -> UpstreamJoin {
        let id = self
            .inner
            .upstream
            .add(upstream.key().clone(), Arc::clone(&upstream.inner.upstream));
        UpstreamJoin {
            set: Arc::clone(&self.inner.upstream),
            id,
        }
    }

    /// Whether values of this block reflect versions of `key`.
    pub fn reflects(&self, key: &SourceKey) -> bool {
        key == &self.inner.key || self.inner.upstream.reflects(key)
    }

    /// Every upstream key this block is joined to, directly or transitively.
    pub fn upstream_keys(&self) -> BTreeSet<SourceKey> {
        let mut keys = BTreeSet::new();
        self.inner.upstream.collect_keys(&mut keys);
        keys
    }

    /// Waits for a value reflecting at least `version` of `upstream`.
    ///
    /// Fails fast with [`ProjectSystemError::NotJoined`] when this block is not
    /// joined to `upstream`, since such a value would never arrive, and with
    /// [`ProjectSystemError::SourceFaulted`] once a fault covers `version`.
    pub async fn wait_for_version(
        &self,
        upstream: &SourceKey,
        version: DataSourceVersion,
        cancel: &CancellationToken,
    ) -> Result<VersionedValue<T>> {
        if !self.reflects(upstream) {
            return Err(ProjectSystemError::NotJoined {
                source_key: self.inner.key.to_string(),
                upstream: upstream.to_string(),
            }
            .into());
        }

        let mut receiver = self.inner.published.subscribe();
        loop {
            {
                let published = receiver.borrow_and_update();
                if let Some(latest) = &published.latest {
                    if latest.version_of(upstream).is_some_and(|v| v >= version) {
                        return Ok(latest.clone());
                    }
                }
                if let Some(faulted) = &published.faulted {
                    if faulted.get(upstream).is_some_and(|v| v >= version) {
                        return Err(ProjectSystemError::SourceFaulted {
                            source_key: self.inner.key.to_string(),
                            upstream: upstream.to_string(),
                            version: version.value(),
                        }
                        .into());
                    }
                }
                if published.completed {
                    return Err(self.completed_error(upstream, version));
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(ProjectSystemError::Cancelled.into()),
                changed = receiver.changed() => {
                    if changed.is_err() {
                        return Err(self.completed_error(upstream, version));
                    }
                }
            }
        }
    }

    fn completed_error(&self, upstream: &SourceKey, version: DataSourceVersion) -> anyhow::Error {
        ProjectSystemError::SourceCompleted {
            source_key: self.inner.key.to_string(),
            upstream: upstream.to_string(),
            version: version.value(),
        }
        .into()
    }
}

/// Consumer end of a [`SourceBlock`] link. Dropping it unlinks.
pub struct SourceLink<T> {
    id: u64,
    receiver: mpsc::UnboundedReceiver<LinkEvent<T>>,
    block: Weak<BlockInner<T>>,
}

impl<T> SourceLink<T> {
    /// Next value, or `None` once the block completed and the link is drained.
    /// Faults are skipped.
    pub async fn recv(&mut self) -> Option<VersionedValue<T>> {
        loop {
            if let LinkEvent::Value(value) = self.receiver.recv().await? {
                return Some(value);
            }
        }
    }

    /// Next value or fault, or `None` once the block completed and the link is drained.
    pub async fn recv_event(&mut self) -> Option<LinkEvent<T>> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<VersionedValue<T>> {
        loop {
            if let LinkEvent::Value(value) = self.receiver.try_recv().ok()? {
                return Some(value);
            }
        }
    }
}

impl<T> Drop for SourceLink<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.block.upgrade() {
            inner.state.lock().links.retain(|link| link.id != self.id);
        }
    }
}

impl<T: Send + Sync + 'static> Disposable for SourceLink<T> {
    fn dispose(self: Box<Self>) {
        drop(self);
    }
}

#[derive(Default)]
struct UpstreamSet {
    entries: Mutex<Vec<UpstreamEntry>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct UpstreamEntry {
    id: u64,
    key: SourceKey,
    upstream: Arc<UpstreamSet>,
}

impl UpstreamSet {
    fn add(&self, key: SourceKey, upstream: Arc<UpstreamSet>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push(UpstreamEntry { id, key, upstream });
        id
    }

    fn remove(&self, id: u64) {
        self.entries.lock().retain(|entry| entry.id != id);
    }

    fn reflects(&self, key: &SourceKey) -> bool {
        // Copy out so no lock is held while walking further upstream
        let entries = self.entries.lock().clone();
        entries
            .iter()
            .any(|entry| &entry.key == key || entry.upstream.reflects(key))
    }

    fn collect_keys(&self, keys: &mut BTreeSet<SourceKey>) {
        let entries = self.entries.lock().clone();
        for entry in entries {
            if keys.insert(entry.key.clone()) {
                entry.upstream.collect_keys(keys);
            }
        }
    }
}

/// Registration created by [`SourceBlock::join_upstream`]; disposing it
/// removes the join.
pub struct UpstreamJoin {
    set: Arc<UpstreamSet>,
    id: u64,
}

impl Disposable for UpstreamJoin {
    fn dispose(self: Box<Self>) {
        self.set.remove(self.id);
    }
}
