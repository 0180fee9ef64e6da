use super::source_block::{LinkEvent, SourceLink};
use super::versioned::{VersionMap, VersionedValue};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::trace;

/// Anything a chained data source can pull versioned inputs from.
#[async_trait]
pub trait InputLink<I>: Send {
    /// Next input or upstream fault, or `None` when no further input can ever arrive.
    async fn next_input(&mut self) -> Option<LinkEvent<I>>;
}

#[async_trait]
impl<T: Send + Sync + 'static> InputLink<T> for SourceLink<T> {
    async fn next_input(&mut self) -> Option<LinkEvent<T>> {
        self.recv_event().await
    }
}

/// Synchronized link over two upstream sources.
///
/// Keeps the newest value seen on each side and yields a pair only when a new
/// value arrives and both sides' version maps agree on every shared upstream
/// key. A side that runs ahead is held until the other side catches up, so a
/// pair built from mismatched upstream versions is never produced. A fault on
/// either side is forwarded, merged with the other side's versions when they
/// agree.
pub struct SyncLink2<A, B> {
    left: SourceLink<A>,
    right: SourceLink<B>,
    latest_left: Option<VersionedValue<A>>,
    latest_right: Option<VersionedValue<B>>,
    left_open: bool,
    right_open: bool,
}

impl<A, B> SyncLink2<A, B> {
    pub fn new(left: SourceLink<A>, right: SourceLink<B>) -> Self {
        Self {
            left,
            right,
            latest_left: None,
            latest_right: None,
            left_open: true,
            right_open: true,
        }
    }

    fn consistent_pair(&self) -> Option<VersionedValue<(Arc<A>, Arc<B>)>> {
        let left = self.latest_left.as_ref()?;
        let right = self.latest_right.as_ref()?;
        let versions = left.versions().union(right.versions())?;
        Some(VersionedValue::new(
            (Arc::clone(left.value_arc()), Arc::clone(right.value_arc())),
            versions,
        ))
    }

    /// A closed side that never produced a value can never be paired.
    fn is_exhausted(&self) -> bool {
        (!self.left_open && (self.latest_left.is_none() || !self.right_open))
            || (!self.right_open && self.latest_right.is_none())
    }

    fn merged_fault(versions: VersionMap, other: Option<&VersionMap>) -> LinkEvent<(Arc<A>, Arc<B>)> {
        let versions = match other.and_then(|other| versions.union(other)) {
            Some(merged) => merged,
            None => versions,
        };
        LinkEvent::Faulted(versions)
    }

    /// Next mutually consistent pair, carrying the union of both version maps.
    pub async fn recv(&mut self) -> Option<VersionedValue<(Arc<A>, Arc<B>)>> {
        loop {
            if let LinkEvent::Value(pair) = self.recv_event().await? {
                return Some(pair);
            }
        }
    }

    /// Next consistent pair or forwarded fault.
    pub async fn recv_event(&mut self) -> Option<LinkEvent<(Arc<A>, Arc<B>)>> {
        loop {
            if self.is_exhausted() {
                return None;
            }

            tokio::select! {
                event = self.left.recv_event(), if self.left_open => match event {
                    Some(LinkEvent::Value(value)) => self.latest_left = Some(value),
                    Some(LinkEvent::Faulted(versions)) => {
                        let other = self.latest_right.as_ref().map(|right| right.versions());
                        return Some(Self::merged_fault(versions, other));
                    }
                    None => {
                        self.left_open = false;
                        continue;
                    }
                },
                event = self.right.recv_event(), if self.right_open => match event {
                    Some(LinkEvent::Value(value)) => self.latest_right = Some(value),
                    Some(LinkEvent::Faulted(versions)) => {
                        let other = self.latest_left.as_ref().map(|left| left.versions());
                        return Some(Self::merged_fault(versions, other));
                    }
                    None => {
                        self.right_open = false;
                        continue;
                    }
                },
                else => return None,
            }

            match self.consistent_pair() {
                Some(pair) => return Some(LinkEvent::Value(pair)),
                None => trace!("joined inputs not yet consistent, waiting"),
            }
        }
    }
}

#[async_trait]
impl<A, B> InputLink<(Arc<A>, Arc<B>)> for SyncLink2<A, B>
where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
{
    async fn next_input(&mut self) -> Option<LinkEvent<(Arc<A>, Arc<B>)>> {
        self.recv_event().await
    }
}
