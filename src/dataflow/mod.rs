//! Versioned push-based dataflow.
//!
//! A [`SourceBlock`] publishes [`VersionedValue`]s; consumers link to it and
//! receive every value exactly once, in version order. A
//! [`ChainedDataSource`] subscribes to one upstream source, or to two joined
//! through a [`SyncLink2`], transforms each input and republishes the result
//! carrying the union of the input version maps, so that its own consumers
//! can join against it consistently.
mod chained;
mod disposable;
mod join;
mod source_block;
mod versioned;

pub use chained::{transform_fn, ChainedDataSource, FnTransform, ProjectValueSource, Transform};
pub use disposable::{AbortOnDispose, Disposable, DisposableBag, DisposeAction};
pub use join::{InputLink, SyncLink2};
pub use source_block::{LinkEvent, SourceBlock, SourceLink, UpstreamJoin};
pub use versioned::{DataSourceVersion, SourceKey, VersionMap, VersionedValue};
