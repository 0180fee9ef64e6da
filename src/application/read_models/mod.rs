//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of assets snapshots for reports.

pub mod assets_read_model;
pub mod assets_read_model_builder;
pub mod target_view;

pub use assets_read_model::{AssetsReadModel, ReportMetadataView};
pub use assets_read_model_builder::{AssetsReadModelBuilder, ReadModelOptions};
pub use target_view::{DiagnosticView, LibraryView, TargetView};
