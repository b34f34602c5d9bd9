//! # Maisonette - Housing Feature Engineering
//!
//! Maisonette turns raw housing resale transaction tables into model-ready
//! numeric feature tables: date strings become integer components, range
//! strings become min/max/mean columns, free-text lease durations become
//! float years, and categorical labels become frequency or one-hot
//! encodings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use maisonette::features::{EncoderStrategy, FeaturePipeline};
//! use maisonette::ingest;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let raw = ingest::load_directory(Path::new("data"))?;
//! let features = FeaturePipeline::new()
//!     .with_encoder(EncoderStrategy::Frequency { threshold: 0.05 })
//!     .run(raw)?;
//! println!("{} feature columns", features.width());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`features`]: the transform pipeline (classification, parsing, encoding)
//! - [`ingest`]: CSV/Parquet loading and multi-file concatenation
//! - [`inspect`]: shape, dtype, and missing-value reporting
//! - [`schema`]: feature-schema declaration for the downstream store
//! - [`error`]: error types and the crate `Result` alias
//! - [`logging`]: console + rolling-file tracing setup
//!
//! Transforms are synchronous and single-threaded; a frame is threaded
//! through the pipeline by value and comes back in its new state. Strict
//! parsers (year-month, storey range) reject a whole call on any malformed
//! row; the lease parser substitutes a sentinel per bad cell instead. That
//! asymmetry mirrors the upstream data contract.

#![warn(clippy::all, rust_2018_idioms)]

pub mod error;
pub mod features;
pub mod ingest;
pub mod inspect;
pub mod logging;
pub mod schema;

pub use error::{FeatureError, Result};
pub use features::{EncoderStrategy, FeaturePipeline};
pub use schema::{FeatureKind, FeatureSchema};
