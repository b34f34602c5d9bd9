//! The feature-engineering pipeline: deterministic transforms from raw
//! housing transaction columns to model-ready numeric features.

pub mod classify;
pub mod encode;
pub mod pipeline;
pub mod preprocess;
pub mod types;

pub use classify::{identify_columns, is_numeric_dtype};
pub use encode::{frequency_encode, frequency_encode_all, one_hot_encode, one_hot_encode_all};
pub use pipeline::{FeaturePipeline, PipelineObserver, TracingObserver};
pub use preprocess::{extract_storey_range, parse_remaining_lease, split_year_month};
pub use types::{
    DEFAULT_RARITY_THRESHOLD, EncoderStrategy, LEASE_SENTINEL, PipelineEvent, RARE_BUCKET,
    StepOutcome,
};

#[cfg(test)]
mod tests;
