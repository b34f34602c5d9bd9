//! Shared types and constants for the feature transforms.

use serde::{Deserialize, Serialize};

/// Sentinel substituted for missing or unparseable lease durations.
pub const LEASE_SENTINEL: f64 = -1000.0;

/// Default rarity threshold below which categories pool into the catch-all
/// bucket.
pub const DEFAULT_RARITY_THRESHOLD: f64 = 0.05;

/// Catch-all bucket label for rare categories.
pub const RARE_BUCKET: &str = "Other";

/// What a single transform call did to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The transform ran and the column set changed.
    Applied,
    /// The target column was absent; the frame is untouched.
    MissingColumn,
}

/// Encoder applied to the categorical columns left after preprocessing.
///
/// Exactly one of the two runs per pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EncoderStrategy {
    /// Replace each categorical column with its bucketed value frequency.
    Frequency {
        /// Categories below this share of rows pool into [`RARE_BUCKET`].
        threshold: f64,
    },
    /// Expand each categorical column into 0/1 indicators, dropping the
    /// first level in sorted order as the reference.
    OneHot,
}

impl Default for EncoderStrategy {
    fn default() -> Self {
        Self::Frequency {
            threshold: DEFAULT_RARITY_THRESHOLD,
        }
    }
}

/// Events the orchestrator reports while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A transform ran and replaced its source column.
    Applied {
        step: &'static str,
        column: String,
    },
    /// The target column was absent and the transform was skipped.
    Skipped {
        step: &'static str,
        column: String,
    },
    /// A strict transform rejected its input; the column is unmodified and
    /// the pipeline carried on.
    Failed {
        step: &'static str,
        column: String,
        detail: String,
    },
    /// The selected encoder replaced the categorical columns.
    Encoded {
        step: &'static str,
        columns: Vec<String>,
    },
    /// There were no categorical columns left to encode.
    NoCategoricalColumns,
}
