//! Error types for the feature pipeline.
//!
//! Strict parse failures carry the transform name and the offending column so
//! callers can report exactly which step did not apply. Non-error outcomes
//! (a missing target column, an empty categorical set) are deliberately not
//! represented here; they are reported through
//! [`StepOutcome`](crate::features::StepOutcome) and the pipeline observer.

use std::fmt;

/// Main error type for maisonette operations.
#[derive(Debug)]
pub enum FeatureError {
    /// A row violated a strict parse contract. The transform did not apply
    /// and the frame was left unmodified.
    StrictFormat {
        /// Name of the transform that rejected the input.
        transform: &'static str,
        /// Column the transform was invoked against.
        column: String,
        /// What the offending cell looked like.
        detail: String,
    },

    /// A frame does not satisfy a declared feature schema.
    Schema(String),

    /// Underlying polars failure (column insertion, casting, filtering).
    Polars(polars::error::PolarsError),

    /// I/O errors from file-backed operations.
    Io(std::io::Error),

    /// Generic error with context.
    Other(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrictFormat {
                transform,
                column,
                detail,
            } => write!(f, "{transform} failed on column '{column}': {detail}"),
            Self::Schema(msg) => write!(f, "Schema mismatch: {msg}"),
            Self::Polars(e) => write!(f, "Data processing error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FeatureError {}

impl From<polars::error::PolarsError> for FeatureError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Polars(err)
    }
}

impl From<std::io::Error> for FeatureError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for FeatureError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Result type alias for maisonette operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
