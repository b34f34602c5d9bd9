//! Fixed-order orchestration of the feature transforms.

use polars::prelude::*;

use crate::error::{FeatureError, Result};

use super::classify;
use super::encode;
use super::preprocess;
use super::types::{EncoderStrategy, PipelineEvent, StepOutcome};

/// Receives skip/fail/apply events while the pipeline runs.
///
/// Diagnostics are decoupled from the transforms themselves: the transforms
/// report outcomes, the orchestrator turns them into events, and the
/// observer decides what to do with them.
pub trait PipelineObserver {
    /// Called once per event, in pipeline order.
    fn on_event(&mut self, event: &PipelineEvent);
}

/// Default observer: forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Applied { step, column } => {
                tracing::info!(step = *step, column = column.as_str(), "transform applied");
            }
            PipelineEvent::Skipped { step, column } => {
                tracing::warn!(
                    step = *step,
                    column = column.as_str(),
                    "column not found, transform skipped"
                );
            }
            PipelineEvent::Failed {
                step,
                column,
                detail,
            } => {
                tracing::error!(
                    step = *step,
                    column = column.as_str(),
                    detail = detail.as_str(),
                    "transform failed, column left unmodified"
                );
            }
            PipelineEvent::Encoded { step, columns } => {
                tracing::info!(step = *step, ?columns, "categorical columns encoded");
            }
            PipelineEvent::NoCategoricalColumns => {
                tracing::info!("no categorical columns found for encoding");
            }
        }
    }
}

/// Runs the feature transforms over one frame in a fixed order:
/// year-month split, storey-range extraction, lease parsing, then exactly
/// one of the two categorical encoders.
///
/// Column names and the encoder are configurable through the builder
/// methods; the defaults match the raw housing transaction layout.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    month_column: String,
    storey_column: String,
    lease_column: String,
    encoder: EncoderStrategy,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self {
            month_column: "month".to_owned(),
            storey_column: "storey_range".to_owned(),
            lease_column: "remaining_lease".to_owned(),
            encoder: EncoderStrategy::default(),
        }
    }
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month_column(mut self, name: impl Into<String>) -> Self {
        self.month_column = name.into();
        self
    }

    pub fn with_storey_column(mut self, name: impl Into<String>) -> Self {
        self.storey_column = name.into();
        self
    }

    pub fn with_lease_column(mut self, name: impl Into<String>) -> Self {
        self.lease_column = name.into();
        self
    }

    pub fn with_encoder(mut self, encoder: EncoderStrategy) -> Self {
        self.encoder = encoder;
        self
    }

    /// Run the pipeline, logging events through [`TracingObserver`].
    pub fn run(&self, df: DataFrame) -> Result<DataFrame> {
        self.run_observed(df, &mut TracingObserver)
    }

    /// Run the pipeline, reporting every skip/fail/apply event to `observer`.
    ///
    /// A malformed year-month cell aborts the run with a
    /// [`FeatureError::StrictFormat`] naming the transform and column. A
    /// malformed storey range is recoverable: the source column stays in
    /// place, the observer sees a [`PipelineEvent::Failed`], and the
    /// remaining steps still run.
    pub fn run_observed(
        &self,
        mut df: DataFrame,
        observer: &mut dyn PipelineObserver,
    ) -> Result<DataFrame> {
        let rows = df.height();

        let outcome = preprocess::split_year_month(&mut df, &self.month_column)?;
        notify(observer, preprocess::SPLIT_YEAR_MONTH, &self.month_column, outcome);

        match preprocess::extract_storey_range(&mut df, &self.storey_column) {
            Ok(outcome) => notify(
                observer,
                preprocess::EXTRACT_STOREY_RANGE,
                &self.storey_column,
                outcome,
            ),
            Err(FeatureError::StrictFormat {
                transform,
                column,
                detail,
            }) => {
                observer.on_event(&PipelineEvent::Failed {
                    step: transform,
                    column,
                    detail,
                });
            }
            Err(e) => return Err(e),
        }

        let outcome = preprocess::parse_remaining_lease(&mut df, &self.lease_column)?;
        notify(
            observer,
            preprocess::PARSE_REMAINING_LEASE,
            &self.lease_column,
            outcome,
        );

        let (_, categorical) = classify::identify_columns(&df);
        if categorical.is_empty() {
            observer.on_event(&PipelineEvent::NoCategoricalColumns);
        } else {
            let (step, columns) = match self.encoder {
                EncoderStrategy::Frequency { threshold } => (
                    encode::FREQUENCY_ENCODE,
                    encode::frequency_encode_all(&mut df, threshold)?,
                ),
                EncoderStrategy::OneHot => {
                    (encode::ONE_HOT_ENCODE, encode::one_hot_encode_all(&mut df)?)
                }
            };
            observer.on_event(&PipelineEvent::Encoded { step, columns });
        }

        debug_assert_eq!(df.height(), rows, "transforms must not change the row count");
        Ok(df)
    }
}

fn notify(
    observer: &mut dyn PipelineObserver,
    step: &'static str,
    column: &str,
    outcome: StepOutcome,
) {
    let event = match outcome {
        StepOutcome::Applied => PipelineEvent::Applied {
            step,
            column: column.to_owned(),
        },
        StepOutcome::MissingColumn => PipelineEvent::Skipped {
            step,
            column: column.to_owned(),
        },
    };
    observer.on_event(&event);
}
