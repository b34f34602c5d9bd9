//! Categorical encoders.
//!
//! Two mutually exclusive strategies for the categorical columns that survive
//! preprocessing: frequency encoding with rare-category pooling, and one-hot
//! expansion with a dropped reference level. Both are deterministic for a
//! given input; counting runs over ordered maps so repeated runs produce
//! identical frames.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;

use crate::error::{FeatureError, Result};

use super::classify::identify_columns;
use super::types::{RARE_BUCKET, StepOutcome};

/// Transform name reported by frequency-encoding pipeline events.
pub const FREQUENCY_ENCODE: &str = "frequency_encode";
/// Transform name reported by one-hot pipeline events.
pub const ONE_HOT_ENCODE: &str = "one_hot_encode";

fn require_string<'a>(
    transform: &'static str,
    column: &str,
    series: &'a Series,
) -> Result<&'a StringChunked> {
    series.str().map_err(|_| {
        FeatureError::Other(format!(
            "{transform} requires a string column, '{column}' is {}",
            series.dtype()
        ))
    })
}

/// Replace a categorical column with its per-row value frequency.
///
/// Value frequencies are computed over non-null cells. Categories whose
/// frequency falls below `threshold` are relabeled to [`RARE_BUCKET`] and the
/// frequencies recomputed, so each former rare value maps to the pooled
/// bucket frequency. The result lands in `<column>_freq` (null cells stay
/// null) and the source column is dropped.
pub fn frequency_encode(df: &mut DataFrame, column: &str, threshold: f64) -> Result<StepOutcome> {
    if df.column(column).is_err() {
        return Ok(StepOutcome::MissingColumn);
    }

    let series = df.column(column)?.as_materialized_series().clone();
    let ca = require_string(FREQUENCY_ENCODE, column, &series)?;

    let total = (ca.len() - ca.null_count()) as f64;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for cell in ca.into_iter().flatten() {
        *counts.entry(cell).or_insert(0) += 1;
    }

    // Pool rare categories into the catch-all bucket, then recount so the
    // bucket carries the combined frequency.
    let mut bucketed: BTreeMap<&str, usize> = BTreeMap::new();
    for (&value, &count) in &counts {
        let key = if (count as f64) / total < threshold {
            RARE_BUCKET
        } else {
            value
        };
        *bucketed.entry(key).or_insert(0) += count;
    }

    let values: Vec<Option<f64>> = ca
        .into_iter()
        .map(|cell| {
            cell.map(|value| {
                let count = counts.get(value).copied().unwrap_or(0);
                let key = if (count as f64) / total < threshold {
                    RARE_BUCKET
                } else {
                    value
                };
                bucketed.get(key).copied().unwrap_or(0) as f64 / total
            })
        })
        .collect();

    let new_name = format!("{column}_freq");
    df.with_column(Series::new(new_name.into(), values))?;
    df.drop_in_place(column)?;
    Ok(StepOutcome::Applied)
}

/// Frequency-encode every categorical column in the frame.
///
/// Returns the names of the `_freq` columns added; empty when the frame has
/// no categorical columns (explicit no-op).
pub fn frequency_encode_all(df: &mut DataFrame, threshold: f64) -> Result<Vec<String>> {
    let (_, categorical) = identify_columns(df);
    let mut encoded = Vec::with_capacity(categorical.len());
    for column in &categorical {
        frequency_encode(df, column, threshold)?;
        encoded.push(format!("{column}_freq"));
    }
    Ok(encoded)
}

/// One-hot encode a categorical column, dropping the first level in sorted
/// order as the reference.
///
/// Each remaining distinct value becomes a 0/1 indicator column named
/// `<column>_<value>`; null cells produce an all-zero row. The source column
/// is dropped.
pub fn one_hot_encode(df: &mut DataFrame, column: &str) -> Result<StepOutcome> {
    if df.column(column).is_err() {
        return Ok(StepOutcome::MissingColumn);
    }

    let series = df.column(column)?.as_materialized_series().clone();
    let ca = require_string(ONE_HOT_ENCODE, column, &series)?;

    let levels: BTreeSet<&str> = ca.into_iter().flatten().collect();
    for level in levels.iter().skip(1) {
        let flags: Vec<i32> = ca
            .into_iter()
            .map(|cell| i32::from(cell == Some(*level)))
            .collect();
        let name = format!("{column}_{level}");
        df.with_column(Series::new(name.into(), flags))?;
    }

    df.drop_in_place(column)?;
    Ok(StepOutcome::Applied)
}

/// One-hot encode every categorical column in the frame.
///
/// Returns the indicator column names added; empty when the frame has no
/// categorical columns (explicit no-op).
pub fn one_hot_encode_all(df: &mut DataFrame) -> Result<Vec<String>> {
    let (_, categorical) = identify_columns(df);
    let before: BTreeSet<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for column in &categorical {
        one_hot_encode(df, column)?;
    }
    let encoded = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| !before.contains(name))
        .collect();
    Ok(encoded)
}
