//! Frame inspection: shape, dtypes, and missing-value percentages.

use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::ingest::SOURCE_FILE_COLUMN;

/// Snapshot of a frame's shape and missingness.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub rows: usize,
    pub columns: usize,
    /// Column name and dtype name, in frame order.
    pub dtypes: Vec<(String, String)>,
    /// Percentage of null cells per column, in frame order.
    pub null_percentages: Vec<(String, f64)>,
    /// Null percentages per column, grouped by source file. `None` when the
    /// frame has no `source_file` column.
    pub nulls_by_source_file: Option<BTreeMap<String, Vec<(String, f64)>>>,
}

/// Percentage of null cells per column. An empty frame reports 0.0 for
/// every column.
pub fn null_percentages(df: &DataFrame) -> Vec<(String, f64)> {
    let rows = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let pct = if rows == 0 {
                0.0
            } else {
                col.null_count() as f64 / rows as f64 * 100.0
            };
            (col.name().to_string(), pct)
        })
        .collect()
}

/// Null percentages per column for each distinct `source_file` value.
/// Returns `None` (with a warning) when the column is absent.
pub fn nulls_by_source_file(
    df: &DataFrame,
) -> Result<Option<BTreeMap<String, Vec<(String, f64)>>>> {
    if df.column(SOURCE_FILE_COLUMN).is_err() {
        tracing::warn!(
            column = SOURCE_FILE_COLUMN,
            "column not found for per-file null analysis"
        );
        return Ok(None);
    }

    let series = df
        .column(SOURCE_FILE_COLUMN)?
        .as_materialized_series()
        .clone();
    let ca = series.str()?;

    let files: BTreeSet<String> = ca.into_iter().flatten().map(str::to_owned).collect();
    let mut result = BTreeMap::new();
    for file in files {
        let mask: BooleanChunked = ca
            .into_iter()
            .map(|cell| cell == Some(file.as_str()))
            .collect();
        let group = df.filter(&mask)?;
        result.insert(file, null_percentages(&group));
    }
    Ok(Some(result))
}

/// Run the full inspection and log a summary.
pub fn inspect(df: &DataFrame) -> Result<InspectionReport> {
    let dtypes = df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.dtype().to_string()))
        .collect();

    let report = InspectionReport {
        rows: df.height(),
        columns: df.width(),
        dtypes,
        null_percentages: null_percentages(df),
        nulls_by_source_file: nulls_by_source_file(df)?,
    };

    tracing::info!(
        rows = report.rows,
        columns = report.columns,
        "inspected frame"
    );
    for (name, pct) in &report.null_percentages {
        if *pct > 0.0 {
            tracing::info!(column = name.as_str(), null_pct = pct, "column has nulls");
        }
    }
    Ok(report)
}
