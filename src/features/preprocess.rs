//! Deterministic parsers for the raw housing columns.
//!
//! Three transforms, each replacing one source column with derived numeric
//! columns:
//!
//! - [`split_year_month`]: `"YYYY-MM"` strings into `year` / `month_num`
//! - [`extract_storey_range`]: `"<min> TO <max>"` strings into
//!   `storey_min` / `storey_max` / `storey_mean`
//! - [`parse_remaining_lease`]: free-text durations into `<column>_years`
//!
//! The first two are strict: one malformed row rejects the whole call and the
//! frame is left untouched. The lease parser is lenient: malformed cells fall
//! back to [`LEASE_SENTINEL`] silently. The asymmetry is intentional and
//! matches the upstream data contract.

use polars::prelude::*;

use crate::error::{FeatureError, Result};

use super::types::{LEASE_SENTINEL, StepOutcome};

/// Transform name reported by year-month failures and pipeline events.
pub const SPLIT_YEAR_MONTH: &str = "split_year_month";
/// Transform name reported by storey-range failures and pipeline events.
pub const EXTRACT_STOREY_RANGE: &str = "extract_storey_range";
/// Transform name reported by lease pipeline events.
pub const PARSE_REMAINING_LEASE: &str = "parse_remaining_lease";

fn strict(transform: &'static str, column: &str, detail: impl Into<String>) -> FeatureError {
    FeatureError::StrictFormat {
        transform,
        column: column.to_owned(),
        detail: detail.into(),
    }
}

/// Split a `"YYYY-MM"` string column into integer `year` and `month_num`
/// columns and drop the source column.
///
/// Null cells stay null in both derived columns. Any non-null cell that does
/// not match the format fails the whole call before a column is added.
pub fn split_year_month(df: &mut DataFrame, column: &str) -> Result<StepOutcome> {
    if df.column(column).is_err() {
        return Ok(StepOutcome::MissingColumn);
    }

    let series = df.column(column)?.as_materialized_series().clone();
    let ca = series.str().map_err(|_| {
        strict(
            SPLIT_YEAR_MONTH,
            column,
            format!("expected a string column, found {}", series.dtype()),
        )
    })?;

    let mut years: Vec<Option<i32>> = Vec::with_capacity(ca.len());
    let mut months: Vec<Option<i32>> = Vec::with_capacity(ca.len());
    for cell in ca.into_iter() {
        match cell {
            None => {
                years.push(None);
                months.push(None);
            }
            Some(raw) => {
                let (year, month) = parse_year_month(raw).ok_or_else(|| {
                    strict(
                        SPLIT_YEAR_MONTH,
                        column,
                        format!("value {raw:?} does not match YYYY-MM"),
                    )
                })?;
                years.push(Some(year));
                months.push(Some(month));
            }
        }
    }

    df.with_column(Series::new("year".into(), years))?;
    df.with_column(Series::new("month_num".into(), months))?;
    df.drop_in_place(column)?;
    Ok(StepOutcome::Applied)
}

fn parse_year_month(raw: &str) -> Option<(i32, i32)> {
    let (year, month) = raw.trim().split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<i32>().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Split a `"<min> TO <max>"` range column into `storey_min`, `storey_max`
/// and `storey_mean` columns and drop the source column.
///
/// Strict: any cell that fails to parse, including a null, rejects the whole
/// call and the frame keeps its original columns.
pub fn extract_storey_range(df: &mut DataFrame, column: &str) -> Result<StepOutcome> {
    if df.column(column).is_err() {
        return Ok(StepOutcome::MissingColumn);
    }

    let series = df.column(column)?.as_materialized_series().clone();
    let ca = series.str().map_err(|_| {
        strict(
            EXTRACT_STOREY_RANGE,
            column,
            format!("expected a string column, found {}", series.dtype()),
        )
    })?;

    let mut mins: Vec<i32> = Vec::with_capacity(ca.len());
    let mut maxs: Vec<i32> = Vec::with_capacity(ca.len());
    let mut means: Vec<f64> = Vec::with_capacity(ca.len());
    for cell in ca.into_iter() {
        let raw = cell.ok_or_else(|| {
            strict(EXTRACT_STOREY_RANGE, column, "missing value in range cell")
        })?;
        let (lo, hi) = parse_range(raw).ok_or_else(|| {
            strict(
                EXTRACT_STOREY_RANGE,
                column,
                format!("value {raw:?} does not match <min> TO <max>"),
            )
        })?;
        mins.push(lo);
        maxs.push(hi);
        means.push(f64::midpoint(f64::from(lo), f64::from(hi)));
    }

    df.with_column(Series::new("storey_min".into(), mins))?;
    df.with_column(Series::new("storey_max".into(), maxs))?;
    df.with_column(Series::new("storey_mean".into(), means))?;
    df.drop_in_place(column)?;
    Ok(StepOutcome::Applied)
}

fn parse_range(raw: &str) -> Option<(i32, i32)> {
    let (lo, hi) = raw.split_once(" TO ")?;
    let lo = lo.trim().parse::<i32>().ok()?;
    let hi = hi.trim().parse::<i32>().ok()?;
    Some((lo, hi))
}

/// Convert a lease-duration column into a float `<column>_years` column and
/// drop the source column.
///
/// Per cell: missing becomes [`LEASE_SENTINEL`]; numeric values cast to
/// float unchanged; text like `"61 years 04 months"` or `"5 months"` becomes
/// `years + months / 12` rounded to two decimals; anything else becomes the
/// sentinel without raising an error.
pub fn parse_remaining_lease(df: &mut DataFrame, column: &str) -> Result<StepOutcome> {
    if df.column(column).is_err() {
        return Ok(StepOutcome::MissingColumn);
    }

    let series = df.column(column)?.as_materialized_series().clone();
    let dtype = series.dtype();

    let values: Vec<f64> = if dtype.is_integer() || dtype.is_float() {
        let casted = series.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        ca.into_iter()
            .map(|cell| cell.unwrap_or(LEASE_SENTINEL))
            .collect()
    } else if matches!(dtype, DataType::String) {
        let ca = series.str()?;
        ca.into_iter()
            .map(|cell| cell.map_or(LEASE_SENTINEL, parse_lease_text))
            .collect()
    } else {
        // a column that is neither numeric nor text has nothing to parse
        vec![LEASE_SENTINEL; series.len()]
    };

    let new_name = format!("{column}_years");
    df.with_column(Series::new(new_name.into(), values))?;
    df.drop_in_place(column)?;
    Ok(StepOutcome::Applied)
}

fn parse_lease_text(raw: &str) -> f64 {
    let years: i64;
    let mut months: i64 = 0;

    if let Some(pos) = raw.find("year") {
        let prefix = &raw[..pos];
        let rest = &raw[pos + "year".len()..];
        years = match prefix.trim().parse() {
            Ok(v) => v,
            Err(_) => return LEASE_SENTINEL,
        };
        if rest.contains("month") {
            let month_part = rest.split("month").next().unwrap_or("");
            months = match collect_digits(month_part) {
                Some(v) => v,
                None => return LEASE_SENTINEL,
            };
        }
    } else if raw.contains("month") {
        years = 0;
        months = match collect_digits(raw) {
            Some(v) => v,
            None => return LEASE_SENTINEL,
        };
    } else {
        return LEASE_SENTINEL;
    }

    round2(years as f64 + months as f64 / 12.0)
}

fn collect_digits(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
