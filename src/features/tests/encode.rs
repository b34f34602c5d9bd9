use anyhow::Result;
use polars::prelude::*;

use crate::features::encode::{
    frequency_encode, frequency_encode_all, one_hot_encode, one_hot_encode_all,
};
use crate::features::types::StepOutcome;

fn column_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series().clone();
    Ok(series.f64()?.into_iter().collect())
}

fn column_i32(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let series = df.column(name)?.as_materialized_series().clone();
    Ok(series.i32()?.into_iter().collect())
}

#[test]
fn frequency_pools_rare_categories_before_recomputing() -> Result<()> {
    // 50 rows: A x30 (0.60), B x16 (0.32), X x2 (0.04), Y x2 (0.04).
    // X and Y fall below 0.05 and pool into "Other" with frequency 0.08.
    let mut values = Vec::new();
    values.extend(std::iter::repeat_n("A", 30));
    values.extend(std::iter::repeat_n("B", 16));
    values.extend(std::iter::repeat_n("X", 2));
    values.extend(std::iter::repeat_n("Y", 2));
    let mut df = df!("town" => &values)?;

    let outcome = frequency_encode(&mut df, "town", 0.05)?;

    assert_eq!(outcome, StepOutcome::Applied);
    assert!(df.column("town").is_err());
    let freqs = column_f64(&df, "town_freq")?;
    assert_eq!(freqs[0], Some(0.6));
    assert_eq!(freqs[30], Some(0.32));
    // the pooled bucket frequency, not the individual 0.04
    assert_eq!(freqs[46], Some(0.08));
    assert_eq!(freqs[48], Some(0.08));
    Ok(())
}

#[test]
fn frequency_merges_rare_values_into_existing_other() -> Result<()> {
    // 25 rows: Other x12, A x12, X x1. X (0.04) joins the literal "Other"
    // category, so both report the combined 13/25 frequency.
    let mut values = Vec::new();
    values.extend(std::iter::repeat_n("Other", 12));
    values.extend(std::iter::repeat_n("A", 12));
    values.push("X");
    let mut df = df!("flat_model" => &values)?;

    frequency_encode(&mut df, "flat_model", 0.05)?;

    let freqs = column_f64(&df, "flat_model_freq")?;
    assert_eq!(freqs[0], Some(0.52));
    assert_eq!(freqs[24], Some(0.52));
    assert_eq!(freqs[12], Some(0.48));
    Ok(())
}

#[test]
fn frequency_keeps_nulls_null() -> Result<()> {
    let mut df = df!("town" => &[Some("A"), Some("A"), None, Some("B")])?;
    frequency_encode(&mut df, "town", 0.05)?;

    let freqs = column_f64(&df, "town_freq")?;
    // frequencies are over the 3 observed values, not the 4 rows
    assert_eq!(freqs[0], Some(2.0 / 3.0));
    assert_eq!(freqs[2], None);
    assert_eq!(freqs[3], Some(1.0 / 3.0));
    Ok(())
}

#[test]
fn frequency_encoding_is_deterministic() -> Result<()> {
    let df = df!(
        "town" => &["BEDOK", "PUNGGOL", "BEDOK", "YISHUN", "BEDOK"],
        "flat_type" => &["3 ROOM", "4 ROOM", "4 ROOM", "3 ROOM", "5 ROOM"],
    )?;

    let mut first = df.clone();
    let mut second = df.clone();
    frequency_encode_all(&mut first, 0.05)?;
    frequency_encode_all(&mut second, 0.05)?;

    assert!(first.equals_missing(&second));
    Ok(())
}

#[test]
fn frequency_encode_all_covers_every_categorical_column() -> Result<()> {
    let mut df = df!(
        "town" => &["BEDOK", "PUNGGOL"],
        "floor_area_sqm" => &[44.0, 67.0],
        "flat_type" => &["3 ROOM", "4 ROOM"],
    )?;

    let encoded = frequency_encode_all(&mut df, 0.05)?;

    assert_eq!(encoded, vec!["town_freq", "flat_type_freq"]);
    assert!(df.column("town").is_err());
    assert!(df.column("flat_type").is_err());
    // numeric columns are untouched
    assert!(df.column("floor_area_sqm").is_ok());
    Ok(())
}

#[test]
fn one_hot_drops_first_sorted_level() -> Result<()> {
    let mut df = df!("fruit" => &["B", "A", "C", "A"])?;

    let outcome = one_hot_encode(&mut df, "fruit")?;

    assert_eq!(outcome, StepOutcome::Applied);
    assert!(df.column("fruit").is_err());
    // reference level "A" (first in sorted order) gets no indicator
    assert!(df.column("fruit_A").is_err());

    let b = column_i32(&df, "fruit_B")?;
    let c = column_i32(&df, "fruit_C")?;
    assert_eq!(b, vec![Some(1), Some(0), Some(0), Some(0)]);
    assert_eq!(c, vec![Some(0), Some(0), Some(1), Some(0)]);

    // at most one indicator per row; all-zero means the reference level
    for row in 0..df.height() {
        let set = i64::from(b[row] == Some(1)) + i64::from(c[row] == Some(1));
        assert!(set <= 1, "row {row} has {set} indicators set");
    }
    Ok(())
}

#[test]
fn one_hot_null_rows_are_all_zero() -> Result<()> {
    let mut df = df!("fruit" => &[Some("A"), None, Some("B")])?;
    one_hot_encode(&mut df, "fruit")?;

    let b = column_i32(&df, "fruit_B")?;
    assert_eq!(b, vec![Some(0), Some(0), Some(1)]);
    Ok(())
}

#[test]
fn one_hot_without_categorical_columns_is_noop() -> Result<()> {
    let mut df = df!("floor_area_sqm" => &[44.0, 67.0])?;
    let before = df.clone();

    let encoded = one_hot_encode_all(&mut df)?;

    assert!(encoded.is_empty());
    assert!(df.equals_missing(&before));
    Ok(())
}

#[test]
fn one_hot_all_reports_indicator_names() -> Result<()> {
    let mut df = df!(
        "town" => &["BEDOK", "PUNGGOL", "YISHUN"],
        "flat_type" => &["3 ROOM", "4 ROOM", "3 ROOM"],
    )?;

    let encoded = one_hot_encode_all(&mut df)?;

    assert_eq!(
        encoded,
        vec!["town_PUNGGOL", "town_YISHUN", "flat_type_4 ROOM"]
    );
    Ok(())
}
