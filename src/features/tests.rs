#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use anyhow::Result;
use polars::prelude::*;

use super::classify::identify_columns;

mod encode;

#[test]
fn partition_is_disjoint_and_exhaustive() -> Result<()> {
    let df = df!(
        "floor_area_sqm" => &[44.0, 67.0, 82.0],
        "lease_commence_date" => &[1979i64, 1984, 1990],
        "town" => &["BEDOK", "PUNGGOL", "BEDOK"],
        "is_resale" => &[true, true, false],
    )?;

    let (numeric, categorical) = identify_columns(&df);

    assert_eq!(numeric, vec!["floor_area_sqm", "lease_commence_date"]);
    assert_eq!(categorical, vec!["town"]);
    // boolean columns belong to neither set
    assert!(!numeric.contains(&"is_resale".to_owned()));
    assert!(!categorical.contains(&"is_resale".to_owned()));
    Ok(())
}

#[test]
fn partition_of_empty_frame_is_empty() -> Result<()> {
    let df = DataFrame::empty();
    let (numeric, categorical) = identify_columns(&df);
    assert!(numeric.is_empty());
    assert!(categorical.is_empty());
    Ok(())
}

#[test]
fn classification_is_a_pure_query() -> Result<()> {
    let df = df!(
        "price" => &[232000.0, 250000.0],
        "town" => &["BEDOK", "PUNGGOL"],
    )?;
    let before = df.clone();
    let _ = identify_columns(&df);
    assert!(df.equals_missing(&before));
    Ok(())
}
