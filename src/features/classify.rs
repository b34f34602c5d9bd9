//! Column kind partitioning.

use polars::prelude::*;

/// Returns true for the integer and float dtypes this crate treats as
/// numeric features.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Split a frame's column names into numeric and categorical (string) sets.
///
/// The two lists are disjoint and together cover exactly the frame's numeric
/// and string columns. Other dtypes (boolean, temporal, nested) belong to
/// neither. Pure query, no mutation.
pub fn identify_columns(df: &DataFrame) -> (Vec<String>, Vec<String>) {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();

    for col in df.get_columns() {
        let dtype = col.dtype();
        if is_numeric_dtype(dtype) {
            numeric.push(col.name().to_string());
        } else if matches!(dtype, DataType::String) {
            categorical.push(col.name().to_string());
        }
    }

    (numeric, categorical)
}
