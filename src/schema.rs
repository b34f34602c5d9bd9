//! Schema declaration for the feature-store ingestion boundary.
//!
//! The downstream store accepts the pipeline's output frame together with a
//! declaration of the numeric fields it should expect, joined on an entity
//! key and an event-timestamp column both supplied by the caller. This
//! module only declares and checks that shape; storage and retrieval are the
//! consumer's problem.

use anyhow::Context as _;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};
use crate::features::is_numeric_dtype;

/// Numeric kind of a declared feature field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Int,
    Float,
}

impl FeatureKind {
    fn matches(self, dtype: &DataType) -> bool {
        match self {
            Self::Int => dtype.is_integer(),
            Self::Float => dtype.is_float(),
        }
    }
}

/// A single feature column the downstream store expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureField {
    pub name: String,
    pub kind: FeatureKind,
}

/// Declares the frame handed to the feature store: entity key,
/// event-timestamp column, and the numeric feature fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Join key identifying the entity each row describes.
    pub entity_key: String,
    /// Event-timestamp column used for point-in-time retrieval downstream.
    pub timestamp_column: String,
    /// Declared numeric feature columns.
    pub fields: Vec<FeatureField>,
}

impl FeatureSchema {
    pub fn new(entity_key: impl Into<String>, timestamp_column: impl Into<String>) -> Self {
        Self {
            entity_key: entity_key.into(),
            timestamp_column: timestamp_column.into(),
            fields: Vec::new(),
        }
    }

    /// Append a declared field (builder style).
    pub fn field(mut self, name: impl Into<String>, kind: FeatureKind) -> Self {
        self.fields.push(FeatureField {
            name: name.into(),
            kind,
        });
        self
    }

    /// The housing feature view produced by the default pipeline with
    /// frequency encoding: derived temporal, storey, and lease columns,
    /// the raw numeric passthroughs, and the frequency-encoded categoricals.
    pub fn house_features() -> Self {
        Self::new("house_id", "event_timestamp")
            .field("year", FeatureKind::Int)
            .field("month_num", FeatureKind::Int)
            .field("storey_min", FeatureKind::Int)
            .field("storey_max", FeatureKind::Int)
            .field("storey_mean", FeatureKind::Float)
            .field("floor_area_sqm", FeatureKind::Float)
            .field("lease_commence_date", FeatureKind::Int)
            .field("remaining_lease_years", FeatureKind::Float)
            .field("town_freq", FeatureKind::Float)
            .field("flat_type_freq", FeatureKind::Float)
            .field("block_freq", FeatureKind::Float)
            .field("street_name_freq", FeatureKind::Float)
            .field("flat_model_freq", FeatureKind::Float)
    }

    /// Infer a schema from a frame's numeric columns. The entity key and
    /// timestamp column are excluded from the field list when present.
    pub fn infer(
        df: &DataFrame,
        entity_key: impl Into<String>,
        timestamp_column: impl Into<String>,
    ) -> Self {
        let mut schema = Self::new(entity_key, timestamp_column);
        for col in df.get_columns() {
            let name = col.name().as_str();
            if name == schema.entity_key || name == schema.timestamp_column {
                continue;
            }
            let dtype = col.dtype();
            if dtype.is_integer() {
                schema.fields.push(FeatureField {
                    name: name.to_owned(),
                    kind: FeatureKind::Int,
                });
            } else if dtype.is_float() {
                schema.fields.push(FeatureField {
                    name: name.to_owned(),
                    kind: FeatureKind::Float,
                });
            }
        }
        schema
    }

    /// Check that `df` carries every declared field with a matching numeric
    /// dtype. Columns beyond the declared fields are allowed; the entity key
    /// and timestamp column are not checked because the caller joins them in
    /// after feature engineering.
    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        for field in &self.fields {
            let col = df.column(&field.name).map_err(|_| {
                FeatureError::Schema(format!("declared field '{}' is missing", field.name))
            })?;
            let dtype = col.dtype();
            if !is_numeric_dtype(dtype) || !field.kind.matches(dtype) {
                return Err(FeatureError::Schema(format!(
                    "field '{}' declared {:?} but the frame has {dtype}",
                    field.name, field.kind
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize feature schema")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize feature schema")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_matching_frame() -> anyhow::Result<()> {
        let df = df!(
            "year" => &[2017i32, 2017],
            "storey_mean" => &[8.0, 11.0],
        )?;
        let schema = FeatureSchema::new("house_id", "event_timestamp")
            .field("year", FeatureKind::Int)
            .field("storey_mean", FeatureKind::Float);
        schema.validate(&df)?;
        Ok(())
    }

    #[test]
    fn validate_rejects_missing_field() -> anyhow::Result<()> {
        let df = df!("year" => &[2017i32])?;
        let schema =
            FeatureSchema::new("house_id", "event_timestamp").field("town_freq", FeatureKind::Float);
        let err = schema.validate(&df).unwrap_err();
        assert!(err.to_string().contains("town_freq"));
        Ok(())
    }

    #[test]
    fn validate_rejects_kind_mismatch() -> anyhow::Result<()> {
        let df = df!("year" => &["2017", "2018"])?;
        let schema =
            FeatureSchema::new("house_id", "event_timestamp").field("year", FeatureKind::Int);
        assert!(schema.validate(&df).is_err());
        Ok(())
    }

    #[test]
    fn infer_skips_key_and_timestamp() -> anyhow::Result<()> {
        let df = df!(
            "house_id" => &[1i64, 2],
            "storey_mean" => &[8.0, 11.0],
            "town" => &["BEDOK", "PUNGGOL"],
        )?;
        let schema = FeatureSchema::infer(&df, "house_id", "event_timestamp");
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].name, "storey_mean");
        assert_eq!(schema.fields[0].kind, FeatureKind::Float);
        Ok(())
    }

    #[test]
    fn json_round_trip() -> anyhow::Result<()> {
        let schema = FeatureSchema::house_features();
        let json = schema.to_json()?;
        let back = FeatureSchema::from_json(&json)?;
        assert_eq!(schema, back);
        Ok(())
    }
}
