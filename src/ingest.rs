//! Raw table ingestion.
//!
//! Loads one data file, or every data file in a directory, into a single
//! frame. Directory loads tag each row with the file it came from so
//! downstream inspection can attribute missing values per source. Archive
//! extraction is the caller's job; this layer only sees the extracted files.

use anyhow::{Context as _, Result, bail};
use polars::prelude::*;
use std::path::Path;

/// Column tagging each row with the file it was loaded from.
pub const SOURCE_FILE_COLUMN: &str = "source_file";

/// Load a single CSV or Parquet file into a frame, dispatching on the file
/// extension.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10_000))
            .with_has_header(true)
            .finish()?
            .collect()
            .context("Failed to read CSV")?,
        "parquet" => ParquetReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read Parquet")?,
        _ => bail!("Unsupported file extension: {ext}"),
    };

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded data file"
    );
    Ok(df)
}

/// Load every supported file in `dir` and vertically concatenate them into
/// one frame, adding a [`SOURCE_FILE_COLUMN`] with the originating file name.
///
/// Files are read in sorted path order so repeated loads produce the same
/// row order. All files must share one column layout. Errors when the
/// directory holds no supported files.
pub fn load_directory(dir: &Path) -> Result<DataFrame> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|s| s.to_str()),
                Some("csv" | "parquet")
            )
        })
        .collect();
    paths.sort();

    let mut combined: Option<DataFrame> = None;
    for path in &paths {
        let mut df = load_table(path)?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_owned();
        let tags = vec![file_name; df.height()];
        df.with_column(Series::new(SOURCE_FILE_COLUMN.into(), tags))?;

        combined = Some(match combined {
            None => df,
            Some(acc) => acc
                .vstack(&df)
                .context("Failed to concatenate data files")?,
        });
    }

    let combined = combined
        .with_context(|| format!("No supported data files found in {}", dir.display()))?;
    tracing::info!(
        dir = %dir.display(),
        files = paths.len(),
        rows = combined.height(),
        "loaded data directory"
    );
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_table(Path::new("data/resale.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn empty_directory_is_an_error() -> Result<()> {
        let dir = std::env::temp_dir().join("maisonette-empty-ingest-test");
        std::fs::create_dir_all(&dir)?;
        let err = load_directory(&dir).unwrap_err();
        assert!(err.to_string().contains("No supported data files"));
        Ok(())
    }
}
