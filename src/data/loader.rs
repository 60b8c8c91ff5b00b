//! CSV Data Loader Module
//! Reads the day-level rental table using Polars.

use polars::prelude::*;
use thiserror::Error;

/// Relative path of the rental dataset read once at startup.
pub const DATA_FILE: &str = "data/day.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Loads the comma-delimited day-level file with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file with a header row and materialize the full table.
    /// No retry and no schema validation; any read failure propagates.
    pub fn load_csv(file_path: &str) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!(
            "loaded {}: {} rows, {} columns",
            file_path,
            df.height(),
            df.width()
        );

        Ok(df)
    }
}
