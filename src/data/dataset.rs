//! Typed rental table.
//! Materializes the day-level DataFrame into plain vectors for the analysis
//! layer, keeping the frame itself around for the preview grid.

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

use super::loader::{DataLoader, LoaderError};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column '{0}' contains a null value")]
    NullValue(&'static str),
    #[error("Invalid date '{0}' in 'dteday'")]
    InvalidDate(String),
}

/// Day-per-row rental table. Loaded once at startup and held read-only for
/// the lifetime of the process; every row carries a date, the casual and
/// registered rider counts, the total count, and the weather situation code.
pub struct BikeDataset {
    df: DataFrame,
    dates: Vec<NaiveDate>,
    casual: Vec<i64>,
    registered: Vec<i64>,
    cnt: Vec<i64>,
    weathersit: Vec<i64>,
}

impl BikeDataset {
    /// Load the table from a CSV file and materialize the typed columns.
    pub fn load(file_path: &str) -> Result<Self, DatasetError> {
        let df = DataLoader::load_csv(file_path)?;
        Self::from_dataframe(df)
    }

    /// Build the typed table from an already loaded DataFrame. A missing
    /// column, a null cell, or an unparseable date surfaces as an error.
    pub fn from_dataframe(df: DataFrame) -> Result<Self, DatasetError> {
        let dates = Self::date_column(&df, "dteday")?;
        let casual = Self::int_column(&df, "casual")?;
        let registered = Self::int_column(&df, "registered")?;
        let cnt = Self::int_column(&df, "cnt")?;
        let weathersit = Self::int_column(&df, "weathersit")?;

        Ok(Self {
            df,
            dates,
            casual,
            registered,
            cnt,
            weathersit,
        })
    }

    fn int_column(df: &DataFrame, name: &'static str) -> Result<Vec<i64>, DatasetError> {
        let col = df.column(name)?.cast(&DataType::Int64)?;
        let ca = col.i64()?;

        let mut values = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            values.push(v.ok_or(DatasetError::NullValue(name))?);
        }
        Ok(values)
    }

    fn date_column(df: &DataFrame, name: &'static str) -> Result<Vec<NaiveDate>, DatasetError> {
        let col = df.column(name)?.cast(&DataType::String)?;
        let ca = col.str()?;

        let mut dates = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            let raw = v.ok_or(DatasetError::NullValue(name))?;
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| DatasetError::InvalidDate(raw.to_string()))?;
            dates.push(parsed);
        }
        Ok(dates)
    }

    /// Number of rows (days) in the table.
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// First `rows` rows of the raw table, for the preview grid.
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.df.head(Some(rows))
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn casual(&self) -> &[i64] {
        &self.casual
    }

    pub fn registered(&self) -> &[i64] {
        &self.registered
    }

    pub fn cnt(&self) -> &[i64] {
        &self.cnt
    }

    pub fn weathersit(&self) -> &[i64] {
        &self.weathersit
    }
}

/// Human-readable label for a weather situation code (four ordinal levels,
/// clear to severe).
pub fn weather_label(code: i64) -> &'static str {
    match code {
        1 => "Clear / partly cloudy",
        2 => "Mist + cloudy",
        3 => "Light rain / snow",
        4 => "Heavy rain / snow",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "instant" => [1i64, 2, 3, 4],
            "dteday" => ["2011-01-01", "2011-01-02", "2011-01-03", "2011-01-04"],
            "weathersit" => [1i64, 2, 1, 3],
            "casual" => [331i64, 131, 120, 500],
            "registered" => [654i64, 670, 1229, 300],
            "cnt" => [985i64, 801, 1349, 800],
        )
        .unwrap()
    }

    #[test]
    fn materializes_all_rows_and_columns() {
        let ds = BikeDataset::from_dataframe(sample_df()).unwrap();

        assert_eq!(ds.height(), 4);
        assert_eq!(ds.dates()[0], NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(ds.casual(), &[331, 131, 120, 500]);
        assert_eq!(ds.registered(), &[654, 670, 1229, 300]);
        assert_eq!(ds.cnt(), &[985, 801, 1349, 800]);
        assert_eq!(ds.weathersit(), &[1, 2, 1, 3]);
    }

    #[test]
    fn keeps_extra_columns_in_preview() {
        let ds = BikeDataset::from_dataframe(sample_df()).unwrap();
        let preview = ds.preview(2);

        assert_eq!(preview.height(), 2);
        assert_eq!(preview.width(), 6);
    }

    #[test]
    fn missing_column_is_an_error() {
        let df = df!(
            "dteday" => ["2011-01-01"],
            "casual" => [10i64],
            "registered" => [20i64],
        )
        .unwrap();

        assert!(BikeDataset::from_dataframe(df).is_err());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let df = df!(
            "dteday" => ["01/01/2011"],
            "casual" => [10i64],
            "registered" => [20i64],
            "cnt" => [30i64],
            "weathersit" => [1i64],
        )
        .unwrap();

        match BikeDataset::from_dataframe(df) {
            Err(DatasetError::InvalidDate(raw)) => assert_eq!(raw, "01/01/2011"),
            other => panic!("expected InvalidDate, got {:?}", other.err()),
        }
    }

    #[test]
    fn weather_labels_cover_all_levels() {
        assert_eq!(weather_label(1), "Clear / partly cloudy");
        assert_eq!(weather_label(2), "Mist + cloudy");
        assert_eq!(weather_label(3), "Light rain / snow");
        assert_eq!(weather_label(4), "Heavy rain / snow");
        assert_eq!(weather_label(9), "Unknown");
    }
}
