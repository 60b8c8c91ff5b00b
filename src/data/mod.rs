//! Data module - CSV loading and the typed rental table

mod dataset;
mod loader;

pub use dataset::{weather_label, BikeDataset, DatasetError};
pub use loader::{DataLoader, LoaderError, DATA_FILE};
