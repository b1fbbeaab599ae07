//! Data handling and sources for parallel coordinates charts

pub mod dataset;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use dataset::{Dataset, Record};
pub use sources::{open_source, CsvSource, DataSource, JsonSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing header row")]
    MissingHeader,

    #[error("Dataset has no dimensions")]
    NoDimensions,

    #[error("Invalid value {value:?} in row {row}, column {column:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
