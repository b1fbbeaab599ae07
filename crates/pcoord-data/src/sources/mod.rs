pub mod csv_source;
pub mod json_source;

use std::path::Path;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;

use crate::{DataError, Dataset};

/// Trait for data sources
pub trait DataSource {
    /// Read the whole source into a normalized dataset
    fn load(&self) -> Result<Dataset, DataError>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}

/// Pick a source implementation from the file extension
pub fn open_source(path: &Path) -> Result<Box<dyn DataSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "tsv" | "txt" => Ok(Box::new(CsvSource::new(path.to_path_buf()))),
        "json" => Ok(Box::new(JsonSource::new(path.to_path_buf()))),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_source_by_extension() {
        assert!(open_source(Path::new("cars.csv")).is_ok());
        assert!(open_source(Path::new("cars.JSON")).is_ok());
        assert!(matches!(
            open_source(Path::new("cars.xlsx")),
            Err(DataError::UnsupportedFormat(_))
        ));
    }
}
