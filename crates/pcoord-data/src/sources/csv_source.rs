use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use csv::ReaderBuilder;

use crate::{DataError, Dataset, Record};
use super::DataSource;

/// Column used for record names unless configured otherwise
const DEFAULT_NAME_COLUMN: &str = "name";

/// CSV data source.
///
/// The header row provides the dimension labels. Every cell outside the
/// optional name column must parse as a number.
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Column holding record names, skipped as a dimension
    name_column: Option<String>,
    /// Field delimiter
    delimiter: u8,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf) -> Self {
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        Self {
            path,
            name_column: Some(DEFAULT_NAME_COLUMN.to_string()),
            delimiter,
        }
    }

    /// Use a different column for record names, or none at all
    pub fn with_name_column(mut self, column: Option<String>) -> Self {
        self.name_column = column;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV text from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DataError::MissingHeader);
        }

        let name_idx = self.name_column.as_ref().and_then(|name| {
            headers.iter().position(|h| h.eq_ignore_ascii_case(name))
        });

        let labels: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != name_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        if labels.is_empty() {
            return Err(DataError::NoDimensions);
        }

        let mut records = Vec::new();
        for (row_idx, result) in csv_reader.records().enumerate() {
            let row = result?;
            let mut values = Vec::with_capacity(labels.len());
            let mut name = None;

            for (col_idx, cell) in row.iter().enumerate() {
                if Some(col_idx) == name_idx {
                    if !cell.is_empty() {
                        name = Some(cell.to_string());
                    }
                    continue;
                }
                let value = cell.parse::<f64>().map_err(|_| DataError::InvalidValue {
                    row: row_idx + 1,
                    column: headers.get(col_idx).unwrap_or_default().to_string(),
                    value: cell.to_string(),
                })?;
                values.push(value);
            }

            records.push(Record {
                name,
                class_name: None,
                values,
            });
        }

        tracing::info!(
            "Read {} records with {} dimensions from {}",
            records.len(),
            labels.len(),
            self.source_name()
        );
        Ok(Dataset::from_records(labels, records))
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<Dataset, DataError> {
        let file = File::open(&self.path)?;
        self.read_from(BufReader::new(file))
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
