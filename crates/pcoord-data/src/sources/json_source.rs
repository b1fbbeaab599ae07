use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use serde::Deserialize;

use crate::{DataError, Dataset, Record};
use super::DataSource;

/// On-disk layout: `{"labels": [...], "series": [...]}`
#[derive(Debug, Deserialize)]
struct ChartData {
    labels: Vec<String>,
    #[serde(default)]
    series: Vec<SeriesEntry>,
}

/// A series is either a bare value array or an object with metadata
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeriesEntry {
    Values(Vec<f64>),
    Described {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "className")]
        class_name: Option<String>,
        data: Vec<f64>,
    },
}

impl From<SeriesEntry> for Record {
    fn from(entry: SeriesEntry) -> Self {
        match entry {
            SeriesEntry::Values(values) => Record::new(values),
            SeriesEntry::Described { name, class_name, data } => Record {
                name,
                class_name,
                values: data,
            },
        }
    }
}

/// JSON data source in the labels/series layout
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse JSON from any reader
    pub fn read_from<R: Read>(reader: R) -> Result<Dataset, DataError> {
        let data: ChartData = serde_json::from_reader(reader)?;
        if data.labels.is_empty() {
            return Err(DataError::NoDimensions);
        }
        let records = data.series.into_iter().map(Record::from).collect();
        Ok(Dataset::from_records(data.labels, records))
    }
}

impl DataSource for JsonSource {
    fn load(&self) -> Result<Dataset, DataError> {
        let file = File::open(&self.path)?;
        let dataset = Self::read_from(BufReader::new(file))?;
        tracing::info!(
            "Read {} records with {} dimensions from {}",
            dataset.record_count(),
            dataset.dimension_count(),
            self.source_name()
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_plain_and_described_series() {
        let text = r#"{
            "labels": ["foo", "bar", "test"],
            "series": [
                [12, 9, 7],
                {"name": "second", "className": "highlight", "data": [2, 1]}
            ]
        }"#;
        let dataset = JsonSource::read_from(text.as_bytes()).unwrap();

        assert_eq!(dataset.dimension_count(), 3);
        assert_eq!(dataset.records[0].values, vec![12.0, 9.0, 7.0]);
        assert_eq!(dataset.records[1].name.as_deref(), Some("second"));
        assert_eq!(dataset.records[1].class_name.as_deref(), Some("highlight"));
        assert_eq!(dataset.records[1].values, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_empty_labels_are_rejected() {
        let text = r#"{"labels": [], "series": []}"#;
        assert!(matches!(JsonSource::read_from(text.as_bytes()), Err(DataError::NoDimensions)));
    }
}
