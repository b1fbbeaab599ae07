//! In-memory dataset: dimension labels plus one value row per record

use serde::{Deserialize, Serialize};

/// One data record, drawn as one polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Optional series name, exposed as `ct:series-name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional class name replacing the generated `ct-series-x` class
    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// One value per dimension
    pub values: Vec<f64>,
}

impl Record {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            name: None,
            class_name: None,
            values,
        }
    }

    pub fn named(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: Some(name.into()),
            class_name: None,
            values,
        }
    }
}

/// Dimension labels and the records crossing them.
///
/// Every record holds exactly `labels.len()` values once constructed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawDataset")]
pub struct Dataset {
    pub labels: Vec<String>,
    pub records: Vec<Record>,
}

/// Serialized form, normalized on the way in
#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    records: Vec<Record>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        Dataset::from_records(raw.labels, raw.records)
    }
}

impl Dataset {
    /// Build a dataset from plain value rows
    pub fn new<S: Into<String>>(labels: Vec<S>, rows: Vec<Vec<f64>>) -> Self {
        Self::from_records(labels, rows.into_iter().map(Record::new).collect())
    }

    /// Build a dataset from records, normalizing their length
    pub fn from_records<S: Into<String>>(labels: Vec<S>, records: Vec<Record>) -> Self {
        let mut dataset = Self {
            labels: labels.into_iter().map(Into::into).collect(),
            records,
        };
        dataset.normalize();
        dataset
    }

    /// Pad short records with zeros and truncate long ones
    pub fn normalize(&mut self) {
        let width = self.labels.len();
        let mut adjusted = 0;
        for record in &mut self.records {
            if record.values.len() != width {
                record.values.resize(width, 0.0);
                adjusted += 1;
            }
        }
        if adjusted > 0 {
            tracing::debug!("Normalized {} records to {} dimensions", adjusted, width);
        }
    }

    pub fn dimension_count(&self) -> usize {
        self.labels.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of a record at an original dimension index, 0 when absent
    pub fn value(&self, record: usize, dimension: usize) -> f64 {
        self.records
            .get(record)
            .and_then(|r| r.values.get(dimension))
            .copied()
            .unwrap_or(0.0)
    }

    /// All values of one dimension; missing cells read as 0
    pub fn column(&self, dimension: usize) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.values.get(dimension).copied().unwrap_or(0.0))
            .collect()
    }

    /// The dataset transposed into per-dimension columns
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.dimension_count()).map(|d| self.column(d)).collect()
    }

    /// Original index of a dimension label
    pub fn dimension_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}
