//! Statistical utilities for plots

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of every column; empty columns average to 0
pub fn column_means(columns: &[Vec<f64>]) -> Vec<f64> {
    columns
        .iter()
        .map(|column| mean(column).unwrap_or(0.0))
        .collect()
}

/// Smallest and largest value, ignoring NaN
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
