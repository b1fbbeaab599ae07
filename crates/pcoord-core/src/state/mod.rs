//! Chart state that survives between render passes

use std::collections::BTreeMap;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Chart instance identifier type
pub type ChartId = uuid::Uuid;

/// Which end of an axis range a threshold applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Min,
    Max,
}

/// Visible dimensions and user overrides for one chart
#[derive(Debug, Clone, Default)]
pub struct DimensionState {
    /// Labels of the displayed dimensions, in dataset order
    pub display: Vec<String>,

    /// Original column index of every `display` entry
    pub dimension_index: Vec<usize>,

    /// Labels the user forced visible
    pub show: AHashSet<String>,

    /// Labels the user forced hidden
    pub hide: AHashSet<String>,

    /// Lower ruler thresholds keyed by original dimension index
    pub min_values: BTreeMap<usize, f64>,

    /// Upper ruler thresholds keyed by original dimension index
    pub max_values: BTreeMap<usize, f64>,
}

impl DimensionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the derived display list
    pub fn set_display(&mut self, display: Vec<String>, dimension_index: Vec<usize>) {
        debug_assert_eq!(display.len(), dimension_index.len());
        self.display = display;
        self.dimension_index = dimension_index;
    }

    /// Position of an original dimension inside the display list
    pub fn display_position(&self, dimension: usize) -> Option<usize> {
        self.dimension_index.iter().position(|&d| d == dimension)
    }

    pub fn is_displayed(&self, label: &str) -> bool {
        self.display.iter().any(|l| l == label)
    }

    /// Force a dimension visible or hidden, overriding the static filter
    pub fn set_dimension_visible(&mut self, label: &str, visible: bool) {
        if visible {
            self.hide.remove(label);
            self.show.insert(label.to_string());
        } else {
            self.show.remove(label);
            self.hide.insert(label.to_string());
        }
    }

    /// Drop every show/hide override
    pub fn reset_overrides(&mut self) {
        self.show.clear();
        self.hide.clear();
    }

    /// Record the natural bounds of a dimension unless a threshold is already tracked
    pub fn ensure_thresholds(&mut self, dimension: usize, min: f64, max: f64) {
        self.min_values.entry(dimension).or_insert(min);
        self.max_values.entry(dimension).or_insert(max);
    }

    pub fn set_threshold(&mut self, dimension: usize, bound: Bound, value: f64) {
        match bound {
            Bound::Min => self.min_values.insert(dimension, value),
            Bound::Max => self.max_values.insert(dimension, value),
        };
    }

    pub fn threshold(&self, dimension: usize, bound: Bound) -> Option<f64> {
        match bound {
            Bound::Min => self.min_values.get(&dimension).copied(),
            Bound::Max => self.max_values.get(&dimension).copied(),
        }
    }

    /// Active range of a dimension, falling back to its natural bounds
    pub fn range_or(&self, dimension: usize, natural_min: f64, natural_max: f64) -> (f64, f64) {
        (
            self.threshold(dimension, Bound::Min).unwrap_or(natural_min),
            self.threshold(dimension, Bound::Max).unwrap_or(natural_max),
        )
    }

    pub fn clear_thresholds(&mut self) {
        self.min_values.clear();
        self.max_values.clear();
    }

    /// Sorted copies of the override sets, for stable serialization
    pub fn overrides(&self) -> (Vec<String>, Vec<String>) {
        let mut show: Vec<String> = self.show.iter().cloned().collect();
        let mut hide: Vec<String> = self.hide.iter().cloned().collect();
        show.sort();
        hide.sort();
        (show, hide)
    }
}

/// State owned by one chart instance
#[derive(Debug, Clone)]
pub struct ChartState {
    pub id: ChartId,
    pub dimensions: DimensionState,

    /// Visibility of every record after the last filter pass
    pub visible_records: Vec<bool>,
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            dimensions: DimensionState::default(),
            visible_records: Vec::new(),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_records.iter().filter(|&&v| v).count()
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_moves_label_between_sets() {
        let mut state = DimensionState::new();
        state.set_dimension_visible("b", true);
        assert!(state.show.contains("b"));
        assert!(!state.hide.contains("b"));

        state.set_dimension_visible("b", false);
        assert!(!state.show.contains("b"));
        assert!(state.hide.contains("b"));
    }

    #[test]
    fn test_ensure_thresholds_keeps_user_values() {
        let mut state = DimensionState::new();
        state.set_threshold(0, Bound::Max, 8.0);
        state.ensure_thresholds(0, 0.0, 10.0);

        assert_eq!(state.range_or(0, 0.0, 10.0), (0.0, 8.0));
        assert_eq!(state.range_or(1, -1.0, 1.0), (-1.0, 1.0));
    }

    #[test]
    fn test_display_position() {
        let mut state = DimensionState::new();
        state.set_display(vec!["a".into(), "c".into()], vec![0, 2]);
        assert_eq!(state.display_position(2), Some(1));
        assert_eq!(state.display_position(1), None);
        assert!(state.is_displayed("c"));
    }
}
