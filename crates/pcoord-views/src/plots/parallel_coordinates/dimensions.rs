//! Which dimensions get an axis

use pcoord_core::DimensionState;

use super::options::AxisLabel;
use crate::ChartError;

/// Displayed dimensions in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionSelection {
    pub display: Vec<String>,
    /// Original index of every `display` entry
    pub dimension_index: Vec<usize>,
}

impl DimensionSelection {
    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// A chart needs at least two axes to draw a single segment
    pub fn ensure_renderable(&self) -> Result<(), ChartError> {
        if self.len() < 2 {
            return Err(ChartError::InsufficientDimensions {
                displayed: self.len(),
            });
        }
        Ok(())
    }

    /// Store the selection as the chart's current display list
    pub fn apply_to(&self, state: &mut DimensionState) {
        state.set_display(self.display.clone(), self.dimension_index.clone());
    }
}

/// Decide the displayed dimensions.
///
/// A label is displayed when the static filter shows it or the user forced it
/// visible, unless the user forced it hidden.
pub fn select_dimensions<F>(
    labels: &[String],
    filter: F,
    state: &DimensionState,
) -> DimensionSelection
where
    F: Fn(&str, usize) -> AxisLabel,
{
    let mut selection = DimensionSelection::default();
    for (index, label) in labels.iter().enumerate() {
        let candidate = state.show.contains(label) || filter(label, index).is_shown();
        let displayed = candidate && !state.hide.contains(label);
        if displayed {
            selection.display.push(label.clone());
            selection.dimension_index.push(index);
        }
    }
    selection
}
