//! Options recognized by the parallel coordinates chart

use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// Result of a label interpolation function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisLabel {
    /// Draw the axis or tick with this text
    Shown(String),
    /// Skip the axis or tick
    Hidden,
}

impl AxisLabel {
    pub fn is_shown(&self) -> bool {
        matches!(self, AxisLabel::Shown(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AxisLabel::Shown(text) => Some(text),
            AxisLabel::Hidden => None,
        }
    }
}

/// Maps a dimension label and its original index to an axis label
pub type DimensionLabelFn = Arc<dyn Fn(&str, usize) -> AxisLabel + Send + Sync>;

/// Maps a tick value and its tick index to a tick label
pub type TickLabelFn = Arc<dyn Fn(f64, usize) -> AxisLabel + Send + Sync>;

/// Offset applied to label positions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelOffset {
    pub x: f64,
    pub y: f64,
}

/// Horizontal axis: one entry per dimension
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisXOptions {
    pub offset: f64,
    pub label_offset: LabelOffset,
    pub show_label: bool,
    pub show_grid: bool,
    /// Static dimension filter; `Hidden` removes the dimension unless the user shows it
    #[serde(skip)]
    pub label_interpolation_fnc: Option<DimensionLabelFn>,
}

impl AxisXOptions {
    pub fn interpolate(&self, label: &str, index: usize) -> AxisLabel {
        match &self.label_interpolation_fnc {
            Some(f) => f(label, index),
            None => AxisLabel::Shown(label.to_string()),
        }
    }
}

impl Default for AxisXOptions {
    fn default() -> Self {
        Self {
            offset: 30.0,
            label_offset: LabelOffset::default(),
            show_label: true,
            show_grid: true,
            label_interpolation_fnc: None,
        }
    }
}

impl fmt::Debug for AxisXOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisXOptions")
            .field("offset", &self.offset)
            .field("label_offset", &self.label_offset)
            .field("show_label", &self.show_label)
            .field("show_grid", &self.show_grid)
            .field("label_interpolation_fnc", &self.label_interpolation_fnc.is_some())
            .finish()
    }
}

/// Vertical axes: one per displayed dimension, sharing these settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisYOptions {
    pub offset: f64,
    pub label_offset: LabelOffset,
    pub show_label: bool,
    pub show_grid: bool,
    /// Minimum on-screen distance between two ticks, in pixels
    pub scale_min_space: f64,
    #[serde(skip)]
    pub label_interpolation_fnc: Option<TickLabelFn>,
}

impl AxisYOptions {
    pub fn interpolate(&self, value: f64, index: usize) -> AxisLabel {
        match &self.label_interpolation_fnc {
            Some(f) => f(value, index),
            None => AxisLabel::Shown(format_tick(value)),
        }
    }
}

impl Default for AxisYOptions {
    fn default() -> Self {
        Self {
            offset: 40.0,
            label_offset: LabelOffset::default(),
            show_label: true,
            show_grid: true,
            scale_min_space: 20.0,
            label_interpolation_fnc: None,
        }
    }
}

impl fmt::Debug for AxisYOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisYOptions")
            .field("offset", &self.offset)
            .field("label_offset", &self.label_offset)
            .field("show_label", &self.show_label)
            .field("show_grid", &self.show_grid)
            .field("scale_min_space", &self.scale_min_space)
            .field("label_interpolation_fnc", &self.label_interpolation_fnc.is_some())
            .finish()
    }
}

/// Class names for every drawn element category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    pub chart: String,
    pub label: String,
    pub label_group: String,
    pub series: String,
    pub line: String,
    pub mean: String,
    pub grid: String,
    pub grid_group: String,
    pub vertical: String,
    pub horizontal: String,
    pub histogram: String,
    pub histogram_bar: String,
    pub histogram_label: String,
    pub ruler: String,
    pub ruler_group: String,
    pub ruler_max: String,
    pub ruler_min: String,
    pub dimension_menu: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            chart: "ct-chart-parallel".to_string(),
            label: "ct-label".to_string(),
            label_group: "ct-labels".to_string(),
            series: "ct-series".to_string(),
            line: "ct-line".to_string(),
            mean: "ct-mean".to_string(),
            grid: "ct-grid".to_string(),
            grid_group: "ct-grids".to_string(),
            vertical: "ct-vertical".to_string(),
            horizontal: "ct-horizontal".to_string(),
            histogram: "ct-histogram".to_string(),
            histogram_bar: "ct-histogram-bar".to_string(),
            histogram_label: "ct-histogram-label".to_string(),
            ruler: "ct-ruler".to_string(),
            ruler_group: "ct-rulers".to_string(),
            ruler_max: "ct-ruler-max".to_string(),
            ruler_min: "ct-ruler-min".to_string(),
            dimension_menu: "ct-dimension-menu".to_string(),
        }
    }
}

/// Parallel coordinates configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallelCoordinatesOptions {
    /// Container width in pixels
    pub width: f64,
    /// Container height in pixels
    pub height: f64,
    pub axis_x: AxisXOptions,
    pub axis_y: AxisYOptions,
    pub chart_padding: f64,

    // Overlays
    pub show_mean: bool,
    pub show_histogram: bool,
    /// Number of histogram buckets per axis
    pub histogram_partition: usize,

    // Interaction
    pub use_rulers: bool,
    /// Host element receiving the dimension checkbox menu
    pub select_displayed_dim_container: Option<String>,

    pub class_names: ClassNames,
}

impl Default for ParallelCoordinatesOptions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            axis_x: AxisXOptions::default(),
            axis_y: AxisYOptions::default(),
            chart_padding: 5.0,
            show_mean: false,
            show_histogram: false,
            histogram_partition: 10,
            use_rulers: false,
            select_displayed_dim_container: None,
            class_names: ClassNames::default(),
        }
    }
}

impl ParallelCoordinatesOptions {
    /// Install a static dimension filter
    pub fn with_dimension_labels<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, usize) -> AxisLabel + Send + Sync + 'static,
    {
        self.axis_x.label_interpolation_fnc = Some(Arc::new(f));
        self
    }

    /// Install a tick label function
    pub fn with_tick_labels<F>(mut self, f: F) -> Self
    where
        F: Fn(f64, usize) -> AxisLabel + Send + Sync + 'static,
    {
        self.axis_y.label_interpolation_fnc = Some(Arc::new(f));
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Length of every vertical axis in pixels
    pub fn available_height(&self) -> f64 {
        (self.height - self.chart_padding * 2.0 - self.axis_x.offset).max(0.0)
    }

    /// Copy the serializable settings of `other`, keeping the installed closures
    pub fn merge_settings(&mut self, other: ParallelCoordinatesOptions) {
        let x_fnc = self.axis_x.label_interpolation_fnc.take();
        let y_fnc = self.axis_y.label_interpolation_fnc.take();
        *self = other;
        if self.axis_x.label_interpolation_fnc.is_none() {
            self.axis_x.label_interpolation_fnc = x_fnc;
        }
        if self.axis_y.label_interpolation_fnc.is_none() {
            self.axis_y.label_interpolation_fnc = y_fnc;
        }
    }
}

/// Default tick text: the value without floating point noise
pub fn format_tick(value: f64) -> String {
    let rounded = (value * 1e10).round() / 1e10;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: ParallelCoordinatesOptions = serde_json::from_str(
            r##"{
                "showMean": true,
                "histogramPartition": 4,
                "useRulers": true,
                "selectDisplayedDimContainer": "#dims",
                "axisY": {"scaleMinSpace": 30},
                "classNames": {"mean": "my-mean"}
            }"##,
        )
        .unwrap();

        assert!(options.show_mean);
        assert_eq!(options.histogram_partition, 4);
        assert!(options.use_rulers);
        assert_eq!(options.select_displayed_dim_container.as_deref(), Some("#dims"));
        assert_eq!(options.axis_y.scale_min_space, 30.0);
        assert_eq!(options.axis_y.offset, 40.0);
        assert_eq!(options.class_names.mean, "my-mean");
        assert_eq!(options.class_names.line, "ct-line");
    }

    #[test]
    fn test_default_interpolation() {
        let options = ParallelCoordinatesOptions::default();
        assert_eq!(options.axis_x.interpolate("foo", 0), AxisLabel::Shown("foo".to_string()));
        assert_eq!(options.axis_y.interpolate(0.1 + 0.2, 0), AxisLabel::Shown("0.3".to_string()));
    }

    #[test]
    fn test_merge_keeps_closures() {
        let mut options = ParallelCoordinatesOptions::default()
            .with_dimension_labels(|_, _| AxisLabel::Hidden);
        let loaded = ParallelCoordinatesOptions {
            show_histogram: true,
            ..Default::default()
        };
        options.merge_settings(loaded);

        assert!(options.show_histogram);
        assert_eq!(options.axis_x.interpolate("a", 0), AxisLabel::Hidden);
    }

    #[test]
    fn test_available_height() {
        let options = ParallelCoordinatesOptions::default().with_size(400.0, 300.0);
        assert_eq!(options.available_height(), 260.0);
    }
}
