//! Chart view abstraction - base trait for all chart views

use pcoord_data::Dataset;
use pcoord_render::Scene;
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a chart view
pub type ChartViewId = Uuid;

/// Base trait for chart views
pub trait ChartView {
    /// Get the unique ID of this view
    fn id(&self) -> ChartViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type (for serialization)
    fn view_type(&self) -> &str;

    /// Lay the chart out for `dataset`. A chart that cannot be drawn yields
    /// an empty scene.
    fn render(&mut self, dataset: &Dataset) -> Scene;

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);
}
