//! View system for parallel coordinates charts

mod chart_view;
pub mod export;
pub mod plots;

use thiserror::Error;

pub use chart_view::{ChartView, ChartViewId};
pub use export::{export_scene, scene_to_html, scene_to_svg, ExportFormat};
pub use plots::parallel_coordinates::{
    AxisLabel, Bounds, DimensionMenu, ParallelCoordinatesOptions, ParallelCoordinatesPlot,
    Projector, RulerRelease,
};

/// Errors raised while rendering or exporting a chart
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("At least two dimensions must be displayed, found {displayed}")]
    InsufficientDimensions { displayed: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
