//! Core functionality for parallel coordinates charts
//!
//! This crate provides the state that survives between render passes,
//! the screen geometry shared by the layout engine and the drawing
//! surfaces, and the event bus used to publish draw notifications.

pub mod events;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use events::{
    events::{
        AxisKind, DrawEvent, DrawGeometry, DrawKind, RecordsFiltered, RenderAborted,
        RenderCompleted,
    },
    handler_from_fn, Event, EventBus, EventHandler,
};
pub use geometry::{ChartRect, Point};
pub use state::{Bound, ChartId, ChartState, DimensionState};
