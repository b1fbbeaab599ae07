//! Screen-space geometry

use serde::{Deserialize, Serialize};

/// A point in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The drawing area of a chart.
///
/// `y1` is the bottom edge and `y2` the top edge, so `height()` stays
/// positive while data values grow upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ChartRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Derive the drawing area from the container size, the padding and
    /// the space reserved for both axes.
    pub fn from_container(
        width: f64,
        height: f64,
        padding: f64,
        x_axis_offset: f64,
        y_axis_offset: f64,
    ) -> Self {
        Self {
            x1: padding + y_axis_offset,
            y1: (height - padding - x_axis_offset).max(padding),
            x2: (width - padding).max(padding + y_axis_offset),
            y2: padding,
        }
    }

    /// Mirror the rectangle vertically inside a container of the given
    /// height. Used to move the x axis labels above the plot.
    pub fn flipped(self, container_height: f64) -> Self {
        Self {
            x1: self.x1,
            y1: container_height - self.y2,
            x2: self.x2,
            y2: container_height - self.y1,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y2
    }

    pub fn top(&self) -> f64 {
        self.y2
    }

    pub fn bottom(&self) -> f64 {
        self.y1
    }

    pub fn mid_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// Clamp a screen y into the vertical extent of the rectangle
    pub fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.top(), self.bottom())
    }
}
