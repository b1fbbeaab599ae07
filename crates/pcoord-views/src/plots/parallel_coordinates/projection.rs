//! Mapping between data values and chart coordinates

use pcoord_core::{ChartRect, DimensionState, Point};

use super::bounds::Bounds;

/// Projects values onto the axes of a laid out chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    rect: ChartRect,
    display_count: usize,
}

impl Projector {
    pub fn new(rect: ChartRect, display_count: usize) -> Self {
        Self { rect, display_count }
    }

    pub fn rect(&self) -> &ChartRect {
        &self.rect
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Horizontal distance between two neighbouring axes
    pub fn axis_spacing(&self) -> f64 {
        if self.display_count == 0 {
            return 0.0;
        }
        self.rect.width() / self.display_count as f64
    }

    /// X coordinate of the axis at a display position
    pub fn axis_x(&self, display_position: usize) -> f64 {
        self.rect.x1 + self.axis_spacing() * display_position as f64
    }

    /// Y coordinate of `value` on an axis with the given bounds
    pub fn value_to_y(&self, bounds: &Bounds, value: f64) -> f64 {
        let range = bounds.range();
        if range == 0.0 {
            return self.rect.mid_y();
        }
        self.rect.y1 - self.rect.height() * (value - bounds.min) / range
    }

    /// Inverse of [`Projector::value_to_y`], exact at both axis ends
    pub fn y_to_value(&self, bounds: &Bounds, y: f64) -> f64 {
        let height = self.rect.height();
        if bounds.range() == 0.0 || height <= 0.0 {
            return bounds.min;
        }
        if y <= self.rect.top() {
            return bounds.max;
        }
        if y >= self.rect.bottom() {
            return bounds.min;
        }
        bounds.min + (self.rect.y1 - y) / height * bounds.range()
    }

    /// Point of a record on the axis at `display_position`
    pub fn point(&self, bounds: &Bounds, value: f64, display_position: usize) -> Point {
        Point::new(self.axis_x(display_position), self.value_to_y(bounds, value))
    }

    /// Point of a record on the axis of an original dimension, `None` when
    /// that dimension is not displayed
    pub fn project(
        &self,
        dimensions: &DimensionState,
        bounds: &[Bounds],
        record: &[f64],
        dimension: usize,
    ) -> Option<Point> {
        let position = dimensions.display_position(dimension)?;
        let value = record.get(dimension).copied().unwrap_or(0.0);
        Some(self.point(bounds.get(dimension)?, value, position))
    }
}
