//! Range rulers and the record filter they drive
//!
//! Every displayed axis carries a max marker (top) and a min marker (bottom).
//! Dragging a marker only moves it on screen; the threshold is written back
//! into the chart state on release, after which the record filter recomputes
//! which records stay visible.

use pcoord_core::{Bound, DimensionState, DrawGeometry, DrawKind, Point};
use pcoord_data::Dataset;
use pcoord_render::{GroupKey, Scene, Shape};

use super::bounds::Bounds;
use super::options::format_tick;
use super::projection::Projector;
use super::RenderPass;

pub const MARKER_WIDTH: f64 = 12.0;
pub const MARKER_HEIGHT: f64 = 6.0;

/// Marker positions of one displayed axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRuler {
    pub dimension: usize,
    pub label: String,
    pub x: f64,
    pub bounds: Bounds,
    /// Screen Y of the max marker
    pub max_y: f64,
    /// Screen Y of the min marker
    pub min_y: f64,
}

impl AxisRuler {
    pub fn marker_y(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Max => self.max_y,
            Bound::Min => self.min_y,
        }
    }

    /// Marker rectangle as `(x, y, width, height)`; the max marker sits above
    /// its position, the min marker below
    pub fn marker_rect(&self, bound: Bound) -> (f64, f64, f64, f64) {
        let x = self.x - MARKER_WIDTH / 2.0;
        match bound {
            Bound::Max => (x, self.max_y - MARKER_HEIGHT, MARKER_WIDTH, MARKER_HEIGHT),
            Bound::Min => (x, self.min_y, MARKER_WIDTH, MARKER_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { axis: usize, bound: Bound },
}

/// Outcome of releasing a marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerRelease {
    /// Display position of the axis
    pub axis: usize,
    /// Original dimension index
    pub dimension: usize,
    pub bound: Bound,
    /// New threshold in data units
    pub value: f64,
}

/// Rulers of the last render pass plus the drag in progress
#[derive(Debug, Clone, Default)]
pub struct RulerSet {
    rulers: Vec<AxisRuler>,
    projector: Option<Projector>,
    drag: DragState,
}

impl RulerSet {
    pub fn new(projector: Projector) -> Self {
        Self {
            rulers: Vec::new(),
            projector: Some(projector),
            drag: DragState::Idle,
        }
    }

    /// Place markers for every displayed axis at its current thresholds
    pub(crate) fn layout(pass: &RenderPass<'_>) -> Self {
        let mut set = Self::new(pass.projector);
        let rect = pass.projector.rect();
        for (position, &dimension) in pass.dimensions.dimension_index.iter().enumerate() {
            let Some(bounds) = pass.bounds.get(dimension) else {
                continue;
            };
            let (min, max) = pass.dimensions.range_or(dimension, bounds.min, bounds.max);
            set.push(AxisRuler {
                dimension,
                label: pass.dimensions.display[position].clone(),
                x: pass.projector.axis_x(position),
                bounds: bounds.clone(),
                max_y: rect.clamp_y(pass.projector.value_to_y(bounds, max)),
                min_y: rect.clamp_y(pass.projector.value_to_y(bounds, min)),
            });
        }
        set
    }

    pub fn push(&mut self, ruler: AxisRuler) {
        self.rulers.push(ruler);
    }

    pub fn rulers(&self) -> &[AxisRuler] {
        &self.rulers
    }

    pub fn ruler(&self, axis: usize) -> Option<&AxisRuler> {
        self.rulers.get(axis)
    }

    pub fn is_empty(&self) -> bool {
        self.rulers.is_empty()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Marker under `point`, if any
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<(usize, Bound)> {
        for (axis, ruler) in self.rulers.iter().enumerate() {
            for bound in [Bound::Max, Bound::Min] {
                let (x, y, w, h) = ruler.marker_rect(bound);
                let inside_x = point.x >= x - tolerance && point.x <= x + w + tolerance;
                let inside_y = point.y >= y - tolerance && point.y <= y + h + tolerance;
                if inside_x && inside_y {
                    return Some((axis, bound));
                }
            }
        }
        None
    }

    /// Idle -> Dragging
    pub fn begin_drag(&mut self, axis: usize, bound: Bound) -> bool {
        if self.drag != DragState::Idle || axis >= self.rulers.len() {
            return false;
        }
        self.drag = DragState::Dragging { axis, bound };
        true
    }

    /// Move the dragged marker towards `y`, clamped between its counterpart
    /// and the chart edge. Returns the marker's new screen Y.
    pub fn drag_to(&mut self, y: f64) -> Option<f64> {
        let DragState::Dragging { axis, bound } = self.drag else {
            return None;
        };
        let rect = *self.projector?.rect();
        let ruler = self.rulers.get_mut(axis)?;
        let clamped = match bound {
            Bound::Max => y.clamp(rect.top(), ruler.min_y.max(rect.top())),
            Bound::Min => y.clamp(ruler.max_y.min(rect.bottom()), rect.bottom()),
        };
        match bound {
            Bound::Max => ruler.max_y = clamped,
            Bound::Min => ruler.min_y = clamped,
        }
        Some(clamped)
    }

    /// Dragging -> Idle, converting the marker position to a threshold
    pub fn release(&mut self) -> Option<RulerRelease> {
        let DragState::Dragging { axis, bound } = std::mem::take(&mut self.drag) else {
            return None;
        };
        let projector = self.projector?;
        let ruler = self.rulers.get(axis)?;
        Some(RulerRelease {
            axis,
            dimension: ruler.dimension,
            bound,
            value: projector.y_to_value(&ruler.bounds, ruler.marker_y(bound)),
        })
    }

    /// Abandon a drag without producing a threshold
    pub fn cancel(&mut self) {
        self.drag = DragState::Idle;
    }
}

/// Visibility of every record: hidden when any displayed dimension's value
/// lies strictly outside its active range
pub fn filter_records(
    dataset: &Dataset,
    dimensions: &DimensionState,
    bounds: &[Bounds],
) -> Vec<bool> {
    let ranges: Vec<(usize, f64, f64)> = dimensions
        .dimension_index
        .iter()
        .filter_map(|&d| {
            let natural = bounds.get(d)?;
            let (min, max) = dimensions.range_or(d, natural.min, natural.max);
            Some((d, min, max))
        })
        .collect();

    dataset
        .records
        .iter()
        .map(|record| {
            ranges.iter().all(|&(d, min, max)| {
                let value = record.values.get(d).copied().unwrap_or(0.0);
                !(value < min || value > max)
            })
        })
        .collect()
}

/// Toggle record groups to match `visible`; returns the number hidden
pub fn apply_visibility(scene: &mut Scene, visible: &[bool]) -> usize {
    let mut hidden = 0;
    for (r, &is_visible) in visible.iter().enumerate() {
        scene.set_group_hidden(GroupKey::Series(r), !is_visible);
        if !is_visible {
            hidden += 1;
        }
    }
    hidden
}

/// Move a drawn marker without re-rendering
pub fn move_marker(scene: &mut Scene, axis: usize, bound: Bound, ruler: &AxisRuler) {
    let Some(group) = scene.group_mut(GroupKey::Rulers) else {
        return;
    };
    let axis_attr = axis.to_string();
    let bound_attr = bound_name(bound);
    let (_, new_y, _, _) = ruler.marker_rect(bound);
    for element in &mut group.elements {
        if element.attribute("ct:axis") == Some(axis_attr.as_str())
            && element.attribute("ct:bound") == Some(bound_attr)
        {
            if let Shape::Rect { y, .. } = &mut element.shape {
                *y = new_y;
            }
        }
    }
}

fn bound_name(bound: Bound) -> &'static str {
    match bound {
        Bound::Max => "max",
        Bound::Min => "min",
    }
}

/// Draw both markers of every ruler
pub(crate) fn draw_rulers(pass: &RenderPass<'_>, rulers: &RulerSet, scene: &mut Scene) {
    let classes = &pass.options.class_names;
    let group = scene.add_group(Some(GroupKey::Rulers), classes.ruler_group.as_str());

    for (axis, ruler) in rulers.rulers().iter().enumerate() {
        let (min, max) =
            pass.dimensions.range_or(ruler.dimension, ruler.bounds.min, ruler.bounds.max);
        for (bound, modifier, value) in [
            (Bound::Max, &classes.ruler_max, max),
            (Bound::Min, &classes.ruler_min, min),
        ] {
            let class = format!("{} {}", classes.ruler, modifier);
            let (x, y, width, height) = ruler.marker_rect(bound);
            group
                .rect(x, y, width, height, class.as_str())
                .attr("ct:axis", axis.to_string())
                .attr("ct:bound", bound_name(bound))
                .attr("ct:value", format_tick(value));

            let mut event =
                pass.draw_event(DrawKind::Rect, &class, DrawGeometry::Rect { x, y, width, height });
            event.index = axis;
            event.dimension = Some(ruler.dimension);
            pass.emit(event);
        }
    }
}
