//! Parallel coordinates plot for high-dimensional data visualization
//!
//! Each record is drawn as a polyline crossing one vertical axis per
//! displayed dimension. A render pass runs, in order: bounds, dimension
//! selection, chart rectangle, records, overlays, axes, rulers.

mod axes;
pub mod bounds;
pub mod dimensions;
pub mod menu;
pub mod options;
pub mod overlays;
pub mod projection;
pub mod records;
pub mod ruler;

use pcoord_core::{
    Bound, ChartId, ChartRect, ChartState, DimensionState, DrawEvent, DrawGeometry, DrawKind,
    EventBus, RecordsFiltered, RenderAborted, RenderCompleted,
};
use pcoord_data::Dataset;
use pcoord_render::Scene;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{ChartError, ChartView, ChartViewId};

pub use bounds::{calculate_bounds, Bounds};
pub use dimensions::{select_dimensions, DimensionSelection};
pub use menu::{DimensionMenu, MenuItem};
pub use options::{
    AxisLabel, AxisXOptions, AxisYOptions, ClassNames, LabelOffset, ParallelCoordinatesOptions,
};
pub use overlays::{Bucket, Histogram};
pub use projection::Projector;
pub use ruler::{filter_records, AxisRuler, DragState, RulerRelease, RulerSet};

/// Inputs shared by every drawing step of one render pass
pub(crate) struct RenderPass<'a> {
    pub chart_id: ChartId,
    pub options: &'a ParallelCoordinatesOptions,
    pub dataset: &'a Dataset,
    /// Bounds of every dataset dimension, by original index
    pub bounds: &'a [Bounds],
    pub dimensions: &'a DimensionState,
    pub projector: Projector,
    events: &'a EventBus,
    publish_draw_events: bool,
}

impl<'a> RenderPass<'a> {
    pub fn draw_event(
        &self,
        kind: DrawKind,
        class_name: &str,
        geometry: DrawGeometry,
    ) -> DrawEvent {
        DrawEvent {
            chart_id: self.chart_id,
            kind,
            axis: None,
            index: 0,
            series: None,
            dimension: None,
            class_name: class_name.to_string(),
            geometry,
        }
    }

    pub fn emit(&self, event: DrawEvent) {
        if self.publish_draw_events {
            self.events.publish(event);
        }
    }
}

/// Layout of the last successful render pass
#[derive(Debug, Clone)]
struct Layout {
    projector: Projector,
    bounds: Vec<Bounds>,
}

/// Parallel coordinates chart bound to one [`ChartState`]
pub struct ParallelCoordinatesPlot {
    id: ChartViewId,
    title: String,
    pub options: ParallelCoordinatesOptions,

    // State
    state: ChartState,
    events: EventBus,
    layout: Option<Layout>,

    // Interaction state
    rulers: RulerSet,
}

impl ParallelCoordinatesPlot {
    pub fn new(id: ChartViewId, title: String) -> Self {
        let mut state = ChartState::new();
        state.id = id;
        Self {
            id,
            title,
            options: ParallelCoordinatesOptions::default(),
            state,
            events: EventBus::new(),
            layout: None,
            rulers: RulerSet::default(),
        }
    }

    pub fn with_options(mut self, options: ParallelCoordinatesOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ChartState {
        &mut self.state
    }

    /// Bus receiving draw, abort, completion and filter notifications
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn rulers(&self) -> &RulerSet {
        &self.rulers
    }

    /// Bounds of the last successful render, by original dimension index
    pub fn bounds(&self) -> Option<&[Bounds]> {
        self.layout.as_ref().map(|l| l.bounds.as_slice())
    }

    pub fn projector(&self) -> Option<&Projector> {
        self.layout.as_ref().map(|l| &l.projector)
    }

    /// Run a full render pass
    pub fn try_render(&mut self, dataset: &Dataset) -> Result<Scene, ChartError> {
        let chart_id = self.state.id;
        let options = &self.options;

        let bounds = calculate_bounds(
            dataset,
            options.available_height(),
            options.axis_y.scale_min_space,
        );

        let selection = select_dimensions(
            &dataset.labels,
            |label, index| options.axis_x.interpolate(label, index),
            &self.state.dimensions,
        );
        selection.apply_to(&mut self.state.dimensions);

        if let Err(err) = selection.ensure_renderable() {
            warn!(chart = %chart_id, displayed = selection.len(), "Not enough dimensions to draw");
            self.events.publish(RenderAborted {
                chart_id,
                reason: err.to_string(),
            });
            self.layout = None;
            self.rulers = RulerSet::default();
            self.state.visible_records.clear();
            return Err(err);
        }

        let rect = ChartRect::from_container(
            options.width,
            options.height,
            options.chart_padding,
            options.axis_x.offset,
            options.axis_y.offset,
        )
        .flipped(options.height);
        let projector = Projector::new(rect, selection.len());

        if options.use_rulers {
            for &dimension in &selection.dimension_index {
                let natural = &bounds[dimension];
                self.state.dimensions.ensure_thresholds(dimension, natural.min, natural.max);
            }
        }

        let mut scene =
            Scene::new(options.width, options.height, options.class_names.chart.as_str());
        let pass = RenderPass {
            chart_id,
            options,
            dataset,
            bounds: &bounds,
            dimensions: &self.state.dimensions,
            projector,
            events: &self.events,
            publish_draw_events: self.events.has_subscribers::<DrawEvent>(),
        };

        let segments = records::draw_records(&pass, &mut scene);
        if options.show_mean {
            overlays::draw_mean_line(&pass, &mut scene);
        }
        if options.show_histogram {
            overlays::draw_histograms(&pass, &mut scene);
        }
        axes::draw_axes(&pass, &mut scene);

        let (rulers, visible) = if options.use_rulers {
            let rulers = RulerSet::layout(&pass);
            ruler::draw_rulers(&pass, &rulers, &mut scene);
            (rulers, filter_records(dataset, &self.state.dimensions, &bounds))
        } else {
            (RulerSet::new(projector), vec![true; dataset.record_count()])
        };

        let hidden = ruler::apply_visibility(&mut scene, &visible);
        if options.use_rulers {
            self.events.publish(RecordsFiltered {
                chart_id,
                visible: visible.len() - hidden,
                hidden,
            });
        }
        self.state.visible_records = visible;
        self.rulers = rulers;
        self.layout = Some(Layout { projector, bounds });

        debug!(
            chart = %chart_id,
            dimensions = selection.len(),
            records = dataset.record_count(),
            segments,
            "Rendered parallel coordinates"
        );
        self.events.publish(RenderCompleted {
            chart_id,
            displayed_dimensions: selection.len(),
            records: dataset.record_count(),
            segments,
        });

        Ok(scene)
    }

    /// Force a dimension visible or hidden; takes effect on the next render
    pub fn set_dimension_visible(&mut self, label: &str, visible: bool) {
        menu::toggle(&mut self.state.dimensions, label, visible);
    }

    /// Checkbox menu for the configured container, if any
    pub fn dimension_menu(&self, dataset: &Dataset) -> Option<DimensionMenu> {
        let container = self.options.select_displayed_dim_container.as_ref()?;
        Some(DimensionMenu::new(
            container.as_str(),
            self.options.class_names.dimension_menu.as_str(),
            &dataset.labels,
            &self.state.dimensions,
        ))
    }

    pub fn begin_ruler_drag(&mut self, axis: usize, bound: Bound) -> bool {
        self.rulers.begin_drag(axis, bound)
    }

    /// Move the dragged marker; only the drawn marker changes
    pub fn drag_ruler(&mut self, y: f64, scene: &mut Scene) -> Option<f64> {
        let y = self.rulers.drag_to(y)?;
        if let DragState::Dragging { axis, bound } = self.rulers.drag_state() {
            if let Some(axis_ruler) = self.rulers.ruler(axis) {
                ruler::move_marker(scene, axis, bound, axis_ruler);
            }
        }
        Some(y)
    }

    /// Finish a drag: store the threshold and filter the records
    pub fn release_ruler(&mut self, dataset: &Dataset, scene: &mut Scene) -> Option<RulerRelease> {
        let release = self.rulers.release()?;
        self.state
            .dimensions
            .set_threshold(release.dimension, release.bound, release.value);
        debug!(
            dimension = release.dimension,
            bound = ?release.bound,
            value = release.value,
            "Ruler released"
        );
        self.apply_filter(dataset, scene);
        Some(release)
    }

    /// Recompute record visibility from the current thresholds.
    /// Returns the number of hidden records.
    pub fn apply_filter(&mut self, dataset: &Dataset, scene: &mut Scene) -> usize {
        let Some(layout) = &self.layout else {
            return 0;
        };
        let visible = filter_records(dataset, &self.state.dimensions, &layout.bounds);
        let hidden = ruler::apply_visibility(scene, &visible);
        self.events.publish(RecordsFiltered {
            chart_id: self.state.id,
            visible: visible.len() - hidden,
            hidden,
        });
        self.state.visible_records = visible;
        hidden
    }

    /// Forget every ruler threshold; markers return to the natural bounds on
    /// the next render
    pub fn reset_rulers(&mut self) {
        self.rulers.cancel();
        self.state.dimensions.clear_thresholds();
    }
}

impl ChartView for ParallelCoordinatesPlot {
    fn id(&self) -> ChartViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn view_type(&self) -> &str {
        "ParallelCoordinatesView"
    }

    fn render(&mut self, dataset: &Dataset) -> Scene {
        match self.try_render(dataset) {
            Ok(scene) => scene,
            Err(_) => Scene::new(
                self.options.width,
                self.options.height,
                self.options.class_names.chart.as_str(),
            ),
        }
    }

    fn save_config(&self) -> Value {
        let (show, hide) = self.state.dimensions.overrides();
        json!({
            "options": serde_json::to_value(&self.options).unwrap_or(Value::Null),
            "show": show,
            "hide": hide,
        })
    }

    fn load_config(&mut self, config: Value) {
        if let Some(options) = config.get("options") {
            match serde_json::from_value::<ParallelCoordinatesOptions>(options.clone()) {
                Ok(options) => self.options.merge_settings(options),
                Err(e) => warn!("Ignoring invalid chart options: {}", e),
            }
        }

        let labels = |key: &str| -> Vec<String> {
            config
                .get(key)
                .and_then(|v| v.as_array())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str())
                        .map(|s| s.to_string())
                        .collect()
                })
                .unwrap_or_default()
        };
        let dimensions = &mut self.state.dimensions;
        dimensions.reset_overrides();
        dimensions.show.extend(labels("show"));
        dimensions.hide.extend(labels("hide"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pcoord_core::AxisKind;
    use pcoord_render::GroupKey;
    use uuid::Uuid;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["foo", "bar", "test", "bla", "pc-var"],
            vec![
                vec![12.0, 9.0, 7.0, 8.0, 5.0],
                vec![2.0, 1.0, 3.5, 7.0, 3.0],
                vec![1.0, 3.0, 4.0, 5.0, 6.0],
            ],
        )
    }

    fn plot(options: ParallelCoordinatesOptions) -> ParallelCoordinatesPlot {
        ParallelCoordinatesPlot::new(Uuid::new_v4(), "test".to_string()).with_options(options)
    }

    #[test]
    fn test_render_draws_every_record() {
        let mut plot = plot(ParallelCoordinatesOptions::default());
        let scene = plot.try_render(&dataset()).unwrap();

        assert_eq!(scene.series_groups().count(), 3);
        for (_, group) in scene.series_groups() {
            assert_eq!(group.lines().count(), 4);
        }
        assert_eq!(plot.state().dimensions.display.len(), 5);
        assert_eq!(plot.state().visible_count(), 3);
    }

    #[test]
    fn test_insufficient_dimensions() {
        let options = ParallelCoordinatesOptions::default().with_dimension_labels(|label, _| {
            if label == "foo" {
                AxisLabel::Shown(label.into())
            } else {
                AxisLabel::Hidden
            }
        });
        let mut plot = plot(options);

        let aborted = Arc::new(Mutex::new(Vec::new()));
        let sink = aborted.clone();
        plot.events()
            .subscribe_fn(move |e: &RenderAborted| sink.lock().push(e.reason.clone()));

        let err = plot.try_render(&dataset()).unwrap_err();
        assert!(matches!(err, ChartError::InsufficientDimensions { displayed: 1 }));
        assert_eq!(aborted.lock().len(), 1);

        let scene = plot.render(&dataset());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_abort_forgets_previous_pass() {
        let mut plot = plot(ParallelCoordinatesOptions {
            use_rulers: true,
            ..Default::default()
        });
        plot.try_render(&dataset()).unwrap();
        assert_eq!(plot.state().visible_count(), 3);

        plot.options = plot
            .options
            .clone()
            .with_dimension_labels(|_, _| AxisLabel::Hidden);
        assert!(plot.try_render(&dataset()).is_err());

        assert!(plot.state().visible_records.is_empty());
        assert!(plot.rulers().is_empty());
        assert!(plot.bounds().is_none());
    }

    #[test]
    fn test_draw_events_describe_axes() {
        let mut plot = plot(ParallelCoordinatesOptions::default());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        plot.events().subscribe_fn(move |e: &DrawEvent| sink.lock().push(e.clone()));

        plot.try_render(&dataset()).unwrap();
        let events = events.lock();

        let x_grid = events
            .iter()
            .filter(|e| e.kind == DrawKind::Grid && e.axis == Some(AxisKind::X))
            .count();
        let lines = events.iter().filter(|e| e.kind == DrawKind::Line).count();
        assert_eq!(x_grid, 5);
        assert_eq!(lines, 12);
        assert!(events
            .iter()
            .any(|e| matches!(&e.geometry, DrawGeometry::Label { text, .. } if text == "pc-var")));
    }

    #[test]
    fn test_mean_and_histogram_groups() {
        let options = ParallelCoordinatesOptions {
            show_mean: true,
            show_histogram: true,
            histogram_partition: 4,
            ..Default::default()
        };
        let mut plot = plot(options);
        let scene = plot.try_render(&dataset()).unwrap();

        assert_eq!(scene.group(GroupKey::Mean).unwrap().lines().count(), 4);
        for dimension in 0..5 {
            let group = scene.group(GroupKey::Histogram(dimension)).unwrap();
            let counts: usize = group
                .elements
                .iter()
                .filter_map(|e| e.attribute("ct:value"))
                .map(|v| v.parse::<usize>().unwrap())
                .sum();
            assert_eq!(counts, 3);
        }
    }

    #[test]
    fn test_ruler_release_filters_records() {
        let options = ParallelCoordinatesOptions {
            use_rulers: true,
            ..Default::default()
        };
        let mut plot = plot(options);
        let data = dataset();
        let mut scene = plot.try_render(&data).unwrap();
        assert_eq!(plot.rulers().rulers().len(), 5);
        assert_eq!(
            plot.state().dimensions.threshold(0, Bound::Max),
            Some(plot.bounds().unwrap()[0].max)
        );

        // pull the "foo" max marker down to the middle of its axis
        let mid = plot.projector().unwrap().rect().mid_y();
        assert!(plot.begin_ruler_drag(0, Bound::Max));
        plot.drag_ruler(mid, &mut scene);
        let release = plot.release_ruler(&data, &mut scene).unwrap();

        assert!(release.value < 12.0);
        assert!(scene.group(GroupKey::Series(0)).unwrap().hidden);
        assert!(!scene.group(GroupKey::Series(1)).unwrap().hidden);
        assert_eq!(plot.state().visible_records, vec![false, true, true]);

        // thresholds survive a re-render
        let scene = plot.try_render(&data).unwrap();
        assert!(scene.group(GroupKey::Series(0)).unwrap().hidden);
    }

    #[test]
    fn test_config_round_trip() {
        let mut source = plot(ParallelCoordinatesOptions {
            show_mean: true,
            ..Default::default()
        });
        source.set_dimension_visible("bar", false);
        let config = source.save_config();

        let mut target = plot(ParallelCoordinatesOptions::default());
        target.load_config(config);
        assert!(target.options.show_mean);
        assert!(target.state().dimensions.hide.contains("bar"));

        target.try_render(&dataset()).unwrap();
        assert!(!target.state().dimensions.is_displayed("bar"));
    }
}
