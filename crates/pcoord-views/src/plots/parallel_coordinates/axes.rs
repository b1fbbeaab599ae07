//! Axis lines, tick grid and labels

use pcoord_core::{AxisKind, DrawGeometry, DrawKind, Point};
use pcoord_render::{GroupKey, Scene};

use super::options::AxisLabel;
use super::records::line_geometry;
use super::RenderPass;

/// Length of a tick grid line to the left of its axis
const TICK_LENGTH: f64 = 10.0;

/// Draw the vertical axes with their labels, then the ticks of every axis
pub(crate) fn draw_axes(pass: &RenderPass<'_>, scene: &mut Scene) {
    let classes = &pass.options.class_names;
    scene.add_group(Some(GroupKey::Grid), classes.grid_group.as_str());
    scene.add_group(Some(GroupKey::Labels), classes.label_group.as_str());

    draw_x_axis(pass, scene);
    draw_y_axes(pass, scene);
}

fn draw_x_axis(pass: &RenderPass<'_>, scene: &mut Scene) {
    let options = pass.options;
    let classes = &options.class_names;
    let rect = pass.projector.rect();
    let grid_class = format!("{} {}", classes.grid, classes.horizontal);
    let label_class = format!("{} {}", classes.label, classes.horizontal);
    let spacing = pass.projector.axis_spacing();

    for (position, label) in pass.dimensions.display.iter().enumerate() {
        let dimension = pass.dimensions.dimension_index[position];
        let x = pass.projector.axis_x(position);

        if options.axis_x.show_grid {
            let (start, end) = (Point::new(x, rect.y1), Point::new(x, rect.y2));
            if let Some(grid) = scene.group_mut(GroupKey::Grid) {
                grid.line(start, end, grid_class.as_str());
            }
            let mut event = pass.draw_event(DrawKind::Grid, &grid_class, line_geometry(start, end));
            event.axis = Some(AxisKind::X);
            event.index = position;
            event.dimension = Some(dimension);
            pass.emit(event);
        }

        if options.axis_x.show_label {
            let lx = x + options.axis_x.label_offset.x;
            let ly = options.chart_padding + options.axis_x.label_offset.y + 20.0;
            let height = options.axis_x.offset;
            if let Some(labels) = scene.group_mut(GroupKey::Labels) {
                labels.text(label.as_str(), lx, ly, spacing, height, label_class.as_str());
            }
            let mut event = pass.draw_event(
                DrawKind::Label,
                &label_class,
                DrawGeometry::Label { x: lx, y: ly, width: spacing, height, text: label.clone() },
            );
            event.axis = Some(AxisKind::X);
            event.index = position;
            event.dimension = Some(dimension);
            pass.emit(event);
        }
    }
}

fn draw_y_axes(pass: &RenderPass<'_>, scene: &mut Scene) {
    let options = pass.options;
    let classes = &options.class_names;
    let rect = pass.projector.rect();
    let grid_class = format!("{} {}", classes.grid, classes.vertical);
    let label_class = format!("{} {}", classes.label, classes.vertical);

    for (position, &dimension) in pass.dimensions.dimension_index.iter().enumerate() {
        let Some(bounds) = pass.bounds.get(dimension) else {
            continue;
        };
        let x = pass.projector.axis_x(position);
        let label_height = rect.height() / bounds.values.len().max(1) as f64;

        for (i, &value) in bounds.values.iter().enumerate() {
            let AxisLabel::Shown(text) = options.axis_y.interpolate(value, i) else {
                continue;
            };
            let y = pass.projector.value_to_y(bounds, value);

            if options.axis_y.show_grid {
                let (start, end) = (Point::new(x - TICK_LENGTH, y), Point::new(x, y));
                if let Some(grid) = scene.group_mut(GroupKey::Grid) {
                    grid.line(start, end, grid_class.as_str())
                        .attr("ct:dimension", dimension.to_string());
                }
                let mut event =
                    pass.draw_event(DrawKind::Grid, &grid_class, line_geometry(start, end));
                event.axis = Some(AxisKind::Y);
                event.index = i;
                event.dimension = Some(dimension);
                pass.emit(event);
            }

            if options.axis_y.show_label {
                let lx = x + options.chart_padding + options.axis_y.label_offset.x;
                let ly = y + options.axis_y.label_offset.y;
                let width = options.axis_y.offset;
                if let Some(labels) = scene.group_mut(GroupKey::Labels) {
                    labels.text(text.as_str(), lx, ly, width, label_height, label_class.as_str());
                }
                let mut event = pass.draw_event(
                    DrawKind::Label,
                    &label_class,
                    DrawGeometry::Label { x: lx, y: ly, width, height: label_height, text },
                );
                event.axis = Some(AxisKind::Y);
                event.index = i;
                event.dimension = Some(dimension);
                pass.emit(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pcoord_core::{AxisKind, DrawEvent, DrawGeometry, DrawKind};
    use pcoord_data::Dataset;
    use pcoord_render::{GroupKey, Shape};
    use uuid::Uuid;

    use crate::plots::parallel_coordinates::{
        AxisLabel, ParallelCoordinatesOptions, ParallelCoordinatesPlot,
    };

    fn dataset() -> Dataset {
        Dataset::new(vec!["a", "b"], vec![vec![0.0, 3.0], vec![10.0, 7.0]])
    }

    #[test]
    fn test_hidden_ticks_draw_nothing() {
        let options = ParallelCoordinatesOptions::default().with_tick_labels(|value, index| {
            if index % 2 == 0 {
                AxisLabel::Shown(format!("{}", value))
            } else {
                AxisLabel::Hidden
            }
        });
        let mut plot =
            ParallelCoordinatesPlot::new(Uuid::new_v4(), "ticks".to_string()).with_options(options);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        plot.events().subscribe_fn(move |e: &DrawEvent| sink.lock().push(e.clone()));

        let scene = plot.try_render(&dataset()).unwrap();
        let bounds = plot.bounds().unwrap().to_vec();
        let shown: Vec<Vec<String>> = bounds
            .iter()
            .map(|b| {
                b.values
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| i % 2 == 0)
                    .map(|(_, v)| format!("{}", v))
                    .collect()
            })
            .collect();
        assert!(bounds.iter().all(|b| b.values.len() > 2));

        let grid = scene.group(GroupKey::Grid).unwrap();
        let ticks: Vec<_> = grid.lines().filter(|e| e.has_class("ct-vertical")).collect();
        assert_eq!(ticks.len(), shown[0].len() + shown[1].len());
        assert_eq!(grid.lines().filter(|e| e.has_class("ct-horizontal")).count(), 2);

        let labels: Vec<&str> = scene.group(GroupKey::Labels).unwrap().texts().collect();
        let expected: Vec<&str> = ["a", "b"]
            .into_iter()
            .chain(shown.iter().flatten().map(String::as_str))
            .collect();
        assert_eq!(labels, expected);

        let events = events.lock();
        let y_events: Vec<&DrawEvent> =
            events.iter().filter(|e| e.axis == Some(AxisKind::Y)).collect();
        assert!(y_events.iter().all(|e| e.index % 2 == 0));
        assert_eq!(y_events.iter().filter(|e| e.kind == DrawKind::Grid).count(), ticks.len());
        let y_texts: Vec<&str> = y_events
            .iter()
            .filter_map(|e| match &e.geometry {
                DrawGeometry::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(y_texts, expected[2..].to_vec());
    }

    #[test]
    fn test_ticks_sit_at_projected_values() {
        let mut plot = ParallelCoordinatesPlot::new(Uuid::new_v4(), "ticks".to_string());
        let scene = plot.try_render(&dataset()).unwrap();
        let projector = *plot.projector().unwrap();
        let bounds = &plot.bounds().unwrap()[0];

        let grid = scene.group(GroupKey::Grid).unwrap();
        let ys: Vec<f64> = grid
            .lines()
            .filter(|e| e.has_class("ct-vertical") && e.attribute("ct:dimension") == Some("0"))
            .map(|e| match e.shape {
                Shape::Line { y1, .. } => y1,
                _ => f64::NAN,
            })
            .collect();
        let expected: Vec<f64> =
            bounds.values.iter().map(|&v| projector.value_to_y(bounds, v)).collect();
        assert_eq!(ys, expected);
    }
}
