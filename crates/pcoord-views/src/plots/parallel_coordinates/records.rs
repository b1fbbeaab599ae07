//! Record polylines

use pcoord_core::{DrawGeometry, DrawKind, Point};
use pcoord_render::{alpha_numerate, GroupKey, Scene};

use super::bounds::Bounds;
use super::options::format_tick;
use super::projection::Projector;
use super::RenderPass;

/// Points of one record across the displayed axes, in display order
pub fn record_points(
    projector: &Projector,
    bounds: &[Bounds],
    dimension_index: &[usize],
    values: &[f64],
) -> Vec<Point> {
    dimension_index
        .iter()
        .enumerate()
        .filter_map(|(position, &dimension)| {
            let value = values.get(dimension).copied().unwrap_or(0.0);
            Some(projector.point(bounds.get(dimension)?, value, position))
        })
        .collect()
}

/// Class of a record group: the record's own class, or the indexed series class
pub fn series_class(series: &str, record_class: Option<&str>, index: usize) -> String {
    match record_class {
        Some(class) => class.to_string(),
        None => format!("{} {}-{}", series, series, alpha_numerate(index)),
    }
}

/// Draw one group per record; returns the number of segments drawn
pub(crate) fn draw_records(pass: &RenderPass<'_>, scene: &mut Scene) -> usize {
    let classes = &pass.options.class_names;
    let dimension_index = &pass.dimensions.dimension_index;
    let mut segments = 0;

    for (r, record) in pass.dataset.records.iter().enumerate() {
        let class = series_class(&classes.series, record.class_name.as_deref(), r);
        let group = scene.add_group(Some(GroupKey::Series(r)), class);
        if let Some(name) = &record.name {
            group.attr("ct:series-name", name.as_str());
        }

        let points = record_points(&pass.projector, pass.bounds, dimension_index, &record.values);
        for (i, pair) in points.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            let value = record.values.get(dimension_index[i + 1]).copied().unwrap_or(0.0);
            group
                .line(start, end, classes.line.as_str())
                .attr("ct:value", format_tick(value));

            let mut event =
                pass.draw_event(DrawKind::Line, &classes.line, line_geometry(start, end));
            event.index = i;
            event.series = Some(r);
            event.dimension = Some(dimension_index[i + 1]);
            pass.emit(event);
            segments += 1;
        }
    }

    segments
}

pub(crate) fn line_geometry(start: Point, end: Point) -> DrawGeometry {
    DrawGeometry::Line {
        x1: start.x,
        y1: start.y,
        x2: end.x,
        y2: end.y,
    }
}
