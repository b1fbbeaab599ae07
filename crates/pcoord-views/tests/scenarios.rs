use std::sync::Arc;

use parking_lot::Mutex;
use pcoord_core::{Bound, DrawEvent, RecordsFiltered, RenderCompleted};
use pcoord_data::Dataset;
use pcoord_render::{GroupKey, Shape};
use pcoord_views::plots::parallel_coordinates::{
    bounds::Bounds, filter_records, overlays::Histogram, AxisLabel, ParallelCoordinatesOptions,
    ParallelCoordinatesPlot,
};
use pcoord_views::plots::utils::column_means;
use pcoord_views::{scene_to_svg, ChartView};
use uuid::Uuid;

fn plot(options: ParallelCoordinatesOptions) -> ParallelCoordinatesPlot {
    ParallelCoordinatesPlot::new(Uuid::new_v4(), "scenario".to_string()).with_options(options)
}

fn abc() -> Dataset {
    Dataset::new(vec!["a", "b", "c"], vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
}

#[test]
fn two_records_three_dimensions() {
    let mut plot = plot(ParallelCoordinatesOptions::default());
    let completed = Arc::new(Mutex::new(None));
    let sink = completed.clone();
    plot.events()
        .subscribe_fn(move |e: &RenderCompleted| *sink.lock() = Some(e.segments));

    let scene = plot.try_render(&abc()).unwrap();

    assert_eq!(plot.state().dimensions.display, vec!["a", "b", "c"]);
    assert_eq!(plot.state().dimensions.dimension_index, vec![0, 1, 2]);
    assert_eq!(scene.series_groups().count(), 2);
    for (_, group) in scene.series_groups() {
        assert_eq!(group.lines().count(), 2);
    }
    assert_eq!(*completed.lock(), Some(4));
}

#[test]
fn show_override_restores_filtered_dimension_in_place() {
    let options = ParallelCoordinatesOptions::default().with_dimension_labels(|label, _| {
        if label == "b" {
            AxisLabel::Hidden
        } else {
            AxisLabel::Shown(label.to_string())
        }
    });
    let mut plot = plot(options);
    let data = abc();

    plot.try_render(&data).unwrap();
    assert_eq!(plot.state().dimensions.display, vec!["a", "c"]);

    plot.set_dimension_visible("b", true);
    plot.try_render(&data).unwrap();
    assert_eq!(plot.state().dimensions.display, vec!["a", "b", "c"]);
    assert_eq!(plot.state().dimensions.dimension_index, vec![0, 1, 2]);
}

#[test]
fn rendering_twice_is_idempotent() {
    let options = ParallelCoordinatesOptions {
        show_mean: true,
        show_histogram: true,
        use_rulers: true,
        ..Default::default()
    };
    let mut plot = plot(options);
    let data = abc();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    plot.events().subscribe_fn(move |e: &DrawEvent| sink.lock().push(e.clone()));

    let first = plot.try_render(&data).unwrap();
    let display = plot.state().dimensions.display.clone();
    let first_events = std::mem::take(&mut *events.lock());
    let second = plot.try_render(&data).unwrap();

    assert_eq!(first, second);
    assert_eq!(plot.state().dimensions.display, display);
    assert!(!first_events.is_empty());
    assert_eq!(*events.lock(), first_events);
}

#[test]
fn bounds_cover_every_column() {
    let data = Dataset::new(
        vec!["x", "y", "z"],
        vec![vec![-7.5, 0.02, 1e5], vec![3.1, 0.07, 4.2e5], vec![12.0, 0.05, 9.9e5]],
    );
    let mut plot = plot(ParallelCoordinatesOptions::default());
    plot.try_render(&data).unwrap();

    for (d, bounds) in plot.bounds().unwrap().iter().enumerate() {
        for value in data.column(d) {
            assert!(bounds.min <= value && value <= bounds.max, "{} outside {:?}", value, bounds);
        }
    }
}

#[test]
fn projection_round_trips_within_tolerance() {
    let mut plot = plot(ParallelCoordinatesOptions::default());
    let data = abc();
    plot.try_render(&data).unwrap();

    let projector = *plot.projector().unwrap();
    for (d, bounds) in plot.bounds().unwrap().iter().enumerate() {
        for value in data.column(d) {
            let y = projector.value_to_y(bounds, value);
            assert!((projector.y_to_value(bounds, y) - value).abs() < 1e-9);
        }
    }
}

#[test]
fn mean_of_symmetric_records() {
    let data = Dataset::new(
        vec!["p", "q", "r"],
        vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0], vec![2.0, 2.0, 2.0]],
    );
    assert_eq!(column_means(&data.columns()), vec![2.0, 2.0, 2.0]);

    let mut plot = plot(ParallelCoordinatesOptions {
        show_mean: true,
        ..Default::default()
    });
    let scene = plot.try_render(&data).unwrap();
    let mean = scene.group(GroupKey::Mean).unwrap();
    assert_eq!(mean.lines().count(), 2);

    let projector = *plot.projector().unwrap();
    let bounds = plot.bounds().unwrap();
    for (position, line) in mean.lines().enumerate() {
        let Shape::Line { x1, y1, x2, y2 } = line.shape else {
            unreachable!()
        };
        assert_eq!(
            (x1, y1),
            (projector.axis_x(position), projector.value_to_y(&bounds[position], 2.0))
        );
        assert_eq!(
            (x2, y2),
            (projector.axis_x(position + 1), projector.value_to_y(&bounds[position + 1], 2.0))
        );
    }
}

#[test]
fn histogram_counts_sum_to_record_count() {
    let data = Dataset::new(
        vec!["u", "v"],
        vec![
            vec![0.0, 10.0],
            vec![2.5, 10.0],
            vec![5.0, 11.0],
            vec![7.5, 12.0],
            vec![10.0, 19.0],
        ],
    );
    for partition in [1, 4, 10] {
        for d in 0..2 {
            let bounds = Bounds::from_values(&data.column(d), 360.0, 20.0);
            let histogram = Histogram::compute(&data.column(d), &bounds, partition);
            let sum: usize = histogram.buckets.iter().map(|b| b.count).sum();
            assert_eq!(sum, data.record_count());
        }
    }
}

// Bucket width is (max - min + tick step) / partition, which over-spans the
// axis by one tick step.
#[test]
fn histogram_bucket_width_over_spans_axis() {
    let bounds = Bounds::fixed(0.0, 10.0, 2.5);
    let histogram = Histogram::compute(&[10.0], &bounds, 5);
    assert_eq!(histogram.step, 2.5);
    assert_eq!(histogram.buckets.last().unwrap().high, 12.5);
    assert_eq!(histogram.buckets[4].count, 1);
}

#[test]
fn ruler_threshold_hides_out_of_range_records() {
    let data = Dataset::new(vec!["A", "B"], vec![vec![1.0, 0.0], vec![5.0, 0.0]]);
    let mut plot = plot(ParallelCoordinatesOptions::default());
    plot.try_render(&data).unwrap();

    let dims = &mut plot.state_mut().dimensions;
    dims.set_threshold(0, Bound::Min, 2.0);
    dims.set_threshold(0, Bound::Max, 8.0);
    let bounds = vec![Bounds::fixed(0.0, 10.0, 1.0), Bounds::fixed(0.0, 1.0, 1.0)];

    let visible = filter_records(&data, &plot.state().dimensions, &bounds);
    assert_eq!(visible, vec![false, true]);
}

#[test]
fn ruler_drag_release_and_rerender() {
    let data = Dataset::new(
        vec!["A", "B"],
        vec![vec![0.0, 1.0], vec![4.0, 1.0], vec![9.0, 1.0]],
    );
    let mut plot = plot(ParallelCoordinatesOptions {
        use_rulers: true,
        ..Default::default()
    });
    let filtered = Arc::new(Mutex::new(Vec::new()));
    let sink = filtered.clone();
    plot.events()
        .subscribe_fn(move |e: &RecordsFiltered| sink.lock().push((e.visible, e.hidden)));

    let mut scene = plot.try_render(&data).unwrap();
    assert_eq!(*filtered.lock(), vec![(3, 0)]);

    // raise the min marker of A to the middle of the axis
    let rect = *plot.projector().unwrap().rect();
    assert!(plot.begin_ruler_drag(0, Bound::Min));
    plot.drag_ruler(rect.mid_y(), &mut scene).unwrap();

    // moving is visual only
    assert_eq!(plot.state().dimensions.threshold(0, Bound::Min), Some(0.0));

    let release = plot.release_ruler(&data, &mut scene).unwrap();
    assert_eq!(release.bound, Bound::Min);
    assert_eq!(plot.state().visible_records, vec![false, false, true]);
    assert!(scene.group(GroupKey::Series(0)).unwrap().hidden);
    assert_eq!(filtered.lock().last(), Some(&(1, 2)));

    let svg = scene_to_svg(&scene);
    assert_eq!(svg.matches("style=\"display: none\"").count(), 2);

    let rerendered = plot.render(&data);
    assert!(rerendered.group(GroupKey::Series(1)).unwrap().hidden);
    assert!(!rerendered.group(GroupKey::Series(2)).unwrap().hidden);
}

#[test]
fn deserialized_ragged_dataset_renders() {
    let data: Dataset = serde_json::from_str(
        r#"{"labels":["a","b","c"],"records":[{"values":[1,2,3]},{"values":[4]}]}"#,
    )
    .unwrap();
    let mut plot = plot(ParallelCoordinatesOptions::default());

    let scene = plot.try_render(&data).unwrap();
    assert_eq!(scene.series_groups().count(), 2);
    for (_, group) in scene.series_groups() {
        assert_eq!(group.lines().count(), 2);
    }
}

#[test]
fn single_dimension_renders_nothing() {
    let data = Dataset::new(vec!["only"], vec![vec![1.0], vec![2.0]]);
    let mut plot = plot(ParallelCoordinatesOptions::default());
    assert!(plot.try_render(&data).is_err());
    assert!(plot.render(&data).is_empty());
}
