//! Aggregate overlays: mean line and per-axis histograms

use pcoord_core::{DrawGeometry, DrawKind};
use pcoord_render::{GroupKey, Scene};

use super::bounds::Bounds;
use super::records::{line_geometry, record_points};
use super::RenderPass;
use crate::plots::utils::column_means;

/// Share of the axis spacing a full-width histogram bar takes
const HISTOGRAM_BAR_SHARE: f64 = 0.8;

/// One histogram bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

impl Bucket {
    pub fn label(&self) -> String {
        format!("{:.2} - {:.2}:", self.low, self.high)
    }
}

/// Value distribution of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bucket width
    pub step: f64,
    /// Buckets from the lowest values up
    pub buckets: Vec<Bucket>,
    pub total: usize,
}

impl Histogram {
    /// Count `values` into `num_steps` buckets spanning the dimension bounds.
    ///
    /// The bucket width is `(max - min + bounds.step) / num_steps`, so the
    /// buckets reach one tick step past `max`.
    pub fn compute(values: &[f64], bounds: &Bounds, num_steps: usize) -> Self {
        let num_steps = num_steps.max(1);
        let step = (bounds.max - bounds.min + bounds.step) / num_steps as f64;

        let mut buckets: Vec<Bucket> = (0..num_steps)
            .map(|b| {
                let low = bounds.min + b as f64 * step;
                Bucket { low, high: low + step, count: 0 }
            })
            .collect();

        for &value in values {
            let index = if value <= bounds.min || step <= 0.0 {
                0
            } else {
                ((value - bounds.min) / step).floor() as usize
            };
            buckets[index.min(num_steps - 1)].count += 1;
        }

        Self {
            step,
            buckets,
            total: values.len(),
        }
    }

    /// Bar length relative to the full width for a bucket
    pub fn share(&self, bucket: &Bucket) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            bucket.count as f64 / self.total as f64
        }
    }
}

/// Draw the column means as a single polyline
pub(crate) fn draw_mean_line(pass: &RenderPass<'_>, scene: &mut Scene) {
    if pass.dataset.records.is_empty() {
        return;
    }
    let classes = &pass.options.class_names;
    let means = column_means(&pass.dataset.columns());
    let points =
        record_points(&pass.projector, pass.bounds, &pass.dimensions.dimension_index, &means);
    let line_class = format!("{} {}", classes.line, classes.mean);

    let group = scene.add_group(Some(GroupKey::Mean), classes.mean.as_str());
    for (i, pair) in points.windows(2).enumerate() {
        group.line(pair[0], pair[1], line_class.as_str());

        let mut event =
            pass.draw_event(DrawKind::Line, &line_class, line_geometry(pair[0], pair[1]));
        event.index = i;
        event.dimension = Some(pass.dimensions.dimension_index[i + 1]);
        pass.emit(event);
    }
}

/// Draw a histogram next to every displayed axis
pub(crate) fn draw_histograms(pass: &RenderPass<'_>, scene: &mut Scene) {
    let classes = &pass.options.class_names;
    let num_steps = pass.options.histogram_partition.max(1);
    let rect = *pass.projector.rect();
    let bar_height = rect.height() / num_steps as f64;
    let max_width = pass.projector.axis_spacing() * HISTOGRAM_BAR_SHARE;

    for (position, &dimension) in pass.dimensions.dimension_index.iter().enumerate() {
        let Some(bounds) = pass.bounds.get(dimension) else {
            continue;
        };
        let histogram = Histogram::compute(&pass.dataset.column(dimension), bounds, num_steps);
        let x = pass.projector.axis_x(position);

        let group =
            scene.add_group(Some(GroupKey::Histogram(dimension)), classes.histogram.as_str());
        group.attr("ct:dimension", pass.dimensions.display[position].as_str());

        for (b, bucket) in histogram.buckets.iter().enumerate() {
            if bucket.count == 0 {
                continue;
            }
            let y = rect.top() + (num_steps - 1 - b) as f64 * bar_height;
            let width = histogram.share(bucket) * max_width;
            group
                .rect(x, y, width, bar_height, classes.histogram_bar.as_str())
                .attr("ct:value", bucket.count.to_string());

            let mut event = pass.draw_event(
                DrawKind::Rect,
                &classes.histogram_bar,
                DrawGeometry::Rect { x, y, width, height: bar_height },
            );
            event.index = b;
            event.dimension = Some(dimension);
            pass.emit(event);

            let text = bucket.label();
            group.text(
                text.as_str(),
                x + 2.0,
                y,
                max_width,
                bar_height,
                classes.histogram_label.as_str(),
            );

            let mut event = pass.draw_event(
                DrawKind::Label,
                &classes.histogram_label,
                DrawGeometry::Label { x: x + 2.0, y, width: max_width, height: bar_height, text },
            );
            event.index = b;
            event.dimension = Some(dimension);
            pass.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_width_includes_tick_step() {
        // (10 - 0 + 2) / 4
        let bounds = Bounds::fixed(0.0, 10.0, 2.0);
        let histogram = Histogram::compute(&[0.0, 2.9, 3.0, 10.0], &bounds, 4);
        assert_eq!(histogram.step, 3.0);
        let counts: Vec<usize> = histogram.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 1]);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let bounds = Bounds::from_values(&[-3.2, 7.7, 1.1, 0.0, 5.5, 7.7], 300.0, 20.0);
        let values = [-3.2, 7.7, 1.1, 0.0, 5.5, 7.7];
        for steps in [1, 3, 10, 25] {
            let histogram = Histogram::compute(&values, &bounds, steps);
            let sum: usize = histogram.buckets.iter().map(|b| b.count).sum();
            assert_eq!(sum, values.len());
            assert_eq!(histogram.buckets.len(), steps);
        }
    }

    #[test]
    fn test_values_at_or_below_min_land_in_first_bucket() {
        let bounds = Bounds::fixed(5.0, 10.0, 1.0);
        let histogram = Histogram::compute(&[5.0, 4.0], &bounds, 3);
        assert_eq!(histogram.buckets[0].count, 2);
    }

    #[test]
    fn test_zero_partition_is_one_bucket() {
        let bounds = Bounds::fixed(0.0, 1.0, 1.0);
        let histogram = Histogram::compute(&[0.5], &bounds, 0);
        assert_eq!(histogram.buckets.len(), 1);
        assert_eq!(histogram.share(&histogram.buckets[0]), 1.0);
    }

    #[test]
    fn test_bucket_label() {
        let bucket = Bucket { low: 0.0, high: 1.25, count: 3 };
        assert_eq!(bucket.label(), "0.00 - 1.25:");
    }
}
