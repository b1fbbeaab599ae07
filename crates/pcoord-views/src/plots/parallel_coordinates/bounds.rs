//! Per-dimension axis bounds with "nice" tick steps

use pcoord_data::Dataset;

use crate::plots::utils::min_max;

/// Upper limit on step doubling/halving rounds
const MAX_REFINEMENTS: usize = 64;

/// Axis range of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// Smallest data value (after the equal-values fix)
    pub low: f64,
    /// Largest data value (after the equal-values fix)
    pub high: f64,
    /// Axis minimum, aligned to `step`
    pub min: f64,
    /// Axis maximum
    pub max: f64,
    /// Distance between ticks
    pub step: f64,
    /// Tick values from `min` to `max`
    pub values: Vec<f64>,
}

impl Bounds {
    /// Compute bounds so that ticks are at least `scale_min_space` pixels apart
    /// on an axis `axis_length` pixels long.
    pub fn from_values(values: &[f64], axis_length: f64, scale_min_space: f64) -> Self {
        let (mut low, mut high) = min_max(values).unwrap_or((0.0, 0.0));

        if high == low {
            if low == 0.0 {
                high = 1.0;
            } else if low < 0.0 {
                high = 0.0;
            } else {
                low = 0.0;
            }
        }

        let order_of_magnitude = (high - low).log10().floor();
        let magnitude = 10f64.powf(order_of_magnitude);
        let min = (low / magnitude).floor() * magnitude;
        let max = (high / magnitude).ceil() * magnitude;
        let range = max - min;
        let mut step = magnitude;

        let project = |length: f64| length / range * axis_length;
        if axis_length > 0.0 && scale_min_space > 0.0 {
            let scale_up = project(step) < scale_min_space;
            for _ in 0..MAX_REFINEMENTS {
                if scale_up && project(step) <= scale_min_space {
                    step *= 2.0;
                } else if !scale_up && project(step / 2.0) >= scale_min_space {
                    step /= 2.0;
                } else {
                    break;
                }
            }
        }

        // Drop grid points that add nothing below `low` or above `high`
        let mut new_min = min;
        let mut new_max = max;
        for k in 0..=grid_count(min, max, step) {
            let i = min + k as f64 * step;
            if i + step < low {
                new_min += step;
            }
            if i - step >= high {
                new_max -= step;
            }
        }

        let min = clean(new_min, step).min(low);
        let max = clean(new_max, step).max(high);
        let values = (0..=grid_count(min, max, step))
            .map(|k| clean(min + k as f64 * step, step))
            .collect();

        Self { low, high, min, max, step, values }
    }

    /// Bounds with an explicit range and step
    pub fn fixed(min: f64, max: f64, step: f64) -> Self {
        let values = if step > 0.0 && max >= min {
            (0..=grid_count(min, max, step))
                .map(|k| clean(min + k as f64 * step, step))
                .collect()
        } else {
            vec![min]
        };
        Self { low: min, high: max, min, max, step, values }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounds for every dimension of the dataset, hidden ones included
pub fn calculate_bounds(dataset: &Dataset, axis_length: f64, scale_min_space: f64) -> Vec<Bounds> {
    (0..dataset.dimension_count())
        .map(|d| Bounds::from_values(&dataset.column(d), axis_length, scale_min_space))
        .collect()
}

/// Index of the last grid point `min + k * step` not beyond `max`
fn grid_count(min: f64, max: f64, step: f64) -> usize {
    ((max - min) / step + 1e-9).floor().max(0.0) as usize
}

/// Strip floating point noise below the step's precision
fn clean(value: f64, step: f64) -> f64 {
    let decimals = (4.0 - step.abs().log10().floor()).clamp(0.0, 15.0);
    let scale = 10f64.powf(decimals);
    (value * scale).round() / scale
}
