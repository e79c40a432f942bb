use serde::Deserialize;

use crate::vector::Vector2;

/// Slack for the inclusive upper end so `-2.0 + 79 * 0.05` still reaches 1.95.
const RANGE_TOLERANCE: f64 = 1e-9;

/// Largest number of seeds a grid may produce, per axis and in total.
pub const MAX_SEEDS: usize = 100_000;

/// Rectangular lattice of seed points.
///
/// Both ranges include their end points. Points come out column by column:
/// outer loop over x, inner loop over y.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeedGrid {
    pub x_min: f64,
    pub x_max: f64,
    pub x_step: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_step: f64,
}

impl Default for SeedGrid {
    /// One column at x = -1 with 80 seeds from y = -2 to 1.95.
    fn default() -> Self {
        Self {
            x_min: -1.0,
            x_max: -1.0,
            x_step: 0.5,
            y_min: -2.0,
            y_max: 1.95,
            y_step: 0.05,
        }
    }
}

impl SeedGrid {
    /// Number of seeds [`points`](Self::points) yields, or `None` when a
    /// bound is not finite or the grid exceeds [`MAX_SEEDS`].
    pub fn count(&self) -> Option<usize> {
        let nx = axis_len(self.x_min, self.x_max, self.x_step)?;
        let ny = axis_len(self.y_min, self.y_max, self.y_step)?;
        nx.checked_mul(ny).filter(|&n| n <= MAX_SEEDS)
    }

    /// Seed positions, column by column. Empty for a grid that
    /// [`count`](Self::count) rejects.
    pub fn points(&self) -> Vec<Vector2> {
        if self.count().is_none() {
            log::warn!("seed grid {self:?} is unbounded or exceeds {MAX_SEEDS} seeds; no seeds placed");
            return Vec::new();
        }
        let xs = axis(self.x_min, self.x_max, self.x_step);
        let ys = axis(self.y_min, self.y_max, self.y_step);
        let mut out = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                out.push(Vector2::new(x, y));
            }
        }
        out
    }
}

/// Length of one axis. `None` for non-finite bounds or more than
/// [`MAX_SEEDS`] values.
fn axis_len(min: f64, max: f64, step: f64) -> Option<usize> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max < min {
        return Some(0);
    }
    if !(step > 0.0) || !step.is_finite() {
        return Some(1);
    }
    // An infinite span fails the comparison as well.
    let gaps = ((max - min) / step + RANGE_TOLERANCE).floor();
    if gaps < MAX_SEEDS as f64 { Some(gaps as usize + 1) } else { None }
}

/// `min + k * step` for every k landing at or below `max`.
/// Non-positive or non-finite steps produce only `min`.
fn axis(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = axis_len(min, max, step).unwrap_or(0);
    (0..count).map(|k| min + k as f64 * step).collect()
}
