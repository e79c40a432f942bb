//! Streamline tracing by fixed-step explicit Euler.
//!
//! Each step moves `dt · v`, except that the displacement is capped at
//! `max_step` by rescaling the delta vector. Velocity is unbounded near a
//! source or sink, so without the cap a single step could fling the path
//! across the domain.

use serde::Deserialize;

use crate::bounds::Bounds;
use crate::field::VelocityField;
use crate::vector::Vector2;

/// Integration parameters for one streamline.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreamlineParams {
    pub dt: f64,
    /// Total integration time; the step count is `floor(t_max / dt)`.
    pub t_max: f64,
    /// Largest displacement allowed in a single step, in world units.
    pub max_step: f64,
}

impl Default for StreamlineParams {
    fn default() -> Self {
        Self { dt: 0.01, t_max: 100.0, max_step: 0.01 }
    }
}

impl StreamlineParams {
    /// Number of Euler steps. Zero for non-positive or non-finite input.
    pub fn steps(&self) -> usize {
        let n = self.t_max / self.dt;
        if self.dt > 0.0 && n.is_finite() && n > 0.0 {
            n.floor() as usize
        } else {
            0
        }
    }
}

/// Scale `delta` down to length `max_step` if it is longer. Direction kept.
/// A non-finite delta is treated as no movement.
pub fn clamp_step(delta: Vector2, max_step: f64) -> Vector2 {
    if !delta.is_finite() {
        return Vector2::ZERO;
    }
    let len = delta.magnitude();
    if len <= max_step {
        return delta;
    }
    if len.is_finite() {
        return (max_step / len) * delta;
    }
    // |delta| overflowed: shrink the components first, then rescale.
    let big = delta.x.abs().max(delta.y.abs());
    let unit = Vector2::new(delta.x / big, delta.y / big);
    (max_step / unit.magnitude()) * unit
}

/// Trace from `start`, handing every segment `(from, to)` to `emit`.
///
/// Always runs the full step count. Returns the final position.
pub fn trace_streamline<F, E>(field: &F, start: Vector2, params: &StreamlineParams, mut emit: E) -> Vector2
where
    F: VelocityField + ?Sized,
    E: FnMut(Vector2, Vector2),
{
    let mut current = start;
    for _ in 0..params.steps() {
        let next = euler_step(field, current, params);
        emit(current, next);
        current = next;
    }
    current
}

/// Like [`trace_streamline`], but stops after the first segment that ends
/// outside `bounds`. That segment is still emitted.
///
/// Returns the final position and the number of steps taken.
pub fn trace_streamline_within<F, E>(
    field: &F,
    start: Vector2,
    params: &StreamlineParams,
    bounds: &Bounds,
    mut emit: E,
) -> (Vector2, usize)
where
    F: VelocityField + ?Sized,
    E: FnMut(Vector2, Vector2),
{
    let mut current = start;
    let mut taken = 0;
    for _ in 0..params.steps() {
        let next = euler_step(field, current, params);
        emit(current, next);
        current = next;
        taken += 1;
        if !bounds.contains(current) {
            break;
        }
    }
    (current, taken)
}

#[inline]
fn euler_step<F: VelocityField + ?Sized>(field: &F, current: Vector2, params: &StreamlineParams) -> Vector2 {
    let v = field.velocity_at(current);
    current + clamp_step(params.dt * v, params.max_step)
}

/// A traced path stored as a polyline: the seed followed by one point per step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Streamline {
    pub points: Vec<Vector2>,
}

impl Streamline {
    pub fn trace<F: VelocityField + ?Sized>(field: &F, start: Vector2, params: &StreamlineParams) -> Self {
        let mut points = Vec::with_capacity(params.steps() + 1);
        points.push(start);
        trace_streamline(field, start, params, |_, to| points.push(to));
        Self { points }
    }

    /// Traced path, cut short once it leaves `bounds`.
    pub fn trace_within<F: VelocityField + ?Sized>(
        field: &F,
        start: Vector2,
        params: &StreamlineParams,
        bounds: &Bounds,
    ) -> Self {
        let mut points = vec![start];
        trace_streamline_within(field, start, params, bounds, |_, to| points.push(to));
        Self { points }
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn end(&self) -> Option<Vector2> {
        self.points.last().copied()
    }
}
