use std::f64::consts::TAU;

use serde::Deserialize;

use crate::vector::Vector2;

/// Elementary potential-flow generators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPrimitiveKind {
    /// Radial outflow from a point.
    #[default]
    Source,
    /// Radial inflow towards a point.
    Sink,
    /// Constant stream in a fixed direction.
    Uniform,
    /// Anything a configuration file names that we don't know.
    /// Contributes nothing.
    #[serde(other)]
    Unknown,
}

/// One flow generator.
///
/// `position` only matters for sources and sinks, `direction` (radians)
/// only for uniform streams. `strength` is kept non-negative: whether the
/// flow goes in or out is decided by `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowPrimitive {
    pub kind: FlowPrimitiveKind,
    pub strength: f64,
    pub position: Vector2,
    pub direction: f64,
}

impl Default for FlowPrimitive {
    fn default() -> Self {
        Self {
            kind: FlowPrimitiveKind::Source,
            strength: 1.0,
            position: Vector2::ZERO,
            direction: 0.0,
        }
    }
}

impl FlowPrimitive {
    pub fn source(strength: f64, position: Vector2) -> Self {
        Self { kind: FlowPrimitiveKind::Source, strength, position, direction: 0.0 }
    }

    pub fn sink(strength: f64, position: Vector2) -> Self {
        Self { kind: FlowPrimitiveKind::Sink, strength, position, direction: 0.0 }
    }

    pub fn uniform(strength: f64, direction: f64) -> Self {
        Self { kind: FlowPrimitiveKind::Uniform, strength, position: Vector2::ZERO, direction }
    }

    /// Velocity this primitive alone induces at `at`.
    pub fn velocity(&self, at: Vector2) -> Vector2 {
        velocity_function(self, at)
    }
}

/// Dispatch on the primitive kind. Never fails: unknown kinds and points
/// sitting exactly on a singularity both yield the zero vector.
pub fn velocity_function(primitive: &FlowPrimitive, at: Vector2) -> Vector2 {
    match primitive.kind {
        FlowPrimitiveKind::Source => source_velocity(primitive, at),
        FlowPrimitiveKind::Sink => sink_velocity(primitive, at),
        FlowPrimitiveKind::Uniform => uniform_velocity(primitive),
        FlowPrimitiveKind::Unknown => Vector2::ZERO,
    }
}

/// `strength / (2π|r|)` along `r̂`, with `r = at - position`.
/// Zero wherever that is not representable: at `r = 0` and at subnormal
/// distances where `1/|r|` overflows.
fn source_velocity(primitive: &FlowPrimitive, at: Vector2) -> Vector2 {
    let r = at - primitive.position;
    let Ok(direction) = r.normalized() else {
        return Vector2::ZERO;
    };
    let v = (primitive.strength / (TAU * r.magnitude())) * direction;
    if v.is_finite() { v } else { Vector2::ZERO }
}

fn sink_velocity(primitive: &FlowPrimitive, at: Vector2) -> Vector2 {
    -source_velocity(primitive, at)
}

fn uniform_velocity(primitive: &FlowPrimitive) -> Vector2 {
    primitive.strength * Vector2::from_angle(primitive.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: Vector2, b: Vector2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_source_at_unit_distance() {
        let s = FlowPrimitive::source(2.0, Vector2::ZERO);
        let v = s.velocity(Vector2::new(1.0, 0.0));
        assert!((v.x - 2.0 / TAU).abs() < EPS);
        assert!(v.y.abs() < EPS);
        assert!((v.x - 0.3183).abs() < 1e-4);
    }

    #[test]
    fn test_source_points_outward_and_decays() {
        let s = FlowPrimitive::source(1.0, Vector2::new(1.0, 1.0));
        let near = s.velocity(Vector2::new(1.0, 2.0));
        let far = s.velocity(Vector2::new(1.0, 3.0));
        assert!(near.y > 0.0 && far.y > 0.0);
        assert!(near.x.abs() < EPS);
        // 1/r decay: twice as far, half as fast
        assert!((near.magnitude() - 2.0 * far.magnitude()).abs() < EPS);
    }

    #[test]
    fn test_sink_is_negated_source() {
        let pos = Vector2::new(0.3, -0.7);
        let source = FlowPrimitive::source(1.7, pos);
        let sink = FlowPrimitive::sink(1.7, pos);
        for &(x, y) in &[(1.0, 0.0), (-2.0, 3.5), (0.31, -0.69), (10.0, 10.0)] {
            let at = Vector2::new(x, y);
            assert!(close(sink.velocity(at), Vector2::multiply(-1.0, source.velocity(at))));
        }
    }

    #[test]
    fn test_uniform_is_constant() {
        let u = FlowPrimitive::uniform(1.5, 0.4);
        let a = u.velocity(Vector2::new(-3.0, 2.0));
        let b = u.velocity(Vector2::new(100.0, -50.0));
        assert_eq!(a, b);
        assert!((a.magnitude() - 1.5).abs() < EPS);
    }

    #[test]
    fn test_uniform_direction_zero() {
        let u = FlowPrimitive::uniform(1.0, 0.0);
        assert!(close(u.velocity(Vector2::new(4.0, -1.0)), Vector2::new(1.0, 0.0)));
    }

    #[test]
    fn test_singularity_yields_zero() {
        let pos = Vector2::new(0.5, 0.5);
        for p in [FlowPrimitive::source(2.0, pos), FlowPrimitive::sink(2.0, pos)] {
            let v = p.velocity(pos);
            assert_eq!(v, Vector2::ZERO);
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_subnormal_distance_yields_zero() {
        let pos = Vector2::ZERO;
        for p in [FlowPrimitive::source(2.0, pos), FlowPrimitive::sink(2.0, pos)] {
            for at in [Vector2::new(1e-310, 0.0), Vector2::new(0.0, -5e-324), Vector2::new(1e-309, 1e-309)] {
                let v = p.velocity(at);
                assert!(v.is_finite(), "{:?} at {at:?} gave {v:?}", p.kind);
            }
        }
    }

    #[test]
    fn test_tiny_but_normal_distance_stays_radial() {
        let s = FlowPrimitive::source(1.0, Vector2::ZERO);
        let v = s.velocity(Vector2::new(1e-200, 0.0));
        assert!(v.is_finite());
        assert!(v.x > 0.0 && v.y == 0.0);
    }

    #[test]
    fn test_unknown_kind_yields_zero() {
        let p = FlowPrimitive { kind: FlowPrimitiveKind::Unknown, ..FlowPrimitive::default() };
        assert_eq!(p.velocity(Vector2::new(1.0, 1.0)), Vector2::ZERO);
    }

    #[test]
    fn test_deserialize_kinds() {
        let p: FlowPrimitive = serde_yaml::from_str("kind: sink\nstrength: 2.0\nposition: { x: 1.0, y: 0.0 }").unwrap();
        assert_eq!(p, FlowPrimitive::sink(2.0, Vector2::new(1.0, 0.0)));

        let p: FlowPrimitive = serde_yaml::from_str("kind: uniform\nstrength: 1.0\ndirection: 0.5").unwrap();
        assert_eq!(p, FlowPrimitive::uniform(1.0, 0.5));
    }

    #[test]
    fn test_deserialize_unrecognized_kind() {
        let p: FlowPrimitive = serde_yaml::from_str("kind: vortex\nstrength: 3.0").unwrap();
        assert_eq!(p.kind, FlowPrimitiveKind::Unknown);
        assert_eq!(p.velocity(Vector2::new(2.0, 2.0)), Vector2::ZERO);
    }
}
