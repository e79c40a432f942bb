use crate::primitive::{velocity_function, FlowPrimitive, FlowPrimitiveKind};
use crate::vector::Vector2;

/// Anything that can report a velocity at a world position.
///
/// The streamline tracer and the advection engine only see this trait, so
/// tests can drive them with hand-written fields.
pub trait VelocityField {
    fn velocity_at(&self, at: Vector2) -> Vector2;
}

/// Superposition of flow primitives.
///
/// Kept in insertion order for deterministic iteration; the sum does not
/// depend on it. Not mutated once a simulation is running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowField {
    primitives: Vec<FlowPrimitive>,
}

impl FlowField {
    pub fn new(primitives: Vec<FlowPrimitive>) -> Self {
        let unknown = primitives.iter().filter(|p| p.kind == FlowPrimitiveKind::Unknown).count();
        if unknown > 0 {
            log::warn!("{unknown} primitive(s) of unknown kind will contribute no velocity");
        }
        Self { primitives }
    }

    pub fn primitives(&self) -> &[FlowPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl VelocityField for FlowField {
    /// Sum of every primitive's contribution at `at`.
    fn velocity_at(&self, at: Vector2) -> Vector2 {
        self.primitives
            .iter()
            .fold(Vector2::ZERO, |acc, p| acc + velocity_function(p, at))
    }
}

impl FromIterator<FlowPrimitive> for FlowField {
    fn from_iter<I: IntoIterator<Item = FlowPrimitive>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn doublet() -> FlowField {
        FlowField::new(vec![
            FlowPrimitive::source(2.0, Vector2::new(0.0, 0.0)),
            FlowPrimitive::sink(2.0, Vector2::new(1.0, 0.0)),
        ])
    }

    #[test]
    fn test_empty_field_is_still() {
        let field = FlowField::default();
        assert!(field.is_empty());
        assert_eq!(field.velocity_at(Vector2::new(3.0, 4.0)), Vector2::ZERO);
    }

    #[test]
    fn test_superposition_is_additive() {
        let p1 = FlowPrimitive::source(1.3, Vector2::new(-0.5, 0.2));
        let p2 = FlowPrimitive::uniform(0.8, 1.1);
        let field = FlowField::new(vec![p1, p2]);
        for &(x, y) in &[(0.0, 0.0), (2.0, -1.0), (-0.4, 0.25)] {
            let at = Vector2::new(x, y);
            let expected = Vector2::add(velocity_function(&p1, at), velocity_function(&p2, at));
            let got = field.velocity_at(at);
            assert!((got.x - expected.x).abs() < EPS);
            assert!((got.y - expected.y).abs() < EPS);
        }
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = FlowPrimitive::source(1.0, Vector2::new(0.0, 1.0));
        let b = FlowPrimitive::sink(0.5, Vector2::new(1.0, -1.0));
        let c = FlowPrimitive::uniform(2.0, -0.3);
        let f1: FlowField = [a, b, c].into_iter().collect();
        let f2: FlowField = [c, a, b].into_iter().collect();
        let at = Vector2::new(0.7, 0.1);
        let (v1, v2) = (f1.velocity_at(at), f2.velocity_at(at));
        assert!((v1.x - v2.x).abs() < EPS && (v1.y - v2.y).abs() < EPS);
    }

    #[test]
    fn test_source_scenario() {
        let field = FlowField::new(vec![FlowPrimitive::source(2.0, Vector2::ZERO)]);
        let v = field.velocity_at(Vector2::new(1.0, 0.0));
        assert!((v.x - 0.3183).abs() < 1e-4);
        assert!(v.y.abs() < EPS);
    }

    #[test]
    fn test_uniform_scenario() {
        let field = FlowField::new(vec![FlowPrimitive::uniform(1.0, 0.0)]);
        for &(x, y) in &[(0.0, 0.0), (-4.0, 3.0), (1e3, -1e3)] {
            let v = field.velocity_at(Vector2::new(x, y));
            assert!((v.x - 1.0).abs() < EPS && v.y.abs() < EPS);
        }
    }

    #[test]
    fn test_singular_point_is_finite() {
        let field = FlowField::new(vec![FlowPrimitive::source(2.0, Vector2::new(0.25, -0.5))]);
        let v = field.velocity_at(Vector2::new(0.25, -0.5));
        assert!(v.is_finite());
        assert_eq!(v, Vector2::ZERO);
    }

    #[test]
    fn test_singularity_does_not_poison_sum() {
        let mut ps = doublet().primitives().to_vec();
        ps.push(FlowPrimitive::uniform(1.0, 0.0));
        let field = FlowField::new(ps);
        // On the source: only the sink and the stream contribute.
        let v = field.velocity_at(Vector2::ZERO);
        assert!(v.is_finite());
        let sink_only = FlowPrimitive::sink(2.0, Vector2::new(1.0, 0.0)).velocity(Vector2::ZERO);
        assert!((v.x - (sink_only.x + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_subnormal_offset_from_source_keeps_sum_finite() {
        let field = FlowField::new(vec![
            FlowPrimitive::source(2.0, Vector2::ZERO),
            FlowPrimitive::uniform(1.0, 0.0),
        ]);
        let v = field.velocity_at(Vector2::new(1e-310, 0.0));
        assert_eq!(v, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_doublet_antisymmetric_about_midpoint() {
        // Along the axis, mirroring about x = 0.5 leaves the velocity unchanged
        // (both primitives push towards the sink); off axis, the y component flips.
        let field = doublet();
        for &(dx, y) in &[(0.25, 0.0), (0.8, 0.0), (2.0, 0.0), (0.3, 0.4), (1.5, -0.7)] {
            let left = field.velocity_at(Vector2::new(0.5 - dx, y));
            let right = field.velocity_at(Vector2::new(0.5 + dx, y));
            assert!((left.x - right.x).abs() < EPS, "x mismatch at dx={dx}, y={y}");
            assert!((left.y + right.y).abs() < EPS, "y mismatch at dx={dx}, y={y}");
        }
    }

    #[test]
    fn test_doublet_flow_between_points_heads_to_sink() {
        let v = doublet().velocity_at(Vector2::new(0.5, 0.0));
        assert!(v.x > 0.0);
        assert!(v.y.abs() < EPS);
    }
}
