//! Tracer particles carried by the flow.
//!
//! The engine owns the live particle pool and the seed points. One tick is
//! always spawn (when due), then advance, then cull: fresh particles move on
//! the frame they appear, and anything that left the box is gone before the
//! host draws.

use crate::bounds::Bounds;
use crate::field::VelocityField;
use crate::vector::Vector2;

pub struct AdvectionEngine {
    particles: Vec<Vector2>,
    seeds: Vec<Vector2>,
    /// Ticks between spawns; 0 disables spawning.
    spawn_interval: u64,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub culled: usize,
    pub alive: usize,
}

impl AdvectionEngine {
    pub fn new(seeds: Vec<Vector2>, spawn_interval: u64) -> Self {
        Self { particles: Vec::new(), seeds, spawn_interval }
    }

    pub fn particles(&self) -> &[Vector2] {
        &self.particles
    }

    pub fn seeds(&self) -> &[Vector2] {
        &self.seeds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Whether tick `index` spawns a batch.
    pub fn spawn_due(&self, index: u64) -> bool {
        self.spawn_interval != 0 && index % self.spawn_interval == 0
    }

    /// Add one particle at every seed point, in seed order.
    pub fn spawn(&mut self) -> usize {
        self.particles.extend_from_slice(&self.seeds);
        self.seeds.len()
    }

    /// One explicit Euler step for every particle against the same field.
    /// Never changes the pool size.
    pub fn advance<F: VelocityField + ?Sized>(&mut self, field: &F, dt: f64) {
        for p in self.particles.iter_mut() {
            let v = field.velocity_at(*p);
            *p = *p + dt * v;
        }
    }

    /// Drop every particle outside `bounds`; survivors keep their order.
    /// Returns how many were removed.
    pub fn cull(&mut self, bounds: &Bounds) -> usize {
        let before = self.particles.len();
        self.particles.retain(|&p| bounds.contains(p));
        before - self.particles.len()
    }

    /// Spawn if due, advance, cull.
    pub fn tick<F: VelocityField + ?Sized>(&mut self, index: u64, field: &F, dt: f64, bounds: &Bounds) -> TickReport {
        let spawned = if self.spawn_due(index) { self.spawn() } else { 0 };
        self.advance(field, dt);
        let culled = self.cull(bounds);
        if spawned > 0 || culled > 0 {
            log::trace!("tick {index}: +{spawned} -{culled} ({} alive)", self.particles.len());
        }
        TickReport { spawned, culled, alive: self.particles.len() }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
