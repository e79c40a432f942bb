use crate::advection::{AdvectionEngine, TickReport};
use crate::bounds::Bounds;
use crate::config::Config;
use crate::field::FlowField;
use crate::streamline::{Streamline, StreamlineParams};
use crate::vector::Vector2;

/// Everything one simulation run owns: the field, the seeds, the particle
/// pool and the frame counter. The host drives it with [`Session::tick`].
pub struct Session {
    field: FlowField,
    engine: AdvectionEngine,
    dt: f64,
    bounds: Bounds,
    streamline: StreamlineParams,
    stop_streamlines_outside: bool,
    frame: u64,
}

impl Session {
    pub fn new(cfg: &Config) -> Self {
        let field = FlowField::new(cfg.primitives.clone());
        let seeds = cfg.seeds.points();
        log::info!(
            "session: {} primitive(s), {} seed(s), dt={}, spawn every {} frame(s)",
            field.len(),
            seeds.len(),
            cfg.simulation.dt,
            cfg.simulation.spawn_interval,
        );
        Self {
            field,
            engine: AdvectionEngine::new(seeds, cfg.simulation.spawn_interval),
            dt: cfg.simulation.dt,
            bounds: cfg.simulation.bounds,
            streamline: cfg.streamline.params,
            stop_streamlines_outside: cfg.streamline.stop_outside_bounds,
            frame: 0,
        }
    }

    /// Advance to the next frame. Frames count from 1, so with the default
    /// interval of 5 the first batch appears on the fifth call.
    pub fn tick(&mut self) -> TickReport {
        self.frame += 1;
        self.tick_at(self.frame)
    }

    /// Run one tick with a host-supplied frame index. Does not touch the
    /// internal counter.
    pub fn tick_at(&mut self, index: u64) -> TickReport {
        self.engine.tick(index, &self.field, self.dt, &self.bounds)
    }

    /// One streamline per seed.
    pub fn streamlines(&self) -> Vec<Streamline> {
        self.engine
            .seeds()
            .iter()
            .map(|&s| {
                if self.stop_streamlines_outside {
                    Streamline::trace_within(&self.field, s, &self.streamline, &self.bounds)
                } else {
                    Streamline::trace(&self.field, s, &self.streamline)
                }
            })
            .collect()
    }

    /// Drop every particle and restart the frame count.
    pub fn reset(&mut self) {
        self.engine.clear();
        self.frame = 0;
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn particles(&self) -> &[Vector2] {
        self.engine.particles()
    }

    pub fn seeds(&self) -> &[Vector2] {
        self.engine.seeds()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
