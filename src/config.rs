use std::path::Path;

use serde::Deserialize;

use crate::bounds::Bounds;
use crate::error::ConfigError;
use crate::primitive::FlowPrimitive;
use crate::seeds::{SeedGrid, MAX_SEEDS};
use crate::streamline::StreamlineParams;
use crate::vector::Vector2;

pub const DEFAULT_PATH: &str = "potflow.yaml";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub primitives: Vec<FlowPrimitive>,
    pub seeds: SeedGrid,
    pub simulation: SimulationConfig,
    pub streamline: StreamlineConfig,
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f64,
    /// Frames between particle spawns.
    pub spawn_interval: u64,
    pub bounds: Bounds,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    #[serde(flatten)]
    pub params: StreamlineParams,
    /// Draw streamlines from every seed.
    pub enabled: bool,
    /// Cut each streamline once it leaves `simulation.bounds`.
    pub stop_outside_bounds: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    /// World units per pixel.
    pub scale: f64,
    pub target_fps: usize,
}

impl Default for Config {
    /// Source and sink of equal strength one unit apart in a unit stream
    /// along +x: a closed Rankine oval around the pair.
    fn default() -> Self {
        Self {
            primitives: vec![
                FlowPrimitive::source(2.0, Vector2::new(0.0, 0.0)),
                FlowPrimitive::sink(2.0, Vector2::new(1.0, 0.0)),
                FlowPrimitive::uniform(1.0, 0.0),
            ],
            seeds: SeedGrid::default(),
            simulation: SimulationConfig::default(),
            streamline: StreamlineConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            spawn_interval: 5,
            bounds: Bounds::default(),
        }
    }
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            params: StreamlineParams::default(),
            enabled: false,
            stop_outside_bounds: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            scale: 1.0 / 100.0,
            target_fps: 60,
        }
    }
}

impl Config {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("simulation.dt", self.simulation.dt)?;
        if !self.simulation.bounds.is_ordered() {
            return Err(ConfigError::invalid("simulation.bounds", "min must not exceed max"));
        }
        positive("streamline.dt", self.streamline.params.dt)?;
        positive("streamline.max_step", self.streamline.params.max_step)?;
        if !(self.streamline.params.t_max >= 0.0) {
            return Err(ConfigError::invalid("streamline.t_max", "must be >= 0"));
        }
        positive("seeds.x_step", self.seeds.x_step)?;
        positive("seeds.y_step", self.seeds.y_step)?;
        if self.seeds.count().is_none() {
            return Err(ConfigError::invalid(
                "seeds",
                format!("bounds must be finite and the grid at most {MAX_SEEDS} seeds"),
            ));
        }
        positive("display.scale", self.display.scale)?;
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::invalid("display", "width and height must be non-zero"));
        }
        for (i, p) in self.primitives.iter().enumerate() {
            if !(p.strength >= 0.0) || !p.strength.is_finite() {
                return Err(ConfigError::invalid(
                    "primitives.strength",
                    format!("primitive {i} has strength {}; use the kind to flip direction", p.strength),
                ));
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive and finite, got {value}")))
    }
}

/// Parse and validate a YAML document.
pub fn from_yaml(path: &Path, contents: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_yaml(path, &contents)
}

/// Load `path` if it exists, otherwise defaults. A broken file is reported
/// and replaced by defaults rather than aborting.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        log::info!("{} not found; using defaults", path.display());
        return Config::default();
    }
    match load(path) {
        Ok(cfg) => {
            log::info!("loaded {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}
