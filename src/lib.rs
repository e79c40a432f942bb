//! potflow - 2D potential flow
//!
//! Superposes point sources, point sinks and uniform streams into one
//! velocity field, then:
//! - traces streamlines from seed points (explicit Euler, capped step)
//! - advects tracer particles spawned at the same seeds
//!
//! Rendering and the window loop live in the `potflow` binary; this crate
//! is simulation only.

pub mod advection;
pub mod bounds;
pub mod config;
pub mod error;
pub mod field;
pub mod primitive;
pub mod seeds;
pub mod session;
pub mod streamline;
pub mod vector;
pub mod view;

pub use advection::{AdvectionEngine, TickReport};
pub use bounds::Bounds;
pub use config::Config;
pub use error::{ConfigError, FlowError};
pub use field::{FlowField, VelocityField};
pub use primitive::{velocity_function, FlowPrimitive, FlowPrimitiveKind};
pub use seeds::SeedGrid;
pub use session::Session;
pub use streamline::{trace_streamline, trace_streamline_within, Streamline, StreamlineParams};
pub use vector::Vector2;
pub use view::Viewport;
