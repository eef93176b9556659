//! 2D gravitational sandbox engine
//!
//! Bodies attract each other with direct pairwise gravity, slow down inside
//! atmospheres, merge when they touch and, optionally, spall debris when
//! they hit hard. Paths can be previewed without touching the live state.

pub mod body;
pub mod collisions;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod forces;
pub mod integrator;
pub mod prediction;
pub mod presets;
pub mod store;

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod prediction_test;
#[cfg(test)]
mod presets_test;

pub use body::{Atmosphere, Body, BodyId, Contact};
pub use config::{DebrisConfig, EngineConfig};
pub use engine::Engine;
pub use error::{BodyError, ConfigError, EngineError, PresetError};
pub use events::{ChangeKind, EngineEvent, EngineObserver};
pub use presets::Preset;
