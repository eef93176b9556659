//! Error types for the sandbox engine
//!
//! Construction errors are raised at the boundary (body creation, engine
//! configuration, preset lookup) so that numeric hazards never reach the
//! stepper. Step errors roll the whole tick back.

use std::error::Error;
use std::fmt;

use crate::body::BodyId;

/// Rejected body construction
#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    /// Mass must be positive and finite (kg)
    NonPositiveMass(f64),
    /// Radius must be positive and finite (m)
    NonPositiveRadius(f64),
    /// Position has a NaN or infinite component
    NonFinitePosition,
    /// Velocity has a NaN or infinite component
    NonFiniteVelocity,
    /// Sea-level density must be finite and not negative (kg/m³)
    InvalidAtmosphereDensity(f64),
    /// Atmosphere top (measured from the center) lies below the surface
    AtmosphereBelowSurface { top_altitude: f64, radius: f64 },
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::NonPositiveMass(mass) => {
                write!(f, "body mass must be positive and finite, got {mass}")
            }
            BodyError::NonPositiveRadius(radius) => {
                write!(f, "body radius must be positive and finite, got {radius}")
            }
            BodyError::NonFinitePosition => write!(f, "body position is not finite"),
            BodyError::NonFiniteVelocity => write!(f, "body velocity is not finite"),
            BodyError::InvalidAtmosphereDensity(density) => write!(
                f,
                "atmosphere sea-level density must be finite and >= 0, got {density}"
            ),
            BodyError::AtmosphereBelowSurface {
                top_altitude,
                radius,
            } => write!(
                f,
                "atmosphere top altitude {top_altitude} is below the body radius {radius}"
            ),
        }
    }
}

impl Error for BodyError {}

/// Rejected engine configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    Parse(serde_json::Error),
    /// A field holds a value outside its allowed range
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid engine configuration: {err}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "configuration field `{field}` is out of range: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Unknown entry in the preset catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    Unknown(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Unknown(name) => write!(f, "unknown preset `{name}`"),
        }
    }
}

impl Error for PresetError {}

/// Failure of an engine operation
#[derive(Debug)]
pub enum EngineError {
    /// A body was rejected at the boundary
    InvalidBody(BodyError),
    /// The engine was built from an invalid configuration
    InvalidConfig(ConfigError),
    /// A step produced NaN or infinite state for this body; the tick was discarded
    NonFiniteState { id: BodyId },
    /// The id counter reached the reserved sentinel
    IdsExhausted,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidBody(err) => write!(f, "invalid body: {err}"),
            EngineError::InvalidConfig(err) => write!(f, "{err}"),
            EngineError::NonFiniteState { id } => {
                write!(f, "step produced a non-finite state for body {}", id.0)
            }
            EngineError::IdsExhausted => write!(f, "no body ids left to assign"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::InvalidBody(err) => Some(err),
            EngineError::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BodyError> for EngineError {
    fn from(err: BodyError) -> Self {
        EngineError::InvalidBody(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidConfig(err)
    }
}
