//! Engine configuration
//!
//! Every field has a default, so a configuration document only needs the
//! values it overrides:
//!
//! ```json
//! {
//!   "atmosphericDrag": true,
//!   "seed": 7,
//!   "debris": { "enabled": true, "fragmentMass": 250.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::forces::G;
use crate::forces::drag::SPHERE_DRAG_COEFFICIENT;

/// Steps between two recorded samples of a predicted path
pub const DEFAULT_PREDICTION_INTERVAL: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub gravitational_constant: f64,
    /// Whether atmospheres slow down bodies passing through them
    pub atmospheric_drag: bool,
    pub drag_coefficient: f64,
    /// Integration steps between recorded path samples
    pub prediction_interval: usize,
    /// Seed for the debris random source
    pub seed: u64,
    pub debris: DebrisConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            atmospheric_drag: true,
            drag_coefficient: SPHERE_DRAG_COEFFICIENT,
            prediction_interval: DEFAULT_PREDICTION_INTERVAL,
            seed: 0,
            debris: DebrisConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration document
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::config::EngineConfig;
    ///
    /// let config = EngineConfig::from_json(r#"{ "seed": 7, "debris": { "enabled": true } }"#)
    ///     .unwrap();
    /// assert_eq!(config.seed, 7);
    /// assert!(config.debris.enabled);
    /// assert_eq!(config.debris.fragment_mass, 100.0);
    ///
    /// assert!(EngineConfig::from_json(r#"{ "dragCoefficient": -1.0 }"#).is_err());
    /// ```
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravitationalConstant", self.gravitational_constant)?;
        non_negative("dragCoefficient", self.drag_coefficient)?;
        if self.prediction_interval == 0 {
            return Err(ConfigError::OutOfRange {
                field: "predictionInterval",
                value: 0.0,
            });
        }
        self.debris.validate()
    }
}

/// Fragmentation of high-energy merges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebrisConfig {
    pub enabled: bool,
    /// An input spalls when its speed exceeds `merged radius × factor`
    pub penetration_factor: f64,
    /// Mass of one fragment (kg)
    pub fragment_mass: f64,
    /// Radius of one fragment (m)
    pub fragment_radius: f64,
    /// Per-axis velocity scale range for fragments
    pub jitter_min: f64,
    pub jitter_max: f64,
    /// Upper bound on fragments spalled from one input; unbounded when unset
    pub max_fragments_per_body: Option<usize>,
}

impl Default for DebrisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            penetration_factor: 0.25,
            fragment_mass: 100.0,
            fragment_radius: 10.0,
            jitter_min: 0.25,
            jitter_max: 1.25,
            max_fragments_per_body: None,
        }
    }
}

impl DebrisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("debris.penetrationFactor", self.penetration_factor)?;
        positive("debris.fragmentMass", self.fragment_mass)?;
        positive("debris.fragmentRadius", self.fragment_radius)?;
        non_negative("debris.jitterMin", self.jitter_min)?;
        non_negative("debris.jitterMax", self.jitter_max)?;
        if self.jitter_max < self.jitter_min {
            return Err(ConfigError::OutOfRange {
                field: "debris.jitterMax",
                value: self.jitter_max,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
