//! Catalog of ready-made bodies
//!
//! The engine only ever sees finished `Body` values; the catalog is a
//! convenience for whoever authors them.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point2, Vector2};

use crate::body::{Atmosphere, Body};
use crate::error::{BodyError, PresetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Sun,
    Earth,
    Moon,
    Mars,
    Venus,
    Iss,
    Cat,
}

/// Physical constants of a preset (SI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetConstants {
    pub mass: f64,
    pub radius: f64,
    pub atmosphere: Option<Atmosphere>,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Sun,
        Preset::Earth,
        Preset::Moon,
        Preset::Mars,
        Preset::Venus,
        Preset::Iss,
        Preset::Cat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Sun => "sun",
            Preset::Earth => "earth",
            Preset::Moon => "moon",
            Preset::Mars => "mars",
            Preset::Venus => "venus",
            Preset::Iss => "iss",
            Preset::Cat => "cat",
        }
    }

    pub fn constants(&self) -> PresetConstants {
        match self {
            Preset::Sun => PresetConstants {
                mass: 1.988e30,
                radius: 696_340_000.0,
                atmosphere: None,
            },
            Preset::Earth => PresetConstants {
                mass: 5.972e24,
                radius: 6_371_000.0,
                atmosphere: Some(Atmosphere::new(1.225, 6_371_000.0 + 100_000.0)),
            },
            Preset::Moon => PresetConstants {
                mass: 7.347_673_09e22,
                radius: 1_737_400.0,
                atmosphere: None,
            },
            Preset::Mars => PresetConstants {
                mass: 6.4171e23,
                radius: 3_389_100.0,
                atmosphere: Some(Atmosphere::new(0.02, 3_389_100.0 + 130_000.0)),
            },
            Preset::Venus => PresetConstants {
                mass: 4.8675e24,
                radius: 6_051_800.0,
                atmosphere: Some(Atmosphere::new(65.0, 6_051_800.0 + 250_000.0)),
            },
            Preset::Iss => PresetConstants {
                mass: 450_000.0,
                radius: 109.0,
                atmosphere: None,
            },
            Preset::Cat => PresetConstants {
                mass: 5.0,
                radius: 1.0,
                atmosphere: None,
            },
        }
    }

    /// Builds the preset body at `position` moving with `velocity`
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::presets::Preset;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let earth: Preset = "Earth".parse().unwrap();
    /// let body = earth.body(Point2::origin(), Vector2::zeros()).unwrap();
    ///
    /// assert_eq!(body.radius, 6_371_000.0);
    /// assert!(body.atmosphere.is_some());
    /// assert!("pluto".parse::<Preset>().is_err());
    /// ```
    pub fn body(&self, position: Point2<f64>, velocity: Vector2<f64>) -> Result<Body, BodyError> {
        let constants = self.constants();
        let body = Body::new(constants.mass, constants.radius, position, velocity)?;
        match constants.atmosphere {
            Some(atmosphere) => body.with_atmosphere(atmosphere),
            None => Ok(body),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| PresetError::Unknown(s.to_string()))
    }
}
