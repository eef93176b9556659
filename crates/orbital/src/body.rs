use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};

use crate::error::BodyError;

/// Opaque handle of a body in the store
///
/// Ids are handed out by the store from a monotonic counter and are never
/// reused. Bodies that have not been inserted yet carry
/// [`BodyId::UNASSIGNED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const UNASSIGNED: BodyId = BodyId(u32::MAX);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

/// Collision state of a body
///
/// An `Immune` body takes no part in gravity, drag or merging. It returns
/// to `Active` on the first collision scan that finds it overlapping nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contact {
    #[default]
    Active,
    Immune,
}

impl Contact {
    /// State after a collision scan that found `overlapping` neighbours
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::body::Contact;
    ///
    /// assert_eq!(Contact::Immune.after_scan(true), Contact::Immune);
    /// assert_eq!(Contact::Immune.after_scan(false), Contact::Active);
    /// assert_eq!(Contact::Active.after_scan(true), Contact::Active);
    /// ```
    pub fn after_scan(self, overlapping: bool) -> Contact {
        match self {
            Contact::Immune if overlapping => Contact::Immune,
            _ => Contact::Active,
        }
    }
}

/// Exponential atmosphere attached to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Density at the surface (kg/m³)
    pub sea_level_density: f64,
    /// Outer edge of the atmosphere, measured from the body's center (m)
    pub top_altitude: f64,
}

impl Atmosphere {
    pub fn new(sea_level_density: f64, top_altitude: f64) -> Self {
        Self {
            sea_level_density,
            top_altitude,
        }
    }

    /// Density at `distance` from the center of a body of `radius`
    ///
    /// ρ = ρ₀ · exp(−(d − R) / (top − R)). A zero-thickness atmosphere has
    /// its sea-level density everywhere inside the top altitude.
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::body::Atmosphere;
    ///
    /// let atm = Atmosphere::new(1.225, 6_471_000.0);
    /// assert_eq!(atm.density_at(6_371_000.0, 6_371_000.0), 1.225);
    /// assert!(atm.density_at(6_421_000.0, 6_371_000.0) < 1.225);
    /// ```
    pub fn density_at(&self, distance: f64, radius: f64) -> f64 {
        let thickness = self.top_altitude - radius;
        if thickness <= 0.0 {
            return self.sea_level_density;
        }
        let altitude = (distance - radius).max(0.0);
        self.sea_level_density * (-altitude / thickness).exp()
    }

    fn validate(&self, radius: f64) -> Result<(), BodyError> {
        if !self.sea_level_density.is_finite() || self.sea_level_density < 0.0 {
            return Err(BodyError::InvalidAtmosphereDensity(self.sea_level_density));
        }
        if !self.top_altitude.is_finite() || self.top_altitude < radius {
            return Err(BodyError::AtmosphereBelowSurface {
                top_altitude: self.top_altitude,
                radius,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub stationary: bool,
    pub position: Point2<f64>,  // m
    pub velocity: Vector2<f64>, // m per unit sub-step
    pub mass: f64,              // kg
    pub radius: f64,            // m
    pub contact: Contact,
    pub atmosphere: Option<Atmosphere>,
}

impl Body {
    /// Creates a validated, active, non-stationary body without atmosphere
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::body::{Body, BodyId};
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let moon = Body::new(7.35e22, 1.7374e6, Point2::new(3.84e8, 0.0), Vector2::new(0.0, 1022.0))
    ///     .unwrap();
    /// assert_eq!(moon.id, BodyId::UNASSIGNED);
    ///
    /// assert!(Body::new(0.0, 1.0, Point2::origin(), Vector2::zeros()).is_err());
    /// ```
    pub fn new(
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Result<Self, BodyError> {
        let body = Body {
            id: BodyId::UNASSIGNED,
            stationary: false,
            position,
            velocity,
            mass,
            radius,
            contact: Contact::Active,
            atmosphere: None,
        };
        body.validate()?;
        Ok(body)
    }

    /// Marks the body as stationary: it pulls on others but never moves
    pub fn stationary(mut self) -> Self {
        self.stationary = true;
        self
    }

    /// Starts the body immune, e.g. when it is spawned inside another body
    pub fn immune(mut self) -> Self {
        self.contact = Contact::Immune;
        self
    }

    /// Attaches an atmosphere, rejecting one whose top lies below the surface
    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Result<Self, BodyError> {
        atmosphere.validate(self.radius)?;
        self.atmosphere = Some(atmosphere);
        Ok(self)
    }

    /// Checks the construction invariants
    ///
    /// Fields are public, so the engine re-runs this on every add.
    pub fn validate(&self) -> Result<(), BodyError> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(BodyError::NonPositiveMass(self.mass));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(BodyError::NonPositiveRadius(self.radius));
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(BodyError::NonFinitePosition);
        }
        if !(self.velocity.x.is_finite() && self.velocity.y.is_finite()) {
            return Err(BodyError::NonFiniteVelocity);
        }
        if let Some(atmosphere) = &self.atmosphere {
            atmosphere.validate(self.radius)?;
        }
        Ok(())
    }

    pub fn is_immune(&self) -> bool {
        self.contact == Contact::Immune
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Cross-sectional area π r² (m²)
    pub fn cross_section(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Whether the two discs touch or overlap (boundary inclusive)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) <= self.radius + other.radius
    }
}
