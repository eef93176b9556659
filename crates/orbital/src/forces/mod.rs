//! Force models for the sandbox
//!
//! This module provides the `ForceModel` trait and the implementations the
//! engine combines every sub-step: Newtonian gravity and atmospheric drag.
//!
//! Accelerations are expressed per unit sub-step, so the integrator adds them
//! straight onto the velocity when the sub-step scale is 1.

use nalgebra::Vector2;

use crate::body::Body;

pub mod drag;
pub mod gravity;


pub use drag::AtmosphericDrag;
pub use gravity::{Gravity, circular_orbit_velocity};

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G: f64 = 6.674e-11;

/// A source of acceleration on bodies
///
/// # Examples
///
/// ```
/// use orbital::body::{Body, BodyId};
/// use orbital::forces::{ForceModel, Gravity};
/// use nalgebra::{Point2, Vector2};
///
/// let mut planet = Body::new(5.0e24, 6.0e6, Point2::origin(), Vector2::zeros()).unwrap();
/// planet.id = BodyId(0);
/// let mut probe = Body::new(1.0, 1.0, Point2::new(1.0e7, 0.0), Vector2::zeros()).unwrap();
/// probe.id = BodyId(1);
///
/// let accel = Gravity::default().acceleration(&probe, &[planet]);
/// assert!(accel.x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Acceleration on `body` from every body in `sources` it interacts with
    ///
    /// `body` may or may not be an element of `sources`; it never acts on
    /// itself either way.
    fn acceleration(&self, body: &Body, sources: &[Body]) -> Vector2<f64>;

    /// Potential energy contribution (J), zero for dissipative models
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}

/// Bodies in `sources` that can act on `body`
///
/// Excludes `body` itself (by address or by assigned id) and immune bodies.
pub(crate) fn interacting<'a>(
    body: &'a Body,
    sources: &'a [Body],
) -> impl Iterator<Item = &'a Body> + 'a {
    sources.iter().filter(move |other| {
        let same = std::ptr::eq(*other, body) || (body.id.is_assigned() && other.id == body.id);
        !same && !other.is_immune()
    })
}

/// Sum of several force models
///
/// # Examples
///
/// ```
/// use orbital::forces::{AtmosphericDrag, CompositeForce, Gravity};
///
/// let composite = CompositeForce::new()
///     .with_force(Gravity::default())
///     .with_force(AtmosphericDrag::default());
/// assert_eq!(composite.len(), 2);
/// ```
pub struct CompositeForce {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeForce {
    /// Creates an empty composite force
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Adds a force model to the composite
    pub fn with_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for CompositeForce {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for CompositeForce {
    fn acceleration(&self, body: &Body, sources: &[Body]) -> Vector2<f64> {
        self.models
            .iter()
            .map(|f| f.acceleration(body, sources))
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        self.models.iter().map(|f| f.potential_energy(bodies)).sum()
    }
}
