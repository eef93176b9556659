//! Time integration for the sandbox
//!
//! A step is split in two phases: every body's next state is computed from
//! one immutable snapshot of the store, then all updates are written back
//! together. The result does not depend on the order bodies are stored in.

use nalgebra::{Point2, Vector2};

use crate::body::Body;
use crate::error::EngineError;
use crate::forces::ForceModel;
use crate::store::BodyStore;

/// A time integrator for the body store
pub trait Integrator: Send + Sync {
    /// Apply `acceleration` to one body and move it over a sub-step of
    /// scale `dt`
    ///
    /// This is the only place body state is advanced; the live stepper and
    /// the trajectory predictor both go through it.
    fn advance(&self, body: &mut Body, acceleration: Vector2<f64>, dt: f64);

    /// Advance every body in the store by one sub-step
    ///
    /// # Returns
    ///
    /// Whether any body's position or velocity changed. On error nothing has
    /// been written to the store.
    fn step(
        &self,
        store: &mut BodyStore,
        dt: f64,
        force: &dyn ForceModel,
    ) -> Result<bool, EngineError> {
        let snapshot = store.as_slice();

        // Phase 1: read-only
        let updates: Vec<(usize, Point2<f64>, Vector2<f64>)> = snapshot
            .iter()
            .enumerate()
            .filter(|(_, body)| !body.stationary)
            .map(|(i, body)| {
                let mut next = *body;
                self.advance(&mut next, force.acceleration(body, snapshot), dt);
                (i, next.position, next.velocity)
            })
            .collect();

        if let Some(&(i, _, _)) = updates
            .iter()
            .find(|(_, position, velocity)| !is_finite(position, velocity))
        {
            return Err(EngineError::NonFiniteState {
                id: snapshot[i].id,
            });
        }

        let moved = updates.iter().any(|&(i, position, velocity)| {
            snapshot[i].position != position || snapshot[i].velocity != velocity
        });

        // Phase 2: write back
        let bodies = store.as_mut_slice();
        for (i, position, velocity) in updates {
            bodies[i].position = position;
            bodies[i].velocity = velocity;
        }

        Ok(moved)
    }
}

fn is_finite(position: &Point2<f64>, velocity: &Vector2<f64>) -> bool {
    position.iter().chain(velocity.iter()).all(|c| c.is_finite())
}

/// Semi-implicit (symplectic) Euler
///
/// The velocity is updated first and the new velocity moves the body:
///
/// 1. v(t + dt) = v(t) + a(t)
/// 2. x(t + dt) = x(t) + v(t + dt) * dt
///
/// The full acceleration is applied whatever the sub-step scale; only the
/// position update is scaled. Stationary bodies are left untouched.
///
/// # Examples
///
/// ```
/// use orbital::body::Body;
/// use orbital::integrator::{Integrator, SemiImplicitEuler};
/// use nalgebra::{Point2, Vector2};
///
/// let mut body = Body::new(1.0, 1.0, Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
/// SemiImplicitEuler.advance(&mut body, Vector2::new(0.0, 2.0), 0.5);
///
/// assert_eq!(body.velocity, Vector2::new(1.0, 2.0));
/// assert_eq!(body.position, Point2::new(0.5, 1.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance(&self, body: &mut Body, acceleration: Vector2<f64>, dt: f64) {
        if body.stationary {
            return;
        }
        body.velocity += acceleration;
        body.position += body.velocity * dt;
    }
}
