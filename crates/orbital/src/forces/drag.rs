//! Atmospheric drag from bodies that carry an atmosphere

use nalgebra::Vector2;

use crate::body::Body;
use crate::forces::{ForceModel, interacting};

/// Drag coefficient of a sphere
pub const SPHERE_DRAG_COEFFICIENT: f64 = 0.47;

/// Linear atmospheric drag
///
/// Inside another body's atmosphere the deceleration is
/// `½·ρ·Cd·A/m·|v|`, opposite to the velocity, where `A` is the dragged
/// body's cross-section and `ρ` the exponential density at its distance
/// from the atmosphere's owner. The summed coefficient is capped at one so
/// drag can stop a body but never reverse it.
#[derive(Debug, Clone, Copy)]
pub struct AtmosphericDrag {
    pub drag_coefficient: f64,
}

impl AtmosphericDrag {
    pub fn new(drag_coefficient: f64) -> Self {
        Self { drag_coefficient }
    }

    /// Drag coefficient `½·ρ·Cd·A/m` contributed by `owner`'s atmosphere
    fn coefficient(&self, body: &Body, owner: &Body) -> f64 {
        let Some(atmosphere) = &owner.atmosphere else {
            return 0.0;
        };
        let distance = body.distance_to(owner);
        if distance > atmosphere.top_altitude {
            return 0.0;
        }
        let density = atmosphere.density_at(distance, owner.radius);
        0.5 * density * self.drag_coefficient * body.cross_section() / body.mass
    }
}

impl Default for AtmosphericDrag {
    fn default() -> Self {
        Self::new(SPHERE_DRAG_COEFFICIENT)
    }
}

impl ForceModel for AtmosphericDrag {
    fn acceleration(&self, body: &Body, sources: &[Body]) -> Vector2<f64> {
        if body.is_immune() || body.velocity == Vector2::zeros() {
            return Vector2::zeros();
        }

        let k: f64 = interacting(body, sources)
            .map(|owner| self.coefficient(body, owner))
            .sum();

        // |a| = k·|v| along -v̂, i.e. -k·v
        -body.velocity * k.min(1.0)
    }
}
