//! Direct pairwise gravity (O(N²))

use nalgebra::Vector2;

use crate::body::Body;
use crate::forces::{ForceModel, G, interacting};

/// Newtonian gravity summed over every interacting pair
///
/// Coincident centers contribute nothing: two bodies at zero distance are in
/// contact and the collision pass merges them in the same sub-step.
///
/// # Examples
///
/// ```
/// use orbital::body::{Body, BodyId};
/// use orbital::forces::{ForceModel, G, Gravity};
/// use nalgebra::{Point2, Vector2};
///
/// let mut earth = Body::new(5.0e24, 6.4e6, Point2::origin(), Vector2::zeros()).unwrap();
/// earth.id = BodyId(0);
/// let mut moon = Body::new(7.0e22, 1.7e6, Point2::new(3.84e8, 0.0), Vector2::zeros()).unwrap();
/// moon.id = BodyId(1);
///
/// let accel = Gravity::default().acceleration(&moon, &[earth.clone(), moon.clone()]);
/// let expected = G * earth.mass / 3.84e8_f64.powi(2);
/// assert!((accel.magnitude() - expected).abs() / expected < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Gravity {
    pub g: f64,
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(G)
    }
}

impl ForceModel for Gravity {
    fn acceleration(&self, body: &Body, sources: &[Body]) -> Vector2<f64> {
        if body.is_immune() {
            return Vector2::zeros();
        }

        interacting(body, sources)
            .filter_map(|other| {
                let dr = other.position - body.position;
                let r2 = dr.magnitude_squared();
                if r2 == 0.0 {
                    return None;
                }
                let r = r2.sqrt();
                Some(dr * (self.g * other.mass / (r2 * r)))
            })
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        // Each active pair counted once
        bodies
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_immune())
            .flat_map(|(i, a)| {
                bodies[i + 1..]
                    .iter()
                    .filter(|b| !b.is_immune())
                    .filter_map(move |b| {
                        let r = a.distance_to(b);
                        (r > 0.0).then(|| -self.g * a.mass * b.mass / r)
                    })
            })
            .sum()
    }
}

/// Velocity that puts `satellite` on a circular orbit around `anchor`
///
/// The orbit is counter-clockwise and the anchor's own velocity is added,
/// so the satellite keeps pace with a moving anchor. Coincident centers
/// return the anchor's velocity.
///
/// # Examples
///
/// ```
/// use orbital::body::Body;
/// use orbital::forces::{G, circular_orbit_velocity};
/// use nalgebra::{Point2, Vector2};
///
/// let earth = Body::new(5.972e24, 6.371e6, Point2::origin(), Vector2::zeros()).unwrap();
/// let iss = Body::new(4.5e5, 109.0, Point2::new(6.771e6, 0.0), Vector2::zeros()).unwrap();
///
/// let v = circular_orbit_velocity(&iss, &earth, G);
/// assert!(v.x.abs() < 1e-9);
/// assert!((v.y - 7_672.0).abs() < 5.0);
/// ```
pub fn circular_orbit_velocity(satellite: &Body, anchor: &Body, g: f64) -> Vector2<f64> {
    let offset = satellite.position - anchor.position;
    let distance = offset.magnitude();
    if distance == 0.0 {
        return anchor.velocity;
    }
    let speed = (g * anchor.mass / distance).sqrt();
    let tangent = Vector2::new(-offset.y, offset.x) / distance;
    anchor.velocity + tangent * speed
}
