//! Debris spalled from high-energy merges

use nalgebra::Vector2;
use rand::Rng;

use crate::body::{Body, BodyId, Contact};
use crate::config::DebrisConfig;

/// Spall fragments off a freshly computed merge result
///
/// Every non-stationary input faster than `merged.radius × penetration_factor`
/// throws `floor(speed)` fragments, at most `max_fragments_per_body` when
/// that is set. Each fragment's mass is taken from `merged`; spalling stops
/// for good as soon as the remaining mass would drop to twice a fragment's
/// mass or below.
/// Fragments start at the merge center, immune, with the input's velocity
/// scaled per axis by a factor drawn from `[jitter_min, jitter_max]`.
///
/// The fragments are returned without ids; the caller inserts them once the
/// collision scan has settled.
///
/// # Examples
///
/// ```
/// use orbital::body::Body;
/// use orbital::collisions::{generate_debris, merge_bodies};
/// use orbital::body::BodyId;
/// use orbital::config::DebrisConfig;
/// use nalgebra::{Point2, Vector2};
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let fast = Body::new(1.0e6, 2.0, Point2::new(0.0, 0.0), Vector2::new(5.5, 0.0)).unwrap();
/// let slow = Body::new(1.0e6, 2.0, Point2::new(3.0, 0.0), Vector2::zeros()).unwrap();
/// let inputs = [fast, slow];
///
/// let mut merged = merge_bodies(&inputs, BodyId::UNASSIGNED);
/// let config = DebrisConfig { enabled: true, ..DebrisConfig::default() };
/// let mut rng = ChaChaRng::seed_from_u64(42);
///
/// let fragments = generate_debris(&inputs, &mut merged, &config, &mut rng);
/// assert_eq!(fragments.len(), 5);
/// assert_eq!(merged.mass, 2.0e6 - 500.0);
/// ```
pub fn generate_debris<R: Rng>(
    inputs: &[Body],
    merged: &mut Body,
    config: &DebrisConfig,
    rng: &mut R,
) -> Vec<Body> {
    let threshold = merged.radius * config.penetration_factor;
    let mut fragments = Vec::new();

    for input in inputs.iter().filter(|b| !b.stationary) {
        let speed = input.speed();
        if speed <= threshold {
            continue;
        }

        let mut count = speed.floor() as usize;
        if let Some(cap) = config.max_fragments_per_body {
            count = count.min(cap);
        }
        for _ in 0..count {
            if merged.mass - config.fragment_mass <= 2.0 * config.fragment_mass {
                return fragments;
            }
            merged.mass -= config.fragment_mass;
            fragments.push(fragment(input, merged, config, rng));
        }
    }

    fragments
}

fn fragment<R: Rng>(
    source: &Body,
    merged: &Body,
    config: &DebrisConfig,
    rng: &mut R,
) -> Body {
    let range = config.jitter_min..=config.jitter_max;
    let velocity = Vector2::new(
        source.velocity.x * rng.random_range(range.clone()),
        source.velocity.y * rng.random_range(range),
    );

    Body {
        id: BodyId::UNASSIGNED,
        stationary: false,
        position: merged.position,
        velocity,
        mass: config.fragment_mass,
        radius: config.fragment_radius,
        contact: Contact::Immune,
        atmosphere: None,
    }
}
