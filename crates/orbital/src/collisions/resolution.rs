//! Collision resolution through inelastic mergers
//!
//! Overlapping bodies merge into a single successor that conserves:
//! - Total mass
//! - Total momentum
//! - Cross-sectional area (discs, so r_new² = Σ r_i²)

use nalgebra::{Point2, Vector2};
use rand::Rng;

use crate::body::{Atmosphere, Body, BodyId, Contact};
use crate::collisions::debris::generate_debris;
use crate::collisions::detection::scan_body;
use crate::config::DebrisConfig;
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::store::BodyStore;

/// Merge a set of bodies into one successor
///
/// - stationary if any input is stationary
/// - mass: M = Σ m_i
/// - velocity: Σ v_i · m_i / M
/// - position: Σ p_i · m_i / M
/// - radius: sqrt(Σ r_i²)
/// - atmosphere: present if any input has one, with the inputs' thicknesses
///   stacked on the new radius and their sea-level densities summed
///
/// `inputs` must not be empty.
///
/// # Examples
///
/// ```
/// use orbital::body::{Body, BodyId};
/// use orbital::collisions::merge_bodies;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(1.0, 0.01, Point2::new(1.0, 0.0), Vector2::new(0.0, 5.0)).unwrap();
/// let b = Body::new(1.0, 0.01, Point2::new(1.1, 0.0), Vector2::new(0.0, 3.0)).unwrap();
///
/// let merged = merge_bodies(&[a, b], BodyId(2));
///
/// // Mass is conserved
/// assert!((merged.mass - 2.0).abs() < 1e-10);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// let p_final = merged.momentum();
/// assert!((p_final.x - p_initial.x).abs() < 1e-10);
/// assert!((p_final.y - p_initial.y).abs() < 1e-10);
/// ```
pub fn merge_bodies(inputs: &[Body], new_id: BodyId) -> Body {
    debug_assert!(!inputs.is_empty(), "merge of an empty set");

    let total_mass: f64 = inputs.iter().map(|b| b.mass).sum();

    let velocity = inputs
        .iter()
        .map(|b| b.velocity * (b.mass / total_mass))
        .fold(Vector2::zeros(), |acc, v| acc + v);

    // Center of mass position
    let weighted = inputs
        .iter()
        .map(|b| b.position.coords * b.mass)
        .fold(Vector2::zeros(), |acc, p| acc + p);
    let position = Point2::from(weighted / total_mass);

    let radius = inputs
        .iter()
        .map(|b| b.radius * b.radius)
        .sum::<f64>()
        .sqrt();

    Body {
        id: new_id,
        stationary: inputs.iter().any(|b| b.stationary),
        position,
        velocity,
        mass: total_mass,
        radius,
        contact: Contact::Active,
        atmosphere: merge_atmospheres(inputs, radius),
    }
}

fn merge_atmospheres(inputs: &[Body], radius: f64) -> Option<Atmosphere> {
    let layers: Vec<(&Atmosphere, f64)> = inputs
        .iter()
        .filter_map(|b| b.atmosphere.as_ref().map(|atm| (atm, b.radius)))
        .collect();

    if layers.is_empty() {
        return None;
    }

    let thickness: f64 = layers.iter().map(|(atm, r)| atm.top_altitude - r).sum();
    let density: f64 = layers.iter().map(|(atm, _)| atm.sea_level_density).sum();
    Some(Atmosphere::new(density, radius + thickness))
}

/// What one collision pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Merge results inserted
    pub merges: usize,
    /// Debris fragments inserted
    pub fragments: usize,
    /// Bodies that went from immune back to active
    pub reactivated: usize,
}

impl Resolution {
    pub fn changed_population(&self) -> bool {
        self.merges > 0 || self.fragments > 0
    }
}

/// Merge overlapping bodies until no active overlap is left
///
/// The store is scanned in order. Each scanned body updates its contact
/// state; the first one with an active overlap is merged with everything it
/// touches, and the scan starts again from the top. When `debris` is given
/// every merge result starts out immune, and the debris spalled along the
/// way is inserted after the scan settles.
///
/// Events are appended to `events` in the order they happen.
pub fn resolve_collisions<R: Rng>(
    store: &mut BodyStore,
    debris: Option<&DebrisConfig>,
    rng: &mut R,
    events: &mut Vec<EngineEvent>,
) -> Result<Resolution, EngineError> {
    let mut resolution = Resolution::default();
    let mut fragments = Vec::new();

    'scan: loop {
        for seed in 0..store.len() {
            let scan = scan_body(store.as_slice(), seed);

            let body = &mut store.as_mut_slice()[seed];
            let contact = body.contact.after_scan(scan.overlapping);
            if contact != body.contact {
                body.contact = contact;
                resolution.reactivated += 1;
            }

            if scan.members.is_empty() {
                continue;
            }

            let inputs: Vec<Body> = scan.members.iter().map(|&i| store.as_slice()[i]).collect();
            events.push(EngineEvent::Collision {
                bodies: inputs.clone(),
            });

            let mut merged = merge_bodies(&inputs, BodyId::UNASSIGNED);
            if let Some(config) = debris {
                fragments.extend(generate_debris(&inputs, &mut merged, config, rng));
                merged.contact = Contact::Immune;
            }

            for input in &inputs {
                if let Some(removed) = store.remove(input.id) {
                    events.push(EngineEvent::BodyRemoved(removed));
                }
            }
            insert(store, merged, events)?;
            resolution.merges += 1;

            continue 'scan;
        }
        break;
    }

    for fragment in fragments {
        insert(store, fragment, events)?;
        resolution.fragments += 1;
    }

    Ok(resolution)
}

fn insert(
    store: &mut BodyStore,
    body: Body,
    events: &mut Vec<EngineEvent>,
) -> Result<(), EngineError> {
    let id = store.insert(body)?;
    events.push(EngineEvent::BodyAdded(Body { id, ..body }));
    Ok(())
}
