//! Overlap detection
//!
//! Two discs collide when the distance between their centers is at most the
//! sum of their radii. Immune bodies are never part of a merge, but their
//! overlaps still decide when they become active again.

use crate::body::Body;

/// Result of scanning one body against the rest of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionScan {
    /// Indices of the merge set, seed included, in store order.
    /// Empty when the seed has no active overlap.
    pub members: Vec<usize>,
    /// Whether the seed overlaps any other body, immune or not
    pub overlapping: bool,
}

/// Scan the body at `seed` against every other body
///
/// Only direct overlaps with the seed are collected; bodies touching a
/// member but not the seed are left for a later scan.
///
/// # Examples
///
/// ```
/// use orbital::body::Body;
/// use orbital::collisions::scan_body;
/// use nalgebra::{Point2, Vector2};
///
/// let a = Body::new(1.0, 1.0, Point2::new(0.0, 0.0), Vector2::zeros()).unwrap();
/// let b = Body::new(1.0, 1.0, Point2::new(2.0, 0.0), Vector2::zeros()).unwrap();
/// let c = Body::new(1.0, 1.0, Point2::new(9.0, 0.0), Vector2::zeros()).unwrap();
///
/// let scan = scan_body(&[a, b, c], 0);
/// assert_eq!(scan.members, vec![0, 1]);
/// assert!(scan.overlapping);
/// ```
pub fn scan_body(bodies: &[Body], seed: usize) -> CollisionScan {
    let body = &bodies[seed];
    let mut scan = CollisionScan::default();

    for (i, other) in bodies.iter().enumerate() {
        if i == seed || !body.overlaps(other) {
            continue;
        }
        scan.overlapping = true;
        if !body.is_immune() && !other.is_immune() {
            scan.members.push(i);
        }
    }

    if !scan.members.is_empty() {
        let at = scan.members.partition_point(|&i| i < seed);
        scan.members.insert(at, seed);
    }
    scan
}
