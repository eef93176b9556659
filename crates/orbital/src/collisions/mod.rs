//! Collision detection and resolution
//!
//! This module provides overlap detection, momentum-conserving mergers and
//! the optional debris generator for violent impacts.

pub mod debris;
pub mod detection;
pub mod resolution;

#[cfg(test)]
mod detection_test;

pub use debris::generate_debris;
pub use detection::{CollisionScan, scan_body};
pub use resolution::{Resolution, merge_bodies, resolve_collisions};
