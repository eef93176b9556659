//! Trajectory previews
//!
//! A probe is stepped forward against a read-only view of the live bodies
//! with exactly the force model and integrator the engine uses, so the
//! preview matches what `update` would do to the probe (ignoring the probe's
//! own pull on the others and any collisions).

use nalgebra::Point2;

use crate::body::Body;
use crate::forces::ForceModel;
use crate::integrator::Integrator;

/// Hard bound on the steps of one prediction
///
/// A probe that never moves never reaches `max_length`, so without this
/// bound a large `max_points` would keep the loop running indefinitely.
pub const MAX_PREDICTION_STEPS: usize = 1_000_000;

/// Termination bounds of a prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLimits {
    /// Maximum number of recorded samples
    pub max_points: usize,
    /// Maximum cumulative path length (m)
    pub max_length: f64,
    /// Steps between two recorded samples
    pub sample_interval: usize,
}

/// Simulate `probe` forward and sample its path
///
/// One sample is recorded every `sample_interval` steps, starting with the
/// position after step `sample_interval`. Stepping stops once
/// `max_points` samples exist, the travelled length reaches `max_length`,
/// or [`MAX_PREDICTION_STEPS`] steps have run. A live body sharing the
/// probe's id is ignored, so an existing body can be previewed from a copy
/// of itself.
///
/// # Examples
///
/// ```
/// use orbital::body::Body;
/// use orbital::forces::Gravity;
/// use orbital::integrator::SemiImplicitEuler;
/// use orbital::prediction::{PathLimits, predict_path};
/// use nalgebra::{Point2, Vector2};
///
/// let probe = Body::new(1.0, 1.0, Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
/// let limits = PathLimits { max_points: 3, max_length: f64::INFINITY, sample_interval: 100 };
///
/// let path = predict_path(&[], &probe, limits, &Gravity::default(), &SemiImplicitEuler);
/// assert_eq!(path, vec![
///     Point2::new(100.0, 0.0),
///     Point2::new(200.0, 0.0),
///     Point2::new(300.0, 0.0),
/// ]);
/// ```
pub fn predict_path(
    sources: &[Body],
    probe: &Body,
    limits: PathLimits,
    force: &dyn ForceModel,
    integrator: &dyn Integrator,
) -> Vec<Point2<f64>> {
    let interval = limits.sample_interval.max(1);
    let mut probe = *probe;
    let mut path = Vec::with_capacity(limits.max_points.min(1024));
    let mut length = 0.0;
    let mut steps = 0usize;

    while length < limits.max_length
        && path.len() < limits.max_points
        && steps < MAX_PREDICTION_STEPS
    {
        let before = probe.position;
        let acceleration = force.acceleration(&probe, sources);
        integrator.advance(&mut probe, acceleration, 1.0);

        if !(probe.position.x.is_finite() && probe.position.y.is_finite()) {
            break;
        }

        length += (probe.position - before).magnitude();
        steps += 1;
        if steps % interval == 0 {
            path.push(probe.position);
        }
    }

    path
}
