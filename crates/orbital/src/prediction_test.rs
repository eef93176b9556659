use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::forces::Gravity;
use crate::integrator::SemiImplicitEuler;
use crate::prediction::{MAX_PREDICTION_STEPS, PathLimits, predict_path};

fn limits(max_points: usize, max_length: f64) -> PathLimits {
    PathLimits {
        max_points,
        max_length,
        sample_interval: 100,
    }
}

fn drifting_probe() -> Body {
    Body::new(1.0, 1.0, Point2::origin(), Vector2::new(10.0, 0.0)).unwrap()
}

#[test]
fn test_samples_every_interval() {
    let path = predict_path(
        &[],
        &drifting_probe(),
        limits(2, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path, vec![Point2::new(1_000.0, 0.0), Point2::new(2_000.0, 0.0)]);
}

#[test]
fn test_single_point_is_after_first_interval() {
    let path = predict_path(
        &[],
        &drifting_probe(),
        limits(1, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path, vec![Point2::new(1_000.0, 0.0)]);
}

#[test]
fn test_length_limit_stops_prediction() {
    // 10 m per step: 1500 m is reached at step 150, before the second sample
    let path = predict_path(
        &[],
        &drifting_probe(),
        limits(10, 1_500.0),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path.len(), 1);
}

#[test]
fn test_zero_points_requested() {
    let path = predict_path(
        &[],
        &drifting_probe(),
        limits(0, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert!(path.is_empty());
}

#[test]
fn test_stationary_probe_stays_put() {
    let probe = Body::new(1.0, 1.0, Point2::new(5.0, 5.0), Vector2::zeros())
        .unwrap()
        .stationary();

    let path = predict_path(
        &[],
        &probe,
        limits(3, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path, vec![Point2::new(5.0, 5.0); 3]);
}

#[test]
fn test_motionless_body_prediction_is_bounded() {
    let probe = Body::new(1.0, 1.0, Point2::new(5.0, 5.0), Vector2::zeros())
        .unwrap()
        .stationary();

    let path = predict_path(
        &[],
        &probe,
        limits(usize::MAX, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path.len(), MAX_PREDICTION_STEPS / 100);
    assert!(path.iter().all(|p| *p == Point2::new(5.0, 5.0)));
}

#[test]
fn test_gravity_bends_path() {
    let mut planet = Body::new(1.0e14, 10.0, Point2::new(0.0, -5_000.0), Vector2::zeros()).unwrap();
    planet.id = BodyId(0);

    let path = predict_path(
        &[planet],
        &drifting_probe(),
        limits(3, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(path.len(), 3);
    assert!(path.iter().all(|p| p.y < 0.0));
    assert!(path[2].y < path[1].y);
}

#[test]
fn test_live_copy_of_probe_is_ignored() {
    // A heavy body previewed from a copy of itself must not attract the copy
    let mut live = Body::new(1.0e20, 1.0, Point2::origin(), Vector2::new(10.0, 0.0)).unwrap();
    live.id = BodyId(4);

    let path = predict_path(
        &[live],
        &live,
        limits(2, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_relative_eq!(path[1], Point2::new(2_000.0, 0.0));
}

#[test]
fn test_sources_are_untouched() {
    let mut planet = Body::new(1.0e14, 10.0, Point2::new(0.0, -5_000.0), Vector2::zeros()).unwrap();
    planet.id = BodyId(0);
    let sources = [planet];

    predict_path(
        &sources,
        &drifting_probe(),
        limits(5, f64::INFINITY),
        &Gravity::default(),
        &SemiImplicitEuler,
    );

    assert_eq!(sources[0], planet);
}
