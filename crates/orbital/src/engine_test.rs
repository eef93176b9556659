use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Atmosphere, Body, BodyId};
use crate::config::{DebrisConfig, EngineConfig};
use crate::engine::Engine;
use crate::error::{BodyError, EngineError};
use crate::events::{ChangeKind, EngineEvent};
use crate::forces::G;

fn body(mass: f64, radius: f64, x: f64, y: f64) -> Body {
    Body::new(mass, radius, Point2::new(x, y), Vector2::zeros()).unwrap()
}

fn moving(mass: f64, radius: f64, x: f64, vx: f64) -> Body {
    Body::new(mass, radius, Point2::new(x, 0.0), Vector2::new(vx, 0.0)).unwrap()
}

fn record_events(engine: &mut Engine) -> Rc<RefCell<Vec<EngineEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(move |event: &EngineEvent| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn test_add_body_assigns_ids() {
    let mut engine = Engine::new();

    let a = engine.add_body(body(1.0, 1.0, 0.0, 0.0)).unwrap();
    let b = engine.add_body(body(1.0, 1.0, 10.0, 0.0)).unwrap();

    assert_ne!(a, b);
    assert_eq!(engine.body_count(), 2);
    assert_eq!(engine.body(b).unwrap().position, Point2::new(10.0, 0.0));
}

#[test]
fn test_add_body_revalidates() {
    let mut engine = Engine::new();
    let mut broken = body(1.0, 1.0, 0.0, 0.0);
    broken.radius = -2.0;

    let err = engine.add_body(broken).unwrap_err();

    assert!(matches!(
        err,
        EngineError::InvalidBody(BodyError::NonPositiveRadius(_))
    ));
    assert_eq!(engine.body_count(), 0);
}

#[test]
fn test_remove_body() {
    let mut engine = Engine::new();
    let id = engine.add_body(body(1.0, 1.0, 0.0, 0.0)).unwrap();

    assert_eq!(engine.remove_body(id).unwrap().id, id);
    assert!(engine.remove_body(id).is_none());
    assert!(engine.body(id).is_none());
}

#[test]
fn test_update_empty_engine() {
    let mut engine = Engine::new();
    assert_eq!(engine.update(5.0).unwrap(), ChangeKind::NoChange);
}

#[test]
fn test_non_positive_tick_changes_nothing() {
    let mut engine = Engine::new();
    engine.add_body(moving(1.0, 1.0, 0.0, 3.0)).unwrap();
    engine.add_body(moving(1.0e20, 1.0, 1.0e6, 0.0)).unwrap();
    let before = engine.bodies().to_vec();

    for tick in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(engine.update(tick).unwrap(), ChangeKind::NoChange);
        assert_eq!(engine.bodies(), before.as_slice());
    }
}

#[test]
fn test_fractional_tick_scales_step() {
    let mut engine = Engine::new();
    let id = engine.add_body(moving(1.0, 1.0, 0.0, 2.0)).unwrap();

    assert_eq!(engine.update(0.5).unwrap(), ChangeKind::BodiesUpdated);
    assert_eq!(engine.body(id).unwrap().position, Point2::new(1.0, 0.0));
}

#[test]
fn test_fractional_tick_applies_full_acceleration() {
    let mut engine = Engine::new();
    let d = 3.84e8;
    let a = engine.add_body(body(5.0e24, 1.0e6, 0.0, 0.0)).unwrap();
    let b = engine.add_body(body(7.0e22, 1.0e6, d, 0.0)).unwrap();

    engine.update(0.5).unwrap();

    let heavy = engine.body(a).unwrap();
    let expected = G * 7.0e22 / (d * d);
    assert_relative_eq!(heavy.velocity.x, expected, max_relative = 1e-12);
    // Only the displacement is halved
    assert_relative_eq!(heavy.position.x, expected * 0.5, max_relative = 1e-12);

    let light = engine.body(b).unwrap();
    assert_relative_eq!(light.velocity.x, -G * 5.0e24 / (d * d), max_relative = 1e-12);
}

#[test]
fn test_tick_is_floored() {
    let mut engine = Engine::new();
    let id = engine.add_body(moving(1.0, 1.0, 0.0, 2.0)).unwrap();

    engine.update(3.7).unwrap();
    assert_eq!(engine.body(id).unwrap().position, Point2::new(6.0, 0.0));
}

#[test]
fn test_body_at_rest_reports_no_change() {
    let mut engine = Engine::new();
    engine.add_body(body(1.0, 1.0, 0.0, 0.0)).unwrap();

    assert_eq!(engine.update(2.0).unwrap(), ChangeKind::NoChange);
}

#[test]
fn test_stationary_body_never_moves() {
    let mut engine = Engine::new();
    let anchor = engine
        .add_body(body(1.0e22, 10.0, 0.0, 0.0).stationary())
        .unwrap();
    engine.add_body(body(1.0e22, 10.0, 1.0e6, 0.0)).unwrap();

    for _ in 0..10 {
        engine.update(10.0).unwrap();
    }

    let anchor = engine.body(anchor).unwrap();
    assert_eq!(anchor.position, Point2::origin());
    assert_eq!(anchor.velocity, Vector2::zeros());
}

#[test]
fn test_merge_reports_bodies_added() {
    let mut engine = Engine::new();
    let log = record_events(&mut engine);
    let a = engine.add_body(moving(1.0, 1.0, 0.0, 1.0)).unwrap();
    let b = engine.add_body(moving(1.0, 1.0, 3.0, -1.0)).unwrap();

    assert_eq!(engine.update(1.0).unwrap(), ChangeKind::BodiesAdded);
    assert_eq!(engine.body_count(), 1);
    assert!(engine.body(a).is_none());
    assert!(engine.body(b).is_none());

    let events = log.borrow();
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[0], EngineEvent::Collision { bodies } if bodies.len() == 2));
    assert!(matches!(&events[1], EngineEvent::BodyRemoved(body) if body.id == a));
    assert!(matches!(&events[2], EngineEvent::BodyRemoved(body) if body.id == b));
    assert!(matches!(
        &events[3],
        EngineEvent::BodyAdded(body) if body.id == engine.bodies()[0].id
    ));
}

#[test]
fn test_failed_tick_is_rolled_back() {
    let config = EngineConfig {
        gravitational_constant: 1.0e300,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config).unwrap();
    let log = record_events(&mut engine);
    engine.add_body(body(1.0e10, 1.0, 0.0, 0.0)).unwrap();
    engine.add_body(body(1.0e10, 1.0, 100.0, 0.0)).unwrap();
    let before = engine.bodies().to_vec();

    let err = engine.update(5.0).unwrap_err();

    assert!(matches!(err, EngineError::NonFiniteState { .. }));
    assert_eq!(engine.bodies(), before.as_slice());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        prediction_interval: 0,
        ..EngineConfig::default()
    };

    assert!(matches!(
        Engine::with_config(config),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn test_atmospheric_drag_toggle() {
    let planet = body(5.972e24, 6.371e6, 0.0, 0.0)
        .stationary()
        .with_atmosphere(Atmosphere::new(1.225, 6.471e6))
        .unwrap();
    let satellite =
        Body::new(1_000.0, 5.0, Point2::new(0.0, 6.381e6), Vector2::new(7_000.0, 0.0)).unwrap();

    let run = |atmospheric_drag: bool| {
        let config = EngineConfig {
            atmospheric_drag,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(config).unwrap();
        engine.add_body(planet).unwrap();
        let id = engine.add_body(satellite).unwrap();
        engine.update(1.0).unwrap();
        *engine.body(id).unwrap()
    };

    // Gravity acts purely along -y here, so only drag touches vx
    assert_eq!(run(false).velocity.x, 7_000.0);
    assert!(run(true).velocity.x < 7_000.0);
    assert!(run(true).velocity.x > 0.0);
}

#[test]
fn test_immune_spawn_does_not_merge() {
    let mut engine = Engine::new();
    let host = engine.add_body(body(1.0e3, 100.0, 0.0, 0.0)).unwrap();
    let ghost = engine
        .add_body(moving(1.0, 1.0, 0.0, 50.0).immune())
        .unwrap();

    engine.update(1.0).unwrap();
    assert_eq!(engine.body_count(), 2);
    assert!(engine.body(ghost).unwrap().is_immune());

    // Flies clear of the host and becomes active again
    engine.update(3.0).unwrap();
    assert!(!engine.body(ghost).unwrap().is_immune());
    assert!(engine.body(host).is_some());
}

#[test]
fn test_debris_is_deterministic_per_seed() {
    let run = || {
        let config = EngineConfig {
            atmospheric_drag: false,
            seed: 17,
            debris: DebrisConfig {
                enabled: true,
                ..DebrisConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(config).unwrap();
        engine.add_body(moving(1.0e6, 2.0, 0.0, 6.0)).unwrap();
        engine.add_body(moving(1.0e6, 2.0, 8.0, 0.0)).unwrap();
        assert_eq!(engine.update(1.0).unwrap(), ChangeKind::BodiesAdded);
        engine.bodies().to_vec()
    };

    let first = run();
    assert!(first.len() > 1);
    assert_eq!(first, run());
    assert_relative_eq!(
        first.iter().map(|b| b.mass).sum::<f64>(),
        2.0e6,
        max_relative = 1e-12
    );
}

#[test]
fn test_nearest_body_empty() {
    let engine = Engine::new();
    let probe = body(1.0, 1.0, 0.0, 0.0);

    assert!(engine.nearest_body(&probe).is_none());
}

#[test]
fn test_nearest_body_single_returns_query() {
    let mut engine = Engine::new();
    engine.add_body(body(1.0, 1.0, 100.0, 0.0)).unwrap();
    let probe = body(1.0, 1.0, 0.0, 0.0);

    let nearest = engine.nearest_body(&probe).unwrap();
    assert!(std::ptr::eq(nearest, &probe));
}

#[test]
fn test_nearest_body_skips_self() {
    let mut engine = Engine::new();
    let a = engine.add_body(body(1.0, 1.0, 0.0, 0.0)).unwrap();
    let b = engine.add_body(body(1.0, 1.0, 50.0, 0.0)).unwrap();
    engine.add_body(body(1.0, 1.0, -80.0, 0.0)).unwrap();

    let query = *engine.body(a).unwrap();
    assert_eq!(engine.nearest_body(&query).unwrap().id, b);

    let outsider = body(1.0, 1.0, -70.0, 0.0);
    assert_eq!(engine.nearest_body(&outsider).unwrap().id, BodyId(2));
}

#[test]
fn test_prediction_matches_update() {
    let mut engine = Engine::new();
    engine
        .add_body(body(1.0e14, 10.0, 0.0, -5_000.0).stationary())
        .unwrap();
    let probe = moving(1.0, 1.0, 0.0, 10.0);

    let path = engine.predict_path(&probe, 1, f64::INFINITY);
    assert_eq!(engine.body_count(), 1);

    let id = engine.add_body(probe).unwrap();
    engine.update(100.0).unwrap();

    assert_eq!(path.len(), 1);
    assert_relative_eq!(path[0], engine.body(id).unwrap().position, epsilon = 1e-9);
}

#[test]
fn test_prediction_interval_from_config() {
    let config = EngineConfig {
        prediction_interval: 10,
        ..EngineConfig::default()
    };
    let engine = Engine::with_config(config).unwrap();
    let probe = moving(1.0, 1.0, 0.0, 1.0);

    let path = engine.predict_path(&probe, 2, f64::INFINITY);
    assert_eq!(path, vec![Point2::new(10.0, 0.0), Point2::new(20.0, 0.0)]);
}

#[test]
fn test_potential_energy() {
    let mut engine = Engine::new();
    engine.add_body(body(1.0e10, 1.0, 0.0, 0.0)).unwrap();
    engine.add_body(body(1.0e10, 1.0, 100.0, 0.0)).unwrap();

    let expected = -engine.config().gravitational_constant * 1.0e20 / 100.0;
    assert_relative_eq!(engine.potential_energy(), expected, max_relative = 1e-12);
}
