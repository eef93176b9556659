//! The sandbox engine
//!
//! `Engine` owns the body store and everything needed to step it: the force
//! model, the integrator, the debris random source and the observers that
//! are told about collisions.
//!
//! # Examples
//!
//! ```
//! use orbital::{Body, ChangeKind, Engine};
//! use nalgebra::{Point2, Vector2};
//!
//! let mut engine = Engine::new();
//! engine.add_body(Body::new(5.0e24, 6.4e6, Point2::origin(), Vector2::zeros()).unwrap()).unwrap();
//! engine.add_body(Body::new(7.0e22, 1.7e6, Point2::new(3.84e8, 0.0), Vector2::new(0.0, 1000.0)).unwrap()).unwrap();
//!
//! assert_eq!(engine.update(10.0).unwrap(), ChangeKind::BodiesUpdated);
//! assert_eq!(engine.body_count(), 2);
//! ```

use nalgebra::Point2;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::body::{Body, BodyId};
use crate::collisions::resolve_collisions;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{ChangeKind, EngineEvent, EngineObserver};
use crate::forces::{AtmosphericDrag, CompositeForce, ForceModel, Gravity};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::prediction::{PathLimits, predict_path};
use crate::store::BodyStore;

pub struct Engine {
    store: BodyStore,
    config: EngineConfig,
    force: CompositeForce,
    integrator: SemiImplicitEuler,
    rng: ChaChaRng,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl Engine {
    /// Creates an empty engine with the default configuration
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Creates an empty engine, rejecting an invalid configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let mut force = CompositeForce::new().with_force(Gravity::new(config.gravitational_constant));
        if config.atmospheric_drag {
            force = force.with_force(AtmosphericDrag::new(config.drag_coefficient));
        }

        Self {
            store: BodyStore::new(),
            rng: ChaChaRng::seed_from_u64(config.seed),
            config,
            force,
            integrator: SemiImplicitEuler,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for collision and population events
    pub fn subscribe<O: EngineObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Validates `body` and inserts it under a fresh id
    pub fn add_body(&mut self, body: Body) -> Result<BodyId, EngineError> {
        body.validate()?;
        self.store.insert(body)
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.store.remove(id)
    }

    /// Advances the simulation
    ///
    /// `tick_multiplier > 1` runs `floor(tick_multiplier)` unit sub-steps;
    /// `0 < tick_multiplier ≤ 1` runs a single sub-step whose position
    /// advance is scaled by it;
    /// anything else runs nothing. Every sub-step integrates all bodies and
    /// then merges overlaps until none is left.
    ///
    /// The tick is all-or-nothing: on error the store is left as it was and
    /// no observer is notified. Observers receive the tick's events after it
    /// has been committed, before this returns.
    pub fn update(&mut self, tick_multiplier: f64) -> Result<ChangeKind, EngineError> {
        let Some((steps, scale)) = sub_steps(tick_multiplier) else {
            return Ok(ChangeKind::NoChange);
        };
        if self.store.is_empty() {
            return Ok(ChangeKind::NoChange);
        }

        let debris = self.config.debris.enabled.then_some(&self.config.debris);
        let mut store = self.store.clone();
        let mut rng = self.rng.clone();
        let mut events = Vec::new();
        let mut updated = false;
        let mut repopulated = false;

        for _ in 0..steps {
            updated |= self.integrator.step(&mut store, scale, &self.force)?;
            let resolution = resolve_collisions(&mut store, debris, &mut rng, &mut events)?;
            updated |= resolution.reactivated > 0;
            repopulated |= resolution.changed_population();
        }

        self.store = store;
        self.rng = rng;
        self.notify(&events);

        Ok(if repopulated {
            ChangeKind::BodiesAdded
        } else if updated {
            ChangeKind::BodiesUpdated
        } else {
            ChangeKind::NoChange
        })
    }

    fn notify(&mut self, events: &[EngineEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    /// Nearest other body to `to` by center distance
    ///
    /// Returns `None` for an empty store. With exactly one body in the store
    /// the query itself is returned, whether or not it is that body.
    pub fn nearest_body<'a>(&'a self, to: &'a Body) -> Option<&'a Body> {
        match self.store.len() {
            0 => None,
            1 => Some(to),
            _ => self
                .store
                .iter()
                .filter(|b| b.id != to.id)
                .min_by(|a, b| a.distance_to(to).total_cmp(&b.distance_to(to))),
        }
    }

    /// Preview the path of `probe` against the current bodies
    ///
    /// Samples every `prediction_interval` steps (100 by default) until
    /// `max_points` samples exist or the path is `max_length` long, and never
    /// past [`MAX_PREDICTION_STEPS`](crate::prediction::MAX_PREDICTION_STEPS)
    /// steps. The store is not touched.
    pub fn predict_path(&self, probe: &Body, max_points: usize, max_length: f64) -> Vec<Point2<f64>> {
        let limits = PathLimits {
            max_points,
            max_length,
            sample_interval: self.config.prediction_interval,
        };
        predict_path(
            self.store.as_slice(),
            probe,
            limits,
            &self.force,
            &self.integrator,
        )
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.store.get(id)
    }

    pub fn bodies(&self) -> &[Body] {
        self.store.as_slice()
    }

    pub fn body_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gravitational potential energy of the active bodies (J)
    pub fn potential_energy(&self) -> f64 {
        self.force.potential_energy(self.store.as_slice())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of sub-steps and their scale for a tick multiplier
fn sub_steps(tick_multiplier: f64) -> Option<(usize, f64)> {
    if !tick_multiplier.is_finite() || tick_multiplier <= 0.0 {
        None
    } else if tick_multiplier <= 1.0 {
        Some((1, tick_multiplier))
    } else {
        Some((tick_multiplier.floor() as usize, 1.0))
    }
}
