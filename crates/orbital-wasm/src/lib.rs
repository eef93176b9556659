//! WASM bindings for the orbital sandbox.
//!
//! This crate provides JavaScript/TypeScript bindings for the orbital crate,
//! so a browser front end can drive the engine and render its bodies.
//!
//! # Architecture
//!
//! Engines are stored in thread-local storage (WASM is single-threaded).
//! Functions take an opaque simulation ID for mutable state and return
//! serializable snapshots for reading it. Engine events are queued per
//! simulation until the front end drains them with `simulation_take_events`.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create();
//!
//! const earthId = simulation_add_preset(simId, {
//!   preset: "earth",
//!   position: [0.0, 0.0],
//!   velocity: [0.0, 0.0],
//!   stationary: true
//! });
//! simulation_add_body(simId, {
//!   mass: 450000.0,
//!   radius: 109.0,
//!   position: [0.0, 6771000.0],
//!   velocity: [-7672.0, 0.0]
//! });
//!
//! // "noChange" | "bodiesUpdated" | "bodiesAdded"
//! const change = simulation_update(simId, 60.0);
//! if (change === "bodiesAdded") {
//!   rebuildScene(simulation_get_bodies(simId));
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use orbital::forces::G;
use orbital::{
    Atmosphere, Body, BodyError, BodyId, Engine, EngineConfig, EngineEvent, Preset,
};


// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn not_found(sim_id: u32) -> JsError {
    JsError::new(&format!("Simulation {} not found", sim_id))
}

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

/// An engine plus the events it has reported since the last drain
struct Simulation {
    engine: Engine,
    pending: Rc<RefCell<Vec<EngineEvent>>>,
    verbose: bool,
}

impl Simulation {
    fn new(mut engine: Engine, verbose: bool) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        engine.subscribe(move |event: &EngineEvent| {
            if verbose {
                log(&describe(event));
            }
            sink.borrow_mut().push(event.clone());
        });

        Self {
            engine,
            pending,
            verbose,
        }
    }
}

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn register(simulation: Simulation) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    if simulation.verbose {
        log(&format!("orbital: created simulation {}", id));
    }
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, simulation);
    });

    id
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Engine configuration plus binding-only switches
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,
    /// Log lifecycle and collision events to the browser console
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphereInput {
    /// Surface density in kg/m³
    pub sea_level_density: f64,
    /// Outer edge measured from the body's center, in m
    pub top_altitude: f64,
}

/// Body data for adding new bodies
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyInput {
    /// Mass in kg
    pub mass: f64,
    /// Radius in m
    pub radius: f64,
    /// Position [x, y] in m
    pub position: [f64; 2],
    /// Velocity [x, y] in m per sub-step
    pub velocity: [f64; 2],
    #[serde(default)]
    pub stationary: bool,
    /// Start without collisions, e.g. when spawned inside another body
    #[serde(default)]
    pub immune: bool,
    #[serde(default)]
    pub atmosphere: Option<AtmosphereInput>,
}

impl BodyInput {
    pub fn to_body(&self) -> Result<Body, BodyError> {
        let mut body = Body::new(
            self.mass,
            self.radius,
            Point2::new(self.position[0], self.position[1]),
            Vector2::new(self.velocity[0], self.velocity[1]),
        )?;
        if let Some(atm) = self.atmosphere {
            body = body.with_atmosphere(Atmosphere::new(atm.sea_level_density, atm.top_altitude))?;
        }
        if self.stationary {
            body = body.stationary();
        }
        if self.immune {
            body = body.immune();
        }
        Ok(body)
    }
}

/// A catalog body placed in the scene
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInput {
    /// Case-insensitive preset name, e.g. "earth"
    pub preset: String,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub stationary: bool,
}

/// Body state snapshot for JavaScript
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    pub mass: f64,
    pub radius: f64,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub stationary: bool,
    pub immune: bool,
    pub atmosphere: Option<AtmosphereInput>,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.0,
            mass: body.mass,
            radius: body.radius,
            position: [body.position.x, body.position.y],
            velocity: [body.velocity.x, body.velocity.y],
            stationary: body.stationary,
            immune: body.is_immune(),
            atmosphere: body.atmosphere.map(|atm| AtmosphereInput {
                sea_level_density: atm.sea_level_density,
                top_altitude: atm.top_altitude,
            }),
        }
    }
}

/// Engine event for JavaScript, tagged by `kind`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventSnapshot {
    Collision { bodies: Vec<BodySnapshot> },
    BodyRemoved { body: BodySnapshot },
    BodyAdded { body: BodySnapshot },
}

impl From<&EngineEvent> for EventSnapshot {
    fn from(event: &EngineEvent) -> Self {
        match event {
            EngineEvent::Collision { bodies } => EventSnapshot::Collision {
                bodies: bodies.iter().map(BodySnapshot::from).collect(),
            },
            EngineEvent::BodyRemoved(body) => EventSnapshot::BodyRemoved { body: body.into() },
            EngineEvent::BodyAdded(body) => EventSnapshot::BodyAdded { body: body.into() },
        }
    }
}

fn describe(event: &EngineEvent) -> String {
    match event {
        EngineEvent::Collision { bodies } => {
            let ids: Vec<u32> = bodies.iter().map(|b| b.id.0).collect();
            format!("orbital: collision between bodies {:?}", ids)
        }
        EngineEvent::BodyRemoved(body) => format!("orbital: body {} removed", body.id.0),
        EngineEvent::BodyAdded(body) => format!(
            "orbital: body {} added (mass {:.3e} kg, radius {:.1} m)",
            body.id.0, body.mass, body.radius
        ),
    }
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a simulation with the default configuration.
///
/// Returns a simulation ID for use with other functions.
#[wasm_bindgen]
pub fn simulation_create() -> u32 {
    register(Simulation::new(Engine::new(), false))
}

/// Create a simulation from a configuration object.
///
/// Every field is optional; see `EngineConfig` for names and defaults, plus
/// `verbose` to log events to the console.
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue) -> Result<u32, JsError> {
    let config: SimulationConfig = from_js(config)?;
    let engine = Engine::with_config(config.engine)?;
    Ok(register(Simulation::new(engine, config.verbose)))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        if let Some(sim) = sims.borrow_mut().remove(&sim_id) {
            if sim.verbose {
                log(&format!("orbital: deleted simulation {}", sim_id));
            }
        }
    });
}

// =============================================================================
// Body management
// =============================================================================

/// Add a body to the simulation.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `body` - Body parameters (mass, radius, position, velocity, and the
///   optional stationary, immune and atmosphere)
///
/// # Returns
/// The new body's ID
#[wasm_bindgen]
pub fn simulation_add_body(sim_id: u32, body: JsValue) -> Result<u32, JsError> {
    let body: BodyInput = from_js(body)?;
    let body = body.to_body()?;

    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let id = sim.engine.add_body(body)?;
        Ok(id.0)
    })
}

/// Add a catalog body ("sun", "earth", "moon", "mars", "venus", "iss", "cat").
///
/// # Returns
/// The new body's ID
#[wasm_bindgen]
pub fn simulation_add_preset(sim_id: u32, input: JsValue) -> Result<u32, JsError> {
    let input: PresetInput = from_js(input)?;
    let preset: Preset = input.preset.parse()?;
    let mut body = preset.body(
        Point2::new(input.position[0], input.position[1]),
        Vector2::new(input.velocity[0], input.velocity[1]),
    )?;
    if input.stationary {
        body = body.stationary();
    }

    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let id = sim.engine.add_body(body)?;
        if sim.verbose {
            log(&format!("orbital: added {} as body {}", preset, id.0));
        }
        Ok(id.0)
    })
}

/// Remove a body from the simulation.
///
/// # Returns
/// true if the body was found and removed
#[wasm_bindgen]
pub fn simulation_remove_body(sim_id: u32, body_id: u32) -> Result<bool, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        Ok(sim.engine.remove_body(BodyId(body_id)).is_some())
    })
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Advance the simulation.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `tick_multiplier` - Sub-steps to run; values in (0, 1] run one scaled
///   sub-step, anything not positive runs nothing
///
/// # Returns
/// "noChange", "bodiesUpdated" or "bodiesAdded"
#[wasm_bindgen]
pub fn simulation_update(sim_id: u32, tick_multiplier: f64) -> Result<String, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let sim = sims.get_mut(&sim_id).ok_or_else(|| not_found(sim_id))?;

        match sim.engine.update(tick_multiplier) {
            Ok(change) => Ok(change.as_str().to_string()),
            Err(err) => {
                if sim.verbose {
                    web_sys::console::warn_1(&format!("orbital: tick discarded: {}", err).into());
                }
                Err(err.into())
            }
        }
    })
}

/// Drain the events reported since the last call.
///
/// # Returns
/// Array of `{ kind: "collision" | "bodyRemoved" | "bodyAdded", ... }`
#[wasm_bindgen]
pub fn simulation_take_events(sim_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let events: Vec<EventSnapshot> = sim
            .pending
            .borrow_mut()
            .drain(..)
            .map(|event| EventSnapshot::from(&event))
            .collect();

        to_js(&events)
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Get all bodies for rendering, in store order.
#[wasm_bindgen]
pub fn simulation_get_bodies(sim_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let bodies: Vec<BodySnapshot> = sim.engine.bodies().iter().map(BodySnapshot::from).collect();
        to_js(&bodies)
    })
}

/// Get body count.
#[wasm_bindgen]
pub fn simulation_body_count(sim_id: u32) -> Result<usize, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        Ok(sim.engine.body_count())
    })
}

/// Nearest other body to a live body.
///
/// With a single body in the simulation that body itself is returned.
///
/// # Returns
/// A body snapshot, or `undefined` if the simulation is empty or `body_id`
/// is not live
#[wasm_bindgen]
pub fn simulation_nearest_body(sim_id: u32, body_id: u32) -> Result<JsValue, JsError> {
    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let nearest = sim
            .engine
            .body(BodyId(body_id))
            .and_then(|query| sim.engine.nearest_body(query))
            .map(BodySnapshot::from);
        to_js(&nearest)
    })
}

/// Preview the path of a body without touching the simulation.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `probe` - Body parameters, as for `simulation_add_body`
/// * `max_points` - Maximum number of samples
/// * `max_length` - Maximum path length in m
///
/// # Returns
/// Array of [x, y] samples
#[wasm_bindgen]
pub fn simulation_predict_path(
    sim_id: u32,
    probe: JsValue,
    max_points: usize,
    max_length: f64,
) -> Result<JsValue, JsError> {
    let probe: BodyInput = from_js(probe)?;
    let probe = probe.to_body()?;

    SIMULATIONS.with(|sims| {
        let sims = sims.borrow();
        let sim = sims.get(&sim_id).ok_or_else(|| not_found(sim_id))?;

        let path: Vec<[f64; 2]> = sim
            .engine
            .predict_path(&probe, max_points, max_length)
            .into_iter()
            .map(|p| [p.x, p.y])
            .collect();
        to_js(&path)
    })
}

// =============================================================================
// Utility functions
// =============================================================================

/// Calculate circular orbital speed around a body.
///
/// # Arguments
/// * `anchor_mass` - Mass of the central body in kg
/// * `distance` - Distance between the centers in m
///
/// # Returns
/// Speed in m per sub-step
#[wasm_bindgen]
pub fn circular_velocity(anchor_mass: f64, distance: f64) -> f64 {
    // v = sqrt(G * M / r)
    (G * anchor_mass / distance).sqrt()
}
