//! Notifications emitted while the engine steps

use crate::body::Body;

/// What an `update` did to the body population
///
/// Lets a renderer choose between refreshing the visuals it already has and
/// resynchronising the whole scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Nothing was stepped or nothing moved
    NoChange,
    /// Existing bodies changed state; the population is the same
    BodiesUpdated,
    /// Bodies were merged, spalled or otherwise replaced
    BodiesAdded,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::NoChange => "noChange",
            ChangeKind::BodiesUpdated => "bodiesUpdated",
            ChangeKind::BodiesAdded => "bodiesAdded",
        }
    }
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// These bodies overlapped and are about to be merged
    Collision { bodies: Vec<Body> },
    /// A body left the store (absorbed by a merge)
    BodyRemoved(Body),
    /// A body entered the store (merge result or debris fragment)
    BodyAdded(Body),
}

/// Receives engine events synchronously, inside `Engine::update`
///
/// Implemented for any `FnMut(&EngineEvent)` closure.
pub trait EngineObserver {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineObserver for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}
