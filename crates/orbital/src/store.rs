use nalgebra::Vector2;

use crate::body::{Body, BodyId};
use crate::error::EngineError;

/// Identity-keyed collection of live bodies
///
/// Bodies are kept in insertion order, which is also the order the collision
/// scan walks. The store is the only place ids are assigned.
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a body under a fresh id and returns that id
    ///
    /// Any id already on `body` is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use orbital::body::Body;
    /// use orbital::store::BodyStore;
    /// use nalgebra::{Point2, Vector2};
    ///
    /// let mut store = BodyStore::new();
    /// let body = Body::new(5.0, 1.0, Point2::origin(), Vector2::zeros()).unwrap();
    ///
    /// let first = store.insert(body.clone()).unwrap();
    /// let second = store.insert(body).unwrap();
    ///
    /// assert_eq!(store.len(), 2);
    /// assert!(second > first);
    /// ```
    pub fn insert(&mut self, mut body: Body) -> Result<BodyId, EngineError> {
        let id = self.allocate_id()?;
        body.id = id;
        self.bodies.push(body);
        Ok(id)
    }

    fn allocate_id(&mut self) -> Result<BodyId, EngineError> {
        let id = BodyId(self.next_id);
        if !id.is_assigned() {
            return Err(EngineError::IdsExhausted);
        }
        self.next_id += 1;
        Ok(id)
    }

    /// Removes a body, returning it if it was live
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Total mass of all live bodies (kg)
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total linear momentum
    ///
    /// Conserved by merges; stationary bodies break conservation under
    /// gravity since they absorb no reaction.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
