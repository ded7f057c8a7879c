//! Thread-safe in-memory entity store.

use super::{EntityStore, StoreError};
use crate::core::Entity;
use std::collections::HashMap;
use std::sync::RwLock;

/// Entity store backed by a `HashMap` behind a `RwLock`.
///
/// Entities are cloned in and out, so a loaded entity never aliases the
/// stored copy.
pub struct MemoryStore<E: Entity> {
    pub(super) entities: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity + Clone> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with entities. Later duplicates replace earlier ones.
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let entities = entities
            .into_iter()
            .map(|entity| (entity.id().clone(), entity))
            .collect();
        Self {
            entities: RwLock::new(entities),
        }
    }

    /// Insert or replace an entity, returning the previous copy.
    pub fn insert(&self, entity: E) -> Result<Option<E>, StoreError> {
        let mut entities = self.entities.write().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.insert(entity.id().clone(), entity))
    }

    pub fn remove(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let mut entities = self.entities.write().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.remove(id))
    }

    /// Number of stored entities.
    pub fn len(&self) -> Result<usize, StoreError> {
        let entities = self.entities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<E: Entity + Clone> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity + Clone> EntityStore<E> for MemoryStore<E> {
    fn load(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let entities = self.entities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entities.get(id).cloned())
    }

    fn save(&self, entity: &E) -> Result<(), StoreError> {
        let mut entities = self.entities.write().map_err(|_| StoreError::Poisoned)?;
        entities.insert(entity.id().clone(), entity.clone());
        Ok(())
    }
}
