//! Persistence boundary for entities.
//!
//! The engine only needs to load an entity by id and save it back. Any
//! backend that can do that implements [`EntityStore`]. [`MemoryStore`] is a
//! thread-safe in-memory implementation with JSON/binary snapshots.
//!
//! # Concurrency
//!
//! The engine does not lock entities. Two transitions on the same id can both
//! load the same version and the later save wins. Stores that need to prevent
//! lost updates should check a version on `save` and fail on mismatch, or the
//! caller should serialise calls per id.

mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{SnapshotError, StoreSnapshot, SNAPSHOT_VERSION};

use crate::core::Entity;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported by an entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store unavailable: {0}")]
    NotAvailable(String),

    #[error("Store backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Load/save collaborator used by the state machine.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Load an entity, `Ok(None)` when the id is unknown.
    fn load(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// Persist an entity under its own id.
    fn save(&self, entity: &E) -> Result<(), StoreError>;
}

impl<E: Entity, T: EntityStore<E> + ?Sized> EntityStore<E> for Arc<T> {
    fn load(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).load(id)
    }

    fn save(&self, entity: &E) -> Result<(), StoreError> {
        (**self).save(entity)
    }
}

impl<E: Entity, T: EntityStore<E> + ?Sized> EntityStore<E> for &T {
    fn load(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).load(id)
    }

    fn save(&self, entity: &E) -> Result<(), StoreError> {
        (**self).save(entity)
    }
}
