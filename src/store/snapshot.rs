//! Point-in-time snapshots of a [`MemoryStore`].
//!
//! Snapshots let an embedding application persist the in-memory store and
//! seed a fresh one after a restart. They serialize to JSON or to a compact
//! binary form.

use super::{MemoryStore, StoreError};
use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while taking or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data failed validation
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializable copy of every entity held by a store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreSnapshot<E> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub entities: Vec<E>,
}

impl<E> StoreSnapshot<E>
where
    E: Entity + Serialize + DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Check the format version and that no id appears twice.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut seen = HashSet::with_capacity(self.entities.len());
        for entity in &self.entities {
            if !seen.insert(entity.id()) {
                return Err(SnapshotError::ValidationFailed(format!(
                    "duplicate entity id {:?}",
                    entity.id()
                )));
            }
        }
        Ok(())
    }
}

impl<E> MemoryStore<E>
where
    E: Entity + Clone + Serialize + DeserializeOwned,
{
    /// Copy every stored entity into a new snapshot.
    pub fn snapshot(&self) -> Result<StoreSnapshot<E>, SnapshotError> {
        let entities = self.entities.read().map_err(|_| StoreError::Poisoned)?;
        Ok(StoreSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            entities: entities.values().cloned().collect(),
        })
    }

    /// Build a store from a validated snapshot.
    pub fn restore(snapshot: StoreSnapshot<E>) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let entities: HashMap<E::Id, E> = snapshot
            .entities
            .into_iter()
            .map(|entity| (entity.id().clone(), entity))
            .collect();
        Ok(Self {
            entities: RwLock::new(entities),
        })
    }
}
