//! Workout history persistence.
//!
//! Serializes the whole store to a single JSON blob under a fixed key.
//! Derived metrics and descriptions are persisted as plain data and restored
//! verbatim; rehydrated workouts never recompute them, so the stored values
//! stay byte-compatible with what earlier sessions wrote.

use serde::{Deserialize, Serialize};

use crate::storage::keyvalue::StorageService;
use crate::workouts::types::Workout;

/// Fixed storage key for the workout history blob.
pub const STORAGE_KEY: &str = "workouts";

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Versioned envelope around the persisted workout sequence.
///
/// The first releases wrote a bare JSON array with no version tag; `load`
/// still accepts that shape.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedHistory {
    version: u32,
    workouts: Vec<Workout>,
}

/// Saves and restores the workout history through an opaque storage service.
#[derive(Debug)]
pub struct PersistenceGateway<S: StorageService> {
    storage: S,
}

impl<S: StorageService> PersistenceGateway<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist the ordered workout sequence, overwriting any previous blob.
    ///
    /// Serialization trouble is logged and swallowed; a failed save never
    /// disturbs the running session.
    pub fn save(&mut self, workouts: &[Workout]) {
        let history = PersistedHistory {
            version: FORMAT_VERSION,
            workouts: workouts.to_vec(),
        };
        match serde_json::to_string(&history) {
            Ok(blob) => {
                self.storage.set(STORAGE_KEY, &blob);
                tracing::debug!("Persisted {} workouts", workouts.len());
            }
            Err(e) => tracing::warn!("Failed to serialize workout history: {e}"),
        }
    }

    /// Restore the persisted workout sequence.
    ///
    /// An absent key or a malformed blob means "no prior history" and yields
    /// an empty vec; neither is an error to the caller.
    pub fn load(&self) -> Vec<Workout> {
        let Some(blob) = self.storage.get(STORAGE_KEY) else {
            tracing::debug!("No persisted workout history");
            return Vec::new();
        };

        if let Ok(history) = serde_json::from_str::<PersistedHistory>(&blob) {
            tracing::debug!(
                "Loaded {} workouts (format v{})",
                history.workouts.len(),
                history.version
            );
            return history.workouts;
        }

        // Legacy blobs are a bare array with no version tag.
        match serde_json::from_str::<Vec<Workout>>(&blob) {
            Ok(workouts) => {
                tracing::debug!("Loaded {} workouts (legacy format)", workouts.len());
                workouts
            }
            Err(e) => {
                tracing::warn!("Malformed workout history, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Drop the persisted blob.
    pub fn clear(&mut self) {
        self.storage.remove(STORAGE_KEY);
    }
}
