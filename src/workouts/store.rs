//! In-memory workout store.

use uuid::Uuid;

use crate::workouts::types::Workout;

/// Insertion-ordered collection of recorded workouts.
///
/// The store is the single source of truth for the current session. It is
/// owned by the session controller; collaborators only ever receive read-only
/// views of its contents.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout. Ordering is insertion order and never changes.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Look up a workout by id.
    pub fn find_by_id(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Read-only ordered view of all workouts.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Replace the whole contents. Used only for startup rehydration.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    /// Number of recorded workouts.
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Whether the store holds no workouts.
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
