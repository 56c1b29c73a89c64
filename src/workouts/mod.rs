//! Workout domain model: recorded activities and the session store.

pub mod store;
pub mod types;

pub use store::WorkoutStore;
pub use types::{LatLng, Workout, WorkoutDetails, WorkoutKind};
