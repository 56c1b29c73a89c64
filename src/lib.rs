//! Waymark - Map-Based Workout Journal
//!
//! Click a location on a map, fill in a short form, and Waymark records the
//! run or ride at that spot, renders it as a marker and a list entry, and
//! persists the history. The map widget, the key-value storage and the
//! geolocation sensor are injected as opaque services, so the whole session
//! logic runs and tests headlessly.

pub mod location;
pub mod map;
pub mod session;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use location::{LocationError, LocationProvider};
pub use map::{MapGateway, MapWidget};
pub use session::{FormInput, SessionController, SessionState, SessionView};
pub use storage::{MemoryStorage, PersistenceGateway, StorageService};
pub use workouts::{LatLng, Workout, WorkoutKind, WorkoutStore};
