//! One-shot geolocation provider.

use thiserror::Error;

use crate::workouts::types::LatLng;

/// Geolocation failures. Both degrade the session to list-only use; neither
/// is fatal.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user denied the location request
    #[error("Location access denied")]
    Denied,

    /// The sensor could not produce a fix
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// One-shot coordinate source. The session asks exactly once, with no retry
/// and no timeout.
pub trait LocationProvider {
    /// Attempt to produce the device's current coordinates.
    fn current_position(&mut self) -> Result<LatLng, LocationError>;
}

/// Provider that always reports a fixed coordinate.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationProvider {
    position: LatLng,
}

impl StaticLocationProvider {
    /// Provider pinned to `position`.
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

impl LocationProvider for StaticLocationProvider {
    fn current_position(&mut self) -> Result<LatLng, LocationError> {
        Ok(self.position)
    }
}
