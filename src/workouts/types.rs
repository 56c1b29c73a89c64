//! Workout types and enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Kind of recorded activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// A run, tracked with cadence
    Running,
    /// A ride, tracked with elevation gain
    Cycling,
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "Running"),
            WorkoutKind::Cycling => write!(f, "Cycling"),
        }
    }
}

/// Kind-specific payload: the extra input field plus the metric derived from
/// it once at construction time. Serialized inline with the shared fields,
/// discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    /// Running payload
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Derived pace in min/km
        pace_min_per_km: f64,
    },
    /// Cycling payload
    Cycling {
        /// Elevation gain in meters; signed, downhill rides are negative
        elevation_gain_m: f64,
        /// Derived speed in km/h
        speed_km_per_h: f64,
    },
}

/// A single recorded activity, immutable after construction.
///
/// The derived metric (pace or speed) and the description string are computed
/// exactly once by the constructor and then carried as plain data; loading a
/// workout back from storage restores them verbatim rather than recomputing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier, correlation key between list entry and map marker
    pub id: Uuid,
    /// Construction timestamp; only used to derive the description
    pub created_at: DateTime<Utc>,
    /// Location of the map click that created this workout
    pub coords: LatLng,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_min: f64,
    /// Human-readable description, e.g. "Running on April 14"
    pub description: String,
    /// Kind-specific fields and derived metric
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    /// Record a run. Inputs are assumed to be validated by the caller.
    ///
    /// Pace is derived as `duration_min / distance_km`.
    pub fn running(coords: LatLng, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        let pace_min_per_km = duration_min / distance_km;
        Self::record(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            },
        )
    }

    /// Record a ride. Inputs are assumed to be validated by the caller;
    /// elevation gain may be negative.
    ///
    /// Speed is derived as `distance_km / (duration_min / 60)`.
    pub fn cycling(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let speed_km_per_h = distance_km / (duration_min / 60.0);
        Self::record(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            },
        )
    }

    fn record(
        coords: LatLng,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        let created_at = Utc::now();
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };
        let description = format!("{} on {}", kind, created_at.format("%B %-d"));

        Self {
            id: Uuid::new_v4(),
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            details,
        }
    }

    /// The activity kind carried by this workout.
    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}
