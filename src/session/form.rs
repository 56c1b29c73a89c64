//! Form field values and validation.

use thiserror::Error;

use crate::workouts::types::WorkoutKind;

/// Rejected form input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A consulted field is NaN or infinite (blank fields arrive as NaN)
    #[error("{field} has to be a number")]
    NotFinite {
        /// Offending field name
        field: &'static str,
    },

    /// A consulted field is zero or negative where it must be positive
    #[error("{field} has to be a positive number")]
    NotPositive {
        /// Offending field name
        field: &'static str,
    },
}

/// Raw field values the presentation layer read from the form at submit time.
///
/// Only the field matching `kind` is consulted among `cadence_spm` and
/// `elevation_gain_m`; the other carries whatever the hidden input held.
#[derive(Debug, Clone, Copy)]
pub struct FormInput {
    /// Selected activity kind
    pub kind: WorkoutKind,
    /// Distance field, km
    pub distance_km: f64,
    /// Duration field, minutes
    pub duration_min: f64,
    /// Cadence field, steps/min (Running only)
    pub cadence_spm: f64,
    /// Elevation gain field, meters (Cycling only; signed)
    pub elevation_gain_m: f64,
}

impl FormInput {
    /// Check the positivity/finiteness rules for the selected kind.
    ///
    /// Elevation gain is deliberately exempt from the positivity rule:
    /// a net-downhill ride records a negative gain.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_positive("Distance", self.distance_km)?;
        check_positive("Duration", self.duration_min)?;
        match self.kind {
            WorkoutKind::Running => check_positive("Cadence", self.cadence_spm),
            WorkoutKind::Cycling => check_finite("Elevation gain", self.elevation_gain_m),
        }
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}
