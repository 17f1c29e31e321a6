// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coordinate input validation.
//!
//! Positions arrive from mobile devices as raw floats. This module
//! checks them at the API boundary so a garbage reading is refused
//! with a field-level message before it reaches the domain.

use thiserror::Error;

use sala_mission_domain::Position;

/// Coordinate validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    /// A latitude outside [-90, 90].
    #[error("Latitude {value} is out of range (must be between -90 and 90)")]
    LatitudeOutOfRange { value: f64 },

    /// A longitude outside [-180, 180].
    #[error("Longitude {value} is out of range (must be between -180 and 180)")]
    LongitudeOutOfRange { value: f64 },

    /// A coordinate that is NaN or infinite.
    #[error("Coordinate {field} is not a finite number")]
    NotFinite { field: &'static str },

    /// A reported GPS accuracy that is negative or not finite.
    #[error("Accuracy {value} must be a finite, non-negative number of metres")]
    InvalidAccuracy { value: f64 },
}

/// Validates a latitude/longitude pair into a [`Position`].
///
/// # Errors
///
/// Returns a [`CoordinateError`] naming the offending coordinate.
pub fn validate_position(latitude: f64, longitude: f64) -> Result<Position, CoordinateError> {
    if !latitude.is_finite() {
        return Err(CoordinateError::NotFinite { field: "latitude" });
    }
    if !longitude.is_finite() {
        return Err(CoordinateError::NotFinite { field: "longitude" });
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CoordinateError::LatitudeOutOfRange { value: latitude });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::LongitudeOutOfRange { value: longitude });
    }
    // The domain check is strictly weaker than the above; failure here
    // would be a logic error, so surface it as out-of-range latitude.
    Position::new(latitude, longitude)
        .map_err(|_| CoordinateError::LatitudeOutOfRange { value: latitude })
}

/// Validates an optional reported GPS accuracy in metres.
///
/// # Errors
///
/// Returns [`CoordinateError::InvalidAccuracy`] for negative or
/// non-finite values.
pub fn validate_accuracy(accuracy_m: Option<f64>) -> Result<Option<f64>, CoordinateError> {
    match accuracy_m {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(CoordinateError::InvalidAccuracy { value })
        }
        other => Ok(other),
    }
}
