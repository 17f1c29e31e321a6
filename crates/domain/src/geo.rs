// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Mean Earth radius in kilometres, as used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average car speed for travel estimates.
pub const CAR_SPEED_KMH: f64 = 50.0;

/// Assumed average bus speed for travel estimates.
pub const BUS_SPEED_KMH: f64 = 35.0;

/// A WGS 84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    pub longitude: f64,
}

impl Position {
    /// Creates a position after range-checking both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCoordinate`] when either value is
    /// outside its valid range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Great-circle distance between two positions in kilometres.
///
/// Standard haversine with [`EARTH_RADIUS_KM`]; accurate to well under a
/// kilometre at the distances field missions cover.
#[must_use]
pub fn haversine_km(from: Position, to: Position) -> f64 {
    let lat_from: f64 = from.latitude.to_radians();
    let lat_to: f64 = to.latitude.to_radians();
    let delta_lat: f64 = (to.latitude - from.latitude).to_radians();
    let delta_lon: f64 = (to.longitude - from.longitude).to_radians();

    let a: f64 = (delta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);
    let c: f64 = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// A travel estimate between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelEstimate {
    /// Great-circle distance, rounded to one decimal.
    ///
    /// Stored as tenths of a kilometre so the type stays `Eq` and no
    /// float comparison leaks into callers.
    pub distance_tenth_km: i64,
    /// Estimated car travel time, rounded to the nearest minute.
    pub car_minutes: i64,
    /// Estimated bus travel time, rounded to the nearest minute.
    pub bus_minutes: i64,
}

impl TravelEstimate {
    /// The distance in kilometres with one decimal of precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_km(&self) -> f64 {
        self.distance_tenth_km as f64 / 10.0
    }
}

/// Estimates straight-line travel between two points.
///
/// Pure calculation, no I/O: haversine distance, then fixed average
/// speeds of [`CAR_SPEED_KMH`] and [`BUS_SPEED_KMH`]. ETAs are computed
/// from the unrounded distance and rounded to the nearest minute.
#[must_use]
pub fn estimate_travel(from: Position, to: Position) -> TravelEstimate {
    let distance: f64 = haversine_km(from, to);
    TravelEstimate {
        distance_tenth_km: round_to_i64(distance * 10.0),
        car_minutes: round_to_i64(distance / CAR_SPEED_KMH * 60.0),
        bus_minutes: round_to_i64(distance / BUS_SPEED_KMH * 60.0),
    }
}

fn round_to_i64(value: f64) -> i64 {
    // Inputs are bounded by Earth's circumference; saturate rather than
    // panic if that ever stops holding.
    value.round().to_i64().unwrap_or(i64::MAX)
}
