// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Position, TravelEstimate, estimate_travel, haversine_km};

fn phnom_penh_office() -> Position {
    Position::new(11.5564, 104.9282).unwrap()
}

fn siem_reap_school() -> Position {
    Position::new(13.3633, 103.8564).unwrap()
}

#[test]
fn test_haversine_zero_for_same_point() {
    let office: Position = phnom_penh_office();
    assert!(haversine_km(office, office) < 1e-9);
}

#[test]
fn test_haversine_is_symmetric() {
    let there: f64 = haversine_km(phnom_penh_office(), siem_reap_school());
    let back: f64 = haversine_km(siem_reap_school(), phnom_penh_office());
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn test_phnom_penh_to_siem_reap_distance() {
    let distance: f64 = haversine_km(phnom_penh_office(), siem_reap_school());
    assert!((distance - 232.2).abs() < 0.1, "got {distance}");
}

#[test]
fn test_phnom_penh_to_siem_reap_estimate() {
    let estimate: TravelEstimate = estimate_travel(phnom_penh_office(), siem_reap_school());
    assert_eq!(estimate.distance_tenth_km, 2322);
    assert!((estimate.distance_km() - 232.2).abs() < 1e-9);
    assert_eq!(estimate.car_minutes, 279);
    assert_eq!(estimate.bus_minutes, 398);
}

#[test]
fn test_estimate_for_same_point_is_zero() {
    let estimate: TravelEstimate = estimate_travel(phnom_penh_office(), phnom_penh_office());
    assert_eq!(estimate.distance_tenth_km, 0);
    assert_eq!(estimate.car_minutes, 0);
    assert_eq!(estimate.bus_minutes, 0);
}

#[test]
fn test_antipodal_distance_is_half_circumference() {
    let a: Position = Position::new(0.0, 0.0).unwrap();
    let b: Position = Position::new(0.0, 180.0).unwrap();
    let distance: f64 = haversine_km(a, b);
    // pi * 6371
    assert!((distance - 20_015.1).abs() < 0.5, "got {distance}");
}

#[test]
fn test_position_rejects_out_of_range_latitude() {
    let err: DomainError = Position::new(90.01, 0.0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidCoordinate {
            field: "latitude",
            ..
        }
    ));
}

#[test]
fn test_position_rejects_out_of_range_longitude() {
    let err: DomainError = Position::new(0.0, -180.5).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidCoordinate {
            field: "longitude",
            ..
        }
    ));
}

#[test]
fn test_position_rejects_non_finite_values() {
    assert!(Position::new(f64::NAN, 0.0).is_err());
    assert!(Position::new(0.0, f64::INFINITY).is_err());
}
