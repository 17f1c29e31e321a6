// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::EstimateTravelRequest;

// ============================================================================
// Travel estimates
// ============================================================================

fn phnom_penh_to_siem_reap() -> EstimateTravelRequest {
    EstimateTravelRequest {
        from_latitude: 11.5564,
        from_longitude: 104.9282,
        to_latitude: 13.3633,
        to_longitude: 103.8564,
    }
}

#[test]
fn test_phnom_penh_to_siem_reap() {
    let response = handlers::estimate_travel(&phnom_penh_to_siem_reap()).expect("estimate");

    assert!((response.distance_km - 232.2).abs() < 0.5);
    assert_eq!(response.car_minutes, 279);
    assert_eq!(response.bus_minutes, 398);
}

#[test]
fn test_zero_distance_estimate() {
    let request: EstimateTravelRequest = EstimateTravelRequest {
        from_latitude: 11.5564,
        from_longitude: 104.9282,
        to_latitude: 11.5564,
        to_longitude: 104.9282,
    };

    let response = handlers::estimate_travel(&request).expect("estimate");
    assert!(response.distance_km < 0.001);
    assert_eq!(response.car_minutes, 0);
    assert_eq!(response.bus_minutes, 0);
}

#[test]
fn test_invalid_origin_is_rejected() {
    let mut request: EstimateTravelRequest = phnom_penh_to_siem_reap();
    request.from_longitude = 181.0;

    let result = handlers::estimate_travel(&request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "longitude"
    ));
}

#[test]
fn test_non_finite_coordinate_is_rejected() {
    let mut request: EstimateTravelRequest = phnom_penh_to_siem_reap();
    request.to_latitude = f64::NAN;

    let result = handlers::estimate_travel(&request);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
