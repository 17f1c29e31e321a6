// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod access;
mod error;
mod geo;
mod mission;
mod role;
mod scope;
mod user;

#[cfg(test)]
mod tests;

pub use access::{can_access, can_access_unscoped};
pub use error::DomainError;
pub use geo::{
    BUS_SPEED_KMH, CAR_SPEED_KMH, EARTH_RADIUS_KM, Position, TravelEstimate, estimate_travel,
    haversine_km,
};
pub use mission::{
    Activity, Mission, MissionParticipant, MissionStatus, MissionType, ParticipantRole,
    TrackingPing,
};
pub use role::{Role, RoleHierarchy, RoleHierarchyEntry};
pub use scope::{LocationScope, ScopeKind, ScopeNode, ScopeTree};
pub use user::User;
