// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enums cross the boundary as their stable string forms; parsing
//! happens in the handlers so an unknown value is an input error, not
//! a panic or a default.

use time::{Date, OffsetDateTime};

use sala_mission_audit::AuditEvent;
use sala_mission_domain::{Mission, MissionParticipant, TrackingPing, TravelEstimate, User};

/// API request to create a new draft mission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateMissionRequest {
    /// The mission title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// The mission type (e.g. `"field_trip"`).
    pub mission_type: String,
    /// First day of field work.
    pub start_date: Date,
    /// Last day of field work, inclusive.
    pub end_date: Date,
    /// Human-readable site name.
    pub location_name: String,
    /// Site latitude in degrees.
    pub latitude: f64,
    /// Site longitude in degrees.
    pub longitude: f64,
}

/// A mission as exposed by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissionInfo {
    /// The mission id.
    pub mission_id: i64,
    /// The mission title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// The mission type.
    pub mission_type: String,
    /// The lifecycle status.
    pub status: String,
    /// First day of field work.
    pub start_date: Date,
    /// Last day of field work, inclusive.
    pub end_date: Date,
    /// Human-readable site name.
    pub location_name: String,
    /// Site latitude in degrees.
    pub latitude: f64,
    /// Site longitude in degrees.
    pub longitude: f64,
    /// The creating user's id.
    pub created_by: i64,
    /// The approving user's id, once approved.
    pub approved_by: Option<i64>,
    /// When the mission was approved.
    pub approved_at: Option<OffsetDateTime>,
    /// Approver's comments, if any.
    pub approval_comments: Option<String>,
    /// Why the mission was rejected, if it was.
    pub rejection_reason: Option<String>,
    /// Closing report, once completed.
    pub completion_report: Option<String>,
    /// When the mission was created.
    pub created_at: OffsetDateTime,
}

impl MissionInfo {
    /// Builds the DTO from a persisted mission.
    #[must_use]
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            mission_id: mission.id.unwrap_or(0),
            title: mission.title.clone(),
            description: mission.description.clone(),
            mission_type: mission.mission_type.as_str().to_string(),
            status: mission.status.as_str().to_string(),
            start_date: mission.start_date,
            end_date: mission.end_date,
            location_name: mission.location_name.clone(),
            latitude: mission.position.latitude,
            longitude: mission.position.longitude,
            created_by: mission.created_by,
            approved_by: mission.approved_by,
            approved_at: mission.approved_at,
            approval_comments: mission.approval_comments.clone(),
            rejection_reason: mission.rejection_reason.clone(),
            completion_report: mission.completion_report.clone(),
            created_at: mission.created_at,
        }
    }
}

/// API response for a successful mission creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateMissionResponse {
    /// The created mission.
    pub mission: MissionInfo,
    /// A success message.
    pub message: String,
}

/// API response listing the missions visible to the actor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListVisibleMissionsResponse {
    /// The visible missions, oldest first.
    pub missions: Vec<MissionInfo>,
}

/// API request to apply a lifecycle action to a mission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionMissionRequest {
    /// The action: `"submit"`, `"approve"`, `"reject"`, `"start"`,
    /// `"complete"`, or `"cancel"`.
    pub action: String,
    /// Approver's comments; only meaningful for `"approve"`.
    pub comments: Option<String>,
    /// Rejection reason; required for `"reject"`.
    pub reason: Option<String>,
    /// Closing report; only meaningful for `"complete"`.
    pub report: Option<String>,
}

/// API response for a successful lifecycle action.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionMissionResponse {
    /// The mission after the action.
    pub mission: MissionInfo,
    /// A success message.
    pub message: String,
}

/// A roster entry as exposed by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticipantInfo {
    /// The participant row id.
    pub participant_id: i64,
    /// The mission.
    pub mission_id: i64,
    /// The enrolled user.
    pub user_id: i64,
    /// The user's role on this mission.
    pub role: String,
    /// Whether the user has confirmed participation.
    pub confirmed: bool,
    /// When participation was confirmed.
    pub confirmed_at: Option<OffsetDateTime>,
    /// Whether the user has checked in at the site.
    pub checked_in: bool,
    /// When the user checked in.
    pub checked_in_at: Option<OffsetDateTime>,
    /// Latitude reported at check-in.
    pub check_in_latitude: Option<f64>,
    /// Longitude reported at check-in.
    pub check_in_longitude: Option<f64>,
}

impl ParticipantInfo {
    /// Builds the DTO from a persisted roster entry.
    #[must_use]
    pub fn from_participant(participant: &MissionParticipant) -> Self {
        Self {
            participant_id: participant.id.unwrap_or(0),
            mission_id: participant.mission_id,
            user_id: participant.user_id,
            role: participant.role.as_str().to_string(),
            confirmed: participant.confirmed,
            confirmed_at: participant.confirmed_at,
            checked_in: participant.checked_in,
            checked_in_at: participant.checked_in_at,
            check_in_latitude: participant.check_in_position.map(|position| position.latitude),
            check_in_longitude: participant
                .check_in_position
                .map(|position| position.longitude),
        }
    }
}

/// API request to enroll a user on a mission's roster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddParticipantRequest {
    /// The user to enroll.
    pub user_id: i64,
    /// The role they will play (e.g. `"participant"`).
    pub role: String,
}

/// API response for a successful enrollment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddParticipantResponse {
    /// The new roster entry.
    pub participant: ParticipantInfo,
    /// A success message.
    pub message: String,
}

/// API response for a participation confirmation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfirmParticipationResponse {
    /// The roster entry after the request.
    pub participant: ParticipantInfo,
    /// True when the entry was already confirmed and nothing changed.
    pub already_confirmed: bool,
    /// A success message.
    pub message: String,
}

/// API request to check in at the mission site.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CheckInRequest {
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
}

/// API response for a successful check-in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CheckInResponse {
    /// The roster entry after check-in.
    pub participant: ParticipantInfo,
    /// Great-circle distance from the mission site, in kilometres.
    pub distance_km: f64,
    /// A success message.
    pub message: String,
}

/// API request to record a position ping.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordPositionRequest {
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
    /// Reported GPS accuracy in metres, when the device provides one.
    pub accuracy_m: Option<f64>,
    /// What the participant reports doing (e.g. `"traveling"`).
    pub activity: String,
    /// Optional free-form note.
    pub notes: Option<String>,
}

/// A tracking ping as exposed by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PingInfo {
    /// The ping id.
    pub tracking_id: i64,
    /// The mission being tracked.
    pub mission_id: i64,
    /// The reporting participant.
    pub user_id: i64,
    /// Reported latitude in degrees.
    pub latitude: f64,
    /// Reported longitude in degrees.
    pub longitude: f64,
    /// Reported GPS accuracy in metres.
    pub accuracy_m: Option<f64>,
    /// When the position was recorded.
    pub recorded_at: OffsetDateTime,
    /// What the participant reported doing.
    pub activity: String,
    /// Optional free-form note.
    pub notes: Option<String>,
}

impl PingInfo {
    /// Builds the DTO from a persisted ping.
    #[must_use]
    pub fn from_ping(ping: &TrackingPing) -> Self {
        Self {
            tracking_id: ping.id.unwrap_or(0),
            mission_id: ping.mission_id,
            user_id: ping.user_id,
            latitude: ping.position.latitude,
            longitude: ping.position.longitude,
            accuracy_m: ping.accuracy_m,
            recorded_at: ping.recorded_at,
            activity: ping.activity.as_str().to_string(),
            notes: ping.notes.clone(),
        }
    }
}

/// API response for a recorded position ping.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordPositionResponse {
    /// The stored ping.
    pub ping: PingInfo,
    /// A success message.
    pub message: String,
}

/// API request for a travel estimate between two points.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EstimateTravelRequest {
    /// Origin latitude in degrees.
    pub from_latitude: f64,
    /// Origin longitude in degrees.
    pub from_longitude: f64,
    /// Destination latitude in degrees.
    pub to_latitude: f64,
    /// Destination longitude in degrees.
    pub to_longitude: f64,
}

/// API response carrying a travel estimate.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EstimateTravelResponse {
    /// Great-circle distance in kilometres, to one decimal place.
    pub distance_km: f64,
    /// Estimated minutes by car.
    pub car_minutes: i64,
    /// Estimated minutes by bus.
    pub bus_minutes: i64,
}

impl EstimateTravelResponse {
    /// Builds the DTO from a travel estimate.
    #[must_use]
    pub fn from_estimate(estimate: &TravelEstimate) -> Self {
        Self {
            distance_km: estimate.distance_km(),
            car_minutes: estimate.car_minutes,
            bus_minutes: estimate.bus_minutes,
        }
    }
}

/// API request to add a node to the location tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateScopeNodeRequest {
    /// The node id (e.g. `"province-11"`).
    pub node_id: String,
    /// The node kind (e.g. `"province"`).
    pub kind: String,
    /// The parent node id; absent only for zones.
    pub parent_id: Option<String>,
}

/// API response for a successful scope node creation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateScopeNodeResponse {
    /// The created node id.
    pub node_id: String,
    /// A success message.
    pub message: String,
}

/// API request to register a user.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterUserRequest {
    /// Display name.
    pub name: String,
    /// The user's role (e.g. `"teacher"`).
    pub role: String,
    /// Zone node id; absent only for administrators.
    pub zone_id: Option<String>,
    /// Province node id.
    pub province_id: Option<String>,
    /// Department node id.
    pub department_id: Option<String>,
    /// Cluster node id.
    pub cluster_id: Option<String>,
    /// School node id.
    pub school_id: Option<String>,
}

/// A user as exposed by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// The user's role.
    pub role: String,
    /// The id of the deepest node the user is stationed at, if any.
    pub scope_node_id: Option<String>,
}

impl UserInfo {
    /// Builds the DTO from a persisted user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id.unwrap_or(0),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            scope_node_id: user.scope_node_id().map(String::from),
        }
    }
}

/// API response for a successful user registration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterUserResponse {
    /// The registered user.
    pub user: UserInfo,
    /// A success message.
    pub message: String,
}

/// One audit event as exposed by the API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The mission the event belongs to.
    pub mission_id: Option<i64>,
    /// The acting user's id.
    pub actor_user_id: i64,
    /// The role the actor held when the action ran.
    pub actor_role: String,
    /// The action name.
    pub action: String,
    /// Additional action details.
    pub details: Option<String>,
    /// The mission status before the action.
    pub before_status: Option<String>,
    /// The mission status after the action.
    pub after_status: Option<String>,
    /// When the event was recorded.
    pub recorded_at: OffsetDateTime,
}

impl AuditEventInfo {
    /// Builds the DTO from a stored audit event.
    #[must_use]
    pub fn from_event(event: &AuditEvent) -> Self {
        Self {
            mission_id: event.mission_id,
            actor_user_id: event.actor.user_id,
            actor_role: event.actor.role.as_str().to_string(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before_status: event
                .before
                .as_ref()
                .map(|snapshot| snapshot.status.as_str().to_string()),
            after_status: event
                .after
                .as_ref()
                .map(|snapshot| snapshot.status.as_str().to_string()),
            recorded_at: event.recorded_at,
        }
    }
}

/// API response carrying a mission's audit trail.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissionAuditTrailResponse {
    /// The events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
