// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types bridging the database schema and the domain.
//!
//! Every stored enum is kept as its stable string form; reconstruction
//! parses it back and treats failure as data corruption, never as a
//! default.

use diesel::prelude::*;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use sala_mission_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use sala_mission_domain::{
    LocationScope, Mission, MissionParticipant, Position, ScopeNode, TrackingPing, User,
};

use crate::diesel_schema::{
    audit_events, mission_participants, mission_tracking, missions, scope_nodes, users,
};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn format_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(&DATE_FORMAT)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT)
        .map_err(|err| PersistenceError::ReconstructionError(format!("bad date '{value}': {err}")))
}

pub fn format_datetime(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

pub fn parse_datetime(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|err| {
        PersistenceError::ReconstructionError(format!("bad timestamp '{value}': {err}"))
    })
}

fn reconstruction<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

// ============================================================================
// Scope nodes
// ============================================================================

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = scope_nodes)]
pub struct ScopeNodeRow {
    pub node_id: String,
    pub kind: String,
    pub parent_id: Option<String>,
}

impl From<&ScopeNode> for ScopeNodeRow {
    fn from(node: &ScopeNode) -> Self {
        Self {
            node_id: node.id.clone(),
            kind: node.kind.as_str().to_string(),
            parent_id: node.parent_id.clone(),
        }
    }
}

impl TryFrom<ScopeNodeRow> for ScopeNode {
    type Error = PersistenceError;

    fn try_from(row: ScopeNodeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.node_id,
            kind: row.kind.parse().map_err(reconstruction)?,
            parent_id: row.parent_id,
        })
    }
}

// ============================================================================
// Role hierarchy
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct RoleAccessRow {
    pub role: String,
    pub level: i32,
    pub can_approve_missions: i32,
    pub can_view_analytics: i32,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct UserRow {
    pub user_id: i64,
    pub name: String,
    pub role: String,
    pub zone_id: Option<String>,
    pub province_id: Option<String>,
    pub department_id: Option<String>,
    pub cluster_id: Option<String>,
    pub school_id: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub name: String,
    pub role: String,
    pub zone_id: Option<String>,
    pub province_id: Option<String>,
    pub department_id: Option<String>,
    pub cluster_id: Option<String>,
    pub school_id: Option<String>,
}

impl From<&User> for NewUserRow {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            zone_id: user.scope.as_ref().map(|scope| scope.zone_id.clone()),
            province_id: user.scope.as_ref().and_then(|scope| scope.province_id.clone()),
            department_id: user
                .scope
                .as_ref()
                .and_then(|scope| scope.department_id.clone()),
            cluster_id: user.scope.as_ref().and_then(|scope| scope.cluster_id.clone()),
            school_id: user.scope.as_ref().and_then(|scope| scope.school_id.clone()),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let scope: Option<LocationScope> = match row.zone_id {
            Some(zone_id) => Some(LocationScope {
                zone_id,
                province_id: row.province_id,
                department_id: row.department_id,
                cluster_id: row.cluster_id,
                school_id: row.school_id,
            }),
            None => None,
        };
        Ok(Self {
            id: Some(row.user_id),
            name: row.name,
            role: row.role.parse().map_err(reconstruction)?,
            scope,
        })
    }
}

// ============================================================================
// Missions
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct MissionRow {
    pub mission_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub mission_type: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: i64,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub approval_comments: Option<String>,
    pub rejection_reason: Option<String>,
    pub completion_report: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub struct NewMissionRow {
    pub title: String,
    pub description: Option<String>,
    pub mission_type: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: i64,
    pub approved_by: Option<i64>,
    pub approved_at: Option<String>,
    pub approval_comments: Option<String>,
    pub rejection_reason: Option<String>,
    pub completion_report: Option<String>,
    pub created_at: String,
}

impl NewMissionRow {
    /// Serializes a mission for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or timestamp cannot be formatted.
    pub fn try_from_mission(mission: &Mission) -> Result<Self, PersistenceError> {
        Ok(Self {
            title: mission.title.clone(),
            description: mission.description.clone(),
            mission_type: mission.mission_type.as_str().to_string(),
            status: mission.status.as_str().to_string(),
            start_date: format_date(mission.start_date)?,
            end_date: format_date(mission.end_date)?,
            location_name: mission.location_name.clone(),
            latitude: mission.position.latitude,
            longitude: mission.position.longitude,
            created_by: mission.created_by,
            approved_by: mission.approved_by,
            approved_at: mission.approved_at.map(format_datetime).transpose()?,
            approval_comments: mission.approval_comments.clone(),
            rejection_reason: mission.rejection_reason.clone(),
            completion_report: mission.completion_report.clone(),
            created_at: format_datetime(mission.created_at)?,
        })
    }
}

impl TryFrom<MissionRow> for Mission {
    type Error = PersistenceError;

    fn try_from(row: MissionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.mission_id),
            title: row.title,
            description: row.description,
            mission_type: row.mission_type.parse().map_err(reconstruction)?,
            status: row.status.parse().map_err(reconstruction)?,
            start_date: parse_date(&row.start_date)?,
            end_date: parse_date(&row.end_date)?,
            location_name: row.location_name,
            position: Position::new(row.latitude, row.longitude).map_err(reconstruction)?,
            created_by: row.created_by,
            approved_by: row.approved_by,
            approved_at: row.approved_at.as_deref().map(parse_datetime).transpose()?,
            approval_comments: row.approval_comments,
            rejection_reason: row.rejection_reason,
            completion_report: row.completion_report,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

// ============================================================================
// Participants
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub mission_id: i64,
    pub user_id: i64,
    pub participant_role: String,
    pub confirmed: i32,
    pub confirmed_at: Option<String>,
    pub checked_in: i32,
    pub checked_in_at: Option<String>,
    pub check_in_latitude: Option<f64>,
    pub check_in_longitude: Option<f64>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mission_participants)]
pub struct NewParticipantRow {
    pub mission_id: i64,
    pub user_id: i64,
    pub participant_role: String,
    pub confirmed: i32,
    pub confirmed_at: Option<String>,
    pub checked_in: i32,
    pub checked_in_at: Option<String>,
    pub check_in_latitude: Option<f64>,
    pub check_in_longitude: Option<f64>,
}

impl NewParticipantRow {
    /// Serializes a participant for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn try_from_participant(
        participant: &MissionParticipant,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            mission_id: participant.mission_id,
            user_id: participant.user_id,
            participant_role: participant.role.as_str().to_string(),
            confirmed: i32::from(participant.confirmed),
            confirmed_at: participant.confirmed_at.map(format_datetime).transpose()?,
            checked_in: i32::from(participant.checked_in),
            checked_in_at: participant.checked_in_at.map(format_datetime).transpose()?,
            check_in_latitude: participant.check_in_position.map(|position| position.latitude),
            check_in_longitude: participant
                .check_in_position
                .map(|position| position.longitude),
        })
    }
}

impl TryFrom<ParticipantRow> for MissionParticipant {
    type Error = PersistenceError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let check_in_position: Option<Position> =
            match (row.check_in_latitude, row.check_in_longitude) {
                (Some(latitude), Some(longitude)) => {
                    Some(Position::new(latitude, longitude).map_err(reconstruction)?)
                }
                (None, None) => None,
                _ => {
                    return Err(PersistenceError::ReconstructionError(format!(
                        "participant {} has a half-stored check-in position",
                        row.participant_id
                    )));
                }
            };
        Ok(Self {
            id: Some(row.participant_id),
            mission_id: row.mission_id,
            user_id: row.user_id,
            role: row.participant_role.parse().map_err(reconstruction)?,
            confirmed: row.confirmed != 0,
            confirmed_at: row.confirmed_at.as_deref().map(parse_datetime).transpose()?,
            checked_in: row.checked_in != 0,
            checked_in_at: row.checked_in_at.as_deref().map(parse_datetime).transpose()?,
            check_in_position,
        })
    }
}

// ============================================================================
// Tracking
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct TrackingRow {
    pub tracking_id: i64,
    pub mission_id: i64,
    pub user_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub recorded_at: String,
    pub activity: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mission_tracking)]
pub struct NewTrackingRow {
    pub mission_id: i64,
    pub user_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub recorded_at: String,
    pub activity: String,
    pub notes: Option<String>,
}

impl NewTrackingRow {
    /// Serializes a ping for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn try_from_ping(ping: &TrackingPing) -> Result<Self, PersistenceError> {
        Ok(Self {
            mission_id: ping.mission_id,
            user_id: ping.user_id,
            latitude: ping.position.latitude,
            longitude: ping.position.longitude,
            accuracy_m: ping.accuracy_m,
            recorded_at: format_datetime(ping.recorded_at)?,
            activity: ping.activity.as_str().to_string(),
            notes: ping.notes.clone(),
        })
    }
}

impl TryFrom<TrackingRow> for TrackingPing {
    type Error = PersistenceError;

    fn try_from(row: TrackingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.tracking_id),
            mission_id: row.mission_id,
            user_id: row.user_id,
            position: Position::new(row.latitude, row.longitude).map_err(reconstruction)?,
            accuracy_m: row.accuracy_m,
            recorded_at: parse_datetime(&row.recorded_at)?,
            activity: row.activity.parse().map_err(reconstruction)?,
            notes: row.notes,
        })
    }
}

// ============================================================================
// Audit events
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub mission_id: Option<i64>,
    pub actor_user_id: i64,
    pub actor_role: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_status: Option<String>,
    pub before_snapshot_json: Option<String>,
    pub after_status: Option<String>,
    pub after_snapshot_json: Option<String>,
    pub recorded_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub mission_id: Option<i64>,
    pub actor_user_id: i64,
    pub actor_role: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_status: Option<String>,
    pub before_snapshot_json: Option<String>,
    pub after_status: Option<String>,
    pub after_snapshot_json: Option<String>,
    pub recorded_at: String,
}

impl NewAuditEventRow {
    /// Serializes an audit event for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn try_from_event(event: &AuditEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            mission_id: event.mission_id,
            actor_user_id: event.actor.user_id,
            actor_role: event.actor.role.as_str().to_string(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action_name: event.action.name.clone(),
            action_details: event.action.details.clone(),
            before_status: event
                .before
                .as_ref()
                .map(|snapshot| snapshot.status.as_str().to_string()),
            before_snapshot_json: event.before.as_ref().map(|snapshot| snapshot.payload.clone()),
            after_status: event
                .after
                .as_ref()
                .map(|snapshot| snapshot.status.as_str().to_string()),
            after_snapshot_json: event.after.as_ref().map(|snapshot| snapshot.payload.clone()),
            recorded_at: format_datetime(event.recorded_at)?,
        })
    }
}

fn snapshot_from_columns(
    status: Option<String>,
    payload: Option<String>,
) -> Result<Option<StateSnapshot>, PersistenceError> {
    match (status, payload) {
        (Some(status), Some(payload)) => Ok(Some(StateSnapshot::new(
            status.parse().map_err(reconstruction)?,
            payload,
        ))),
        (None, None) => Ok(None),
        _ => Err(PersistenceError::ReconstructionError(String::from(
            "audit snapshot has status without payload or payload without status",
        ))),
    }
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            mission_id: row.mission_id,
            actor: Actor::new(row.actor_user_id, row.actor_role.parse().map_err(reconstruction)?),
            cause: Cause::new(row.cause_id, row.cause_description),
            action: Action::new(row.action_name, row.action_details),
            before: snapshot_from_columns(row.before_status, row.before_snapshot_json)?,
            after: snapshot_from_columns(row.after_status, row.after_snapshot_json)?,
            recorded_at: parse_datetime(&row.recorded_at)?,
        })
    }
}
