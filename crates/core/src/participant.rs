// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use tracing::warn;

use sala_mission_audit::{Action, Actor, AuditEvent, Cause};
use sala_mission_domain::{
    Activity, Mission, MissionParticipant, MissionStatus, Position, TrackingPing, User,
    haversine_km,
};

use crate::error::CoreError;
use crate::state::{CheckInResult, ConfirmOutcome};

/// Check-ins further than this from the mission site are logged as
/// anomalies. They are never rejected; field GPS is noisy and sites can
/// be mislocated.
pub const CHECK_IN_DISTANCE_WARN_KM: f64 = 5.0;

fn persisted_id(user: &User) -> Result<i64, CoreError> {
    user.id.ok_or(CoreError::Validation {
        field: "user_id",
        message: String::from("user has not been persisted"),
    })
}

fn require_self(action: &'static str, actor: &User, participant: &MissionParticipant) -> Result<i64, CoreError> {
    let actor_id: i64 = persisted_id(actor)?;
    if actor_id != participant.user_id {
        return Err(CoreError::Forbidden {
            action,
            reason: format!(
                "user {actor_id} may not act on the participation of user {}",
                participant.user_id
            ),
        });
    }
    Ok(actor_id)
}

/// Confirms the actor's own participation in a mission.
///
/// Confirmation is strictly self-service; nobody confirms on another
/// user's behalf. Re-confirming an already-confirmed row is a safe
/// idempotent no-op that returns the unchanged row, and only a first
/// confirmation emits an audit event.
///
/// # Errors
///
/// Returns [`CoreError::Forbidden`] when the actor is not the
/// participant and [`CoreError::MissionNotActive`] when the mission has
/// reached a terminal status.
pub fn confirm_participation(
    actor: &User,
    participant: &MissionParticipant,
    mission: &Mission,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<ConfirmOutcome, CoreError> {
    require_self("ConfirmParticipation", actor, participant)?;
    if participant.confirmed {
        return Ok(ConfirmOutcome::AlreadyConfirmed {
            participant: participant.clone(),
        });
    }
    if mission.status.is_terminal() {
        return Err(CoreError::MissionNotActive {
            mission_id: participant.mission_id,
            status: mission.status,
        });
    }

    let mut updated: MissionParticipant = participant.clone();
    updated.confirmed = true;
    updated.confirmed_at = Some(now);

    let audit_event: AuditEvent = AuditEvent::new(
        Some(participant.mission_id),
        Actor::new(participant.user_id, actor.role),
        cause.clone(),
        Action::new(String::from("ConfirmParticipation"), None),
        None,
        None,
        now,
    );

    Ok(ConfirmOutcome::Confirmed {
        participant: updated,
        audit_event,
    })
}

/// Records the actor's arrival at the mission site.
///
/// Requires a confirmed participant and a mission that is approved or
/// underway. The distance between the reported position and the mission
/// site is computed and returned; when it exceeds
/// [`CHECK_IN_DISTANCE_WARN_KM`] it is logged as an anomaly, but the
/// check-in still succeeds. The raw position is stored so any future
/// policy can be evaluated retroactively.
///
/// # Errors
///
/// Returns [`CoreError::Forbidden`] for another user's row,
/// [`CoreError::NotConfirmed`] before confirmation, and
/// [`CoreError::MissionNotActive`] unless the mission is approved or in
/// progress.
pub fn check_in(
    actor: &User,
    participant: &MissionParticipant,
    mission: &Mission,
    position: Position,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<CheckInResult, CoreError> {
    require_self("CheckIn", actor, participant)?;
    if !participant.confirmed {
        return Err(CoreError::NotConfirmed {
            mission_id: participant.mission_id,
            user_id: participant.user_id,
        });
    }
    if !mission.status.allows_check_in() {
        return Err(CoreError::MissionNotActive {
            mission_id: participant.mission_id,
            status: mission.status,
        });
    }

    let distance_km: f64 = haversine_km(mission.position, position);
    if distance_km > CHECK_IN_DISTANCE_WARN_KM {
        warn!(
            mission_id = participant.mission_id,
            user_id = participant.user_id,
            distance_km,
            "check-in far from mission site"
        );
    }

    let mut updated: MissionParticipant = participant.clone();
    updated.checked_in = true;
    updated.checked_in_at = Some(now);
    updated.check_in_position = Some(position);

    let audit_event: AuditEvent = AuditEvent::new(
        Some(participant.mission_id),
        Actor::new(participant.user_id, actor.role),
        cause.clone(),
        Action::new(
            String::from("CheckIn"),
            Some(format!("{distance_km:.1} km from mission site")),
        ),
        None,
        None,
        now,
    );

    Ok(CheckInResult {
        participant: updated,
        distance_km,
        audit_event,
    })
}

/// Builds an append-only position ping for a confirmed participant of a
/// mission that is underway.
///
/// Pings are facts, not state: nothing ever updates or deletes them, so
/// no audit event is produced — the ping row is its own record.
///
/// # Errors
///
/// Returns [`CoreError::Forbidden`] for another user's row,
/// [`CoreError::NotConfirmed`] before confirmation, and
/// [`CoreError::MissionNotActive`] unless the mission is in progress.
#[allow(clippy::too_many_arguments)]
pub fn record_ping(
    actor: &User,
    participant: &MissionParticipant,
    mission: &Mission,
    position: Position,
    accuracy_m: Option<f64>,
    activity: Activity,
    notes: Option<String>,
    now: OffsetDateTime,
) -> Result<TrackingPing, CoreError> {
    require_self("RecordPosition", actor, participant)?;
    if !participant.confirmed {
        return Err(CoreError::NotConfirmed {
            mission_id: participant.mission_id,
            user_id: participant.user_id,
        });
    }
    if mission.status != MissionStatus::InProgress {
        return Err(CoreError::MissionNotActive {
            mission_id: participant.mission_id,
            status: mission.status,
        });
    }

    Ok(TrackingPing {
        id: None,
        mission_id: participant.mission_id,
        user_id: participant.user_id,
        position,
        accuracy_m,
        recorded_at: now,
        activity,
        notes,
    })
}
