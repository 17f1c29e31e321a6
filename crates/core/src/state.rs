// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sala_mission_audit::{AuditEvent, StateSnapshot};
use sala_mission_domain::{Mission, MissionParticipant};

use crate::error::CoreError;

/// The outcome of a successful lifecycle transition: the mission as it
/// should be written, plus the one audit event the change produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The mission with the new status and field effects applied.
    pub mission: Mission,
    /// The audit event to append alongside the write.
    pub audit_event: AuditEvent,
}

/// The outcome of a participation confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// First confirmation; the row and the event need persisting.
    Confirmed {
        /// The participant row with the confirmation applied.
        participant: MissionParticipant,
        /// The audit event to append alongside the write.
        audit_event: AuditEvent,
    },
    /// The row was already confirmed. Safe no-op; nothing to persist.
    AlreadyConfirmed {
        /// The unchanged participant row.
        participant: MissionParticipant,
    },
}

/// The outcome of a successful field check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInResult {
    /// The participant row with the check-in applied.
    pub participant: MissionParticipant,
    /// Straight-line distance from the mission site in kilometres.
    ///
    /// Informational only; an over-distance check-in is logged, never
    /// rejected.
    pub distance_km: f64,
    /// The audit event to append alongside the write.
    pub audit_event: AuditEvent,
}

/// Serializes a mission into an audit snapshot.
///
/// # Errors
///
/// Returns [`CoreError::Serialization`] if the mission cannot be encoded
/// as JSON.
pub fn snapshot(mission: &Mission) -> Result<StateSnapshot, CoreError> {
    let payload: String =
        serde_json::to_string(mission).map_err(|err| CoreError::Serialization(err.to_string()))?;
    Ok(StateSnapshot::new(mission.status, payload))
}
