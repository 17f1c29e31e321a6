// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant roster changes: enrollment, confirmation, check-in.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;

use sala_mission::{CheckInResult, ConfirmOutcome, check_in as validate_check_in,
    confirm_participation as validate_confirmation};
use sala_mission_audit::Cause;
use sala_mission_domain::{Mission, MissionParticipant, Position, User};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewParticipantRow, format_datetime};
use crate::diesel_schema::mission_participants;
use crate::error::{OperationError, PersistenceError};
use crate::queries;

/// Adds a user to a mission's roster, unconfirmed.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateParticipant`] if the user is
/// already on the roster, or an error if an insert fails.
pub fn add_participant(
    conn: &mut SqliteConnection,
    participant: &MissionParticipant,
) -> Result<MissionParticipant, PersistenceError> {
    conn.transaction::<MissionParticipant, PersistenceError, _>(|conn| {
        let existing: i64 = mission_participants::table
            .filter(mission_participants::mission_id.eq(participant.mission_id))
            .filter(mission_participants::user_id.eq(participant.user_id))
            .count()
            .get_result(conn)?;
        if existing > 0 {
            return Err(PersistenceError::DuplicateParticipant {
                mission_id: participant.mission_id,
                user_id: participant.user_id,
            });
        }

        let row: NewParticipantRow = NewParticipantRow::try_from_participant(participant)?;
        diesel::insert_into(mission_participants::table)
            .values(&row)
            .execute(conn)?;
        let id: i64 = get_last_insert_rowid(conn)?;
        Ok(participant.clone().with_id(id))
    })
}

/// Confirms the actor's own participation, atomically.
///
/// Re-confirming is a no-op: the stored row is returned unchanged and
/// no audit event is written. A first confirmation writes the
/// confirmation columns with a not-yet-confirmed precondition and
/// appends the audit event in the same transaction.
///
/// # Errors
///
/// Returns [`OperationError::Core`] when the rules crate refuses the
/// confirmation, and [`OperationError::Persistence`] for missing rows,
/// concurrent updates, or query failures.
pub fn confirm_participation(
    conn: &mut SqliteConnection,
    mission_id: i64,
    actor_id: i64,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<ConfirmOutcome, OperationError> {
    conn.transaction::<ConfirmOutcome, OperationError, _>(|conn| {
        let mission: Mission = queries::missions::get_mission(conn, mission_id)?;
        let actor: User = queries::users::get_user(conn, actor_id)?;
        let participant: MissionParticipant =
            queries::participants::get_participant(conn, mission_id, actor_id)?;

        let outcome: ConfirmOutcome =
            validate_confirmation(&actor, &participant, &mission, cause, now)?;

        if let ConfirmOutcome::Confirmed {
            participant: updated,
            audit_event,
        } = &outcome
        {
            let confirmed_at: Option<String> =
                updated.confirmed_at.map(format_datetime).transpose()?;
            let affected: usize = diesel::update(
                mission_participants::table
                    .filter(mission_participants::mission_id.eq(mission_id))
                    .filter(mission_participants::user_id.eq(actor_id))
                    .filter(mission_participants::confirmed.eq(0)),
            )
            .set((
                mission_participants::confirmed.eq(1),
                mission_participants::confirmed_at.eq(confirmed_at),
            ))
            .execute(conn)?;
            if affected == 0 {
                return Err(OperationError::Persistence(
                    PersistenceError::ConcurrentUpdate { mission_id },
                ));
            }
            super::audit::persist_audit_event(conn, audit_event)?;
        }

        Ok(outcome)
    })
}

/// Records the actor's own arrival at the mission site, atomically.
///
/// # Errors
///
/// Returns [`OperationError::Core`] when the rules crate refuses the
/// check-in, and [`OperationError::Persistence`] for missing rows or
/// query failures.
pub fn check_in(
    conn: &mut SqliteConnection,
    mission_id: i64,
    actor_id: i64,
    position: Position,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<CheckInResult, OperationError> {
    conn.transaction::<CheckInResult, OperationError, _>(|conn| {
        let mission: Mission = queries::missions::get_mission(conn, mission_id)?;
        let actor: User = queries::users::get_user(conn, actor_id)?;
        let participant: MissionParticipant =
            queries::participants::get_participant(conn, mission_id, actor_id)?;

        let result: CheckInResult =
            validate_check_in(&actor, &participant, &mission, position, cause, now)?;
        let updated: &MissionParticipant = &result.participant;

        let checked_in_at: Option<String> =
            updated.checked_in_at.map(format_datetime).transpose()?;
        diesel::update(
            mission_participants::table
                .filter(mission_participants::mission_id.eq(mission_id))
                .filter(mission_participants::user_id.eq(actor_id)),
        )
        .set((
            mission_participants::checked_in.eq(1),
            mission_participants::checked_in_at.eq(checked_in_at),
            mission_participants::check_in_latitude
                .eq(updated.check_in_position.map(|position| position.latitude)),
            mission_participants::check_in_longitude
                .eq(updated.check_in_position.map(|position| position.longitude)),
        ))
        .execute(conn)?;

        super::audit::persist_audit_event(conn, &result.audit_event)?;
        Ok(result)
    })
}
