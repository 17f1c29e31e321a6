// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission creation and lifecycle transitions.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;

use sala_mission::{AuthzContext, Command, TransitionResult, apply_transition};
use sala_mission_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use sala_mission_domain::{Mission, User};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewMissionRow, format_datetime};
use crate::diesel_schema::missions;
use crate::error::{OperationError, PersistenceError};
use crate::queries;

/// Inserts a draft mission and its creation audit event, atomically.
///
/// The event's after-snapshot carries the stored mission, id included,
/// so it is built here once the rowid is known rather than by the
/// caller.
///
/// # Errors
///
/// Returns an error if serialization or either insert fails.
pub fn create_mission(
    conn: &mut SqliteConnection,
    mission: &Mission,
    actor: &Actor,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<Mission, PersistenceError> {
    conn.transaction::<Mission, PersistenceError, _>(|conn| {
        let row: NewMissionRow = NewMissionRow::try_from_mission(mission)?;
        diesel::insert_into(missions::table)
            .values(&row)
            .execute(conn)?;
        let id: i64 = get_last_insert_rowid(conn)?;
        let stored: Mission = mission.clone().with_id(id);

        let payload: String = serde_json::to_string(&stored)?;
        let event: AuditEvent = AuditEvent::new(
            Some(id),
            actor.clone(),
            cause.clone(),
            Action::new(String::from("CreateMission"), None),
            None,
            Some(StateSnapshot::new(stored.status, payload)),
            now,
        );
        super::audit::persist_audit_event(conn, &event)?;

        Ok(stored)
    })
}

/// Applies a lifecycle command to a stored mission, atomically.
///
/// The mission, actor, and creator are re-read inside the transaction
/// and the command is re-validated against that fresh state; a status
/// the caller saw earlier is never trusted. The write carries a
/// precondition on the status that was read, so a row changed by a
/// concurrent writer between read and write updates nothing and the
/// transaction rolls back.
///
/// # Errors
///
/// Returns [`OperationError::Core`] when the rules crate refuses the
/// command, and [`OperationError::Persistence`] for missing rows,
/// concurrent updates, or query failures.
pub fn transition_mission(
    conn: &mut SqliteConnection,
    ctx: &AuthzContext<'_>,
    actor_id: i64,
    mission_id: i64,
    command: &Command,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, OperationError> {
    conn.transaction::<TransitionResult, OperationError, _>(|conn| {
        let mission: Mission = queries::missions::get_mission(conn, mission_id)?;
        let actor: User = queries::users::get_user(conn, actor_id)?;
        let creator: User = queries::users::get_user(conn, mission.created_by)?;

        let result: TransitionResult =
            apply_transition(ctx, &mission, &creator, &actor, command, cause, now)?;
        let updated: &Mission = &result.mission;

        let approved_at: Option<String> = updated.approved_at.map(format_datetime).transpose()?;
        let affected: usize = diesel::update(
            missions::table
                .filter(missions::mission_id.eq(mission_id))
                .filter(missions::status.eq(mission.status.as_str())),
        )
        .set((
            missions::status.eq(updated.status.as_str()),
            missions::approved_by.eq(updated.approved_by),
            missions::approved_at.eq(approved_at),
            missions::approval_comments.eq(updated.approval_comments.clone()),
            missions::rejection_reason.eq(updated.rejection_reason.clone()),
            missions::completion_report.eq(updated.completion_report.clone()),
        ))
        .execute(conn)?;
        if affected == 0 {
            return Err(OperationError::Persistence(
                PersistenceError::ConcurrentUpdate { mission_id },
            ));
        }

        super::audit::persist_audit_event(conn, &result.audit_event)?;
        Ok(result)
    })
}
