// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tracking ping persistence.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;

use sala_mission::record_ping as validate_ping;
use sala_mission_domain::{Activity, Mission, MissionParticipant, Position, TrackingPing, User};

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewTrackingRow;
use crate::diesel_schema::mission_tracking;
use crate::error::OperationError;
use crate::queries;

/// Appends a position ping for the actor's own participation.
///
/// The ping row is its own record; no audit event accompanies it.
///
/// # Errors
///
/// Returns [`OperationError::Core`] when the rules crate refuses the
/// ping, and [`OperationError::Persistence`] for missing rows or query
/// failures.
#[allow(clippy::too_many_arguments)]
pub fn record_ping(
    conn: &mut SqliteConnection,
    mission_id: i64,
    actor_id: i64,
    position: Position,
    accuracy_m: Option<f64>,
    activity: Activity,
    notes: Option<String>,
    now: OffsetDateTime,
) -> Result<TrackingPing, OperationError> {
    conn.transaction::<TrackingPing, OperationError, _>(|conn| {
        let mission: Mission = queries::missions::get_mission(conn, mission_id)?;
        let actor: User = queries::users::get_user(conn, actor_id)?;
        let participant: MissionParticipant =
            queries::participants::get_participant(conn, mission_id, actor_id)?;

        let ping: TrackingPing = validate_ping(
            &actor,
            &participant,
            &mission,
            position,
            accuracy_m,
            activity,
            notes,
            now,
        )?;

        let row: NewTrackingRow = NewTrackingRow::try_from_ping(&ping)?;
        diesel::insert_into(mission_tracking::table)
            .values(&row)
            .execute(conn)?;
        let id: i64 = get_last_insert_rowid(conn)?;
        Ok(ping.with_id(id))
    })
}
