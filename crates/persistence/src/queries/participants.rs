// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::MissionParticipant;

use crate::data_models::ParticipantRow;
use crate::diesel_schema::mission_participants;
use crate::error::PersistenceError;

/// Fetches a participant by mission and user.
///
/// # Errors
///
/// Returns [`PersistenceError::ParticipantNotFound`] if the user is
/// not on the mission's roster, or an error if the query fails or the
/// row cannot be reconstructed.
pub fn get_participant(
    conn: &mut SqliteConnection,
    mission_id: i64,
    user_id: i64,
) -> Result<MissionParticipant, PersistenceError> {
    let row: ParticipantRow = mission_participants::table
        .filter(mission_participants::mission_id.eq(mission_id))
        .filter(mission_participants::user_id.eq(user_id))
        .first::<ParticipantRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ParticipantNotFound {
            mission_id,
            user_id,
        })?;
    MissionParticipant::try_from(row)
}

/// Lists every participant on a mission, in roster order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be
/// reconstructed.
pub fn list_participants(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<Vec<MissionParticipant>, PersistenceError> {
    let rows: Vec<ParticipantRow> = mission_participants::table
        .filter(mission_participants::mission_id.eq(mission_id))
        .order(mission_participants::participant_id.asc())
        .load::<ParticipantRow>(conn)?;
    rows.into_iter().map(MissionParticipant::try_from).collect()
}
