// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tracking ping lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::TrackingPing;

use crate::data_models::TrackingRow;
use crate::diesel_schema::mission_tracking;
use crate::error::PersistenceError;

/// Lists a mission's tracking pings in the order they were recorded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be
/// reconstructed.
pub fn list_pings(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<Vec<TrackingPing>, PersistenceError> {
    let rows: Vec<TrackingRow> = mission_tracking::table
        .filter(mission_tracking::mission_id.eq(mission_id))
        .order(mission_tracking::tracking_id.asc())
        .load::<TrackingRow>(conn)?;
    rows.into_iter().map(TrackingPing::try_from).collect()
}
