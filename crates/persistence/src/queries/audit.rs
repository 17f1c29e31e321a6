// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_audit::AuditEvent;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Lists a mission's audit trail in the order events were recorded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be
/// reconstructed.
pub fn mission_audit_trail(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::mission_id.eq(mission_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;
    rows.into_iter().map(AuditEvent::try_from).collect()
}
