// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_audit::AuditEvent;

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewAuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Appends an audit event and returns its id.
///
/// Events are append-only; nothing in this crate updates or deletes
/// them. Callers invoke this inside the same transaction as the state
/// change the event describes, so the change and its trail commit or
/// roll back together.
///
/// # Errors
///
/// Returns an error if the event cannot be serialized or the insert
/// fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEventRow = NewAuditEventRow::try_from_event(event)?;
    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
