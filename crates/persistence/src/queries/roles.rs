// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role hierarchy loading.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::{Role, RoleHierarchy, RoleHierarchyEntry};

use crate::data_models::RoleAccessRow;
use crate::diesel_schema::role_hierarchy_access;
use crate::error::PersistenceError;

/// Loads the seeded role hierarchy.
///
/// The table is seeded by migration and consulted on every
/// authorization decision, so an empty or incomplete table is fatal:
/// callers must refuse to start rather than fall back to defaults.
///
/// # Errors
///
/// Returns [`PersistenceError::RoleHierarchyUnavailable`] if the table
/// is empty, names an unknown role, or fails hierarchy validation.
pub fn load_role_hierarchy(conn: &mut SqliteConnection) -> Result<RoleHierarchy, PersistenceError> {
    let rows: Vec<RoleAccessRow> = role_hierarchy_access::table.load::<RoleAccessRow>(conn)?;

    if rows.is_empty() {
        return Err(PersistenceError::RoleHierarchyUnavailable(String::from(
            "role_hierarchy_access table is empty",
        )));
    }

    let entries: Vec<RoleHierarchyEntry> = rows
        .into_iter()
        .map(|row| {
            let role: Role = row
                .role
                .parse()
                .map_err(|err: sala_mission_domain::DomainError| {
                    PersistenceError::RoleHierarchyUnavailable(err.to_string())
                })?;
            Ok(RoleHierarchyEntry {
                role,
                level: row.level,
                can_approve_missions: row.can_approve_missions != 0,
                can_view_analytics: row.can_view_analytics != 0,
            })
        })
        .collect::<Result<Vec<RoleHierarchyEntry>, PersistenceError>>()?;

    RoleHierarchy::from_entries(&entries)
        .map_err(|err| PersistenceError::RoleHierarchyUnavailable(err.to_string()))
}
