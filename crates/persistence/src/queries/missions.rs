// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mission lookups and the location-scoped visibility query.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::{Mission, ScopeTree, User, can_access, can_access_unscoped};

use crate::data_models::{MissionRow, UserRow};
use crate::diesel_schema::{missions, users};
use crate::error::PersistenceError;

/// Fetches a mission by id.
///
/// # Errors
///
/// Returns [`PersistenceError::MissionNotFound`] if no such mission
/// exists, or an error if the query fails or the row cannot be
/// reconstructed.
pub fn get_mission(
    conn: &mut SqliteConnection,
    mission_id: i64,
) -> Result<Mission, PersistenceError> {
    let row: MissionRow = missions::table
        .filter(missions::mission_id.eq(mission_id))
        .first::<MissionRow>(conn)
        .optional()?
        .ok_or(PersistenceError::MissionNotFound(mission_id))?;
    Mission::try_from(row)
}

/// Lists the missions the actor is allowed to see.
///
/// Visibility follows the creator's location scope: a mission is
/// visible when the actor's scope node is an ancestor of (or equal to)
/// the creator's. Missions created by unscoped users are visible only
/// to administrators. Filtering happens here rather than in the
/// caller so no out-of-scope row ever leaves this crate.
///
/// # Errors
///
/// Returns an error if the query fails, a row cannot be reconstructed,
/// or a creator references a scope node missing from the tree.
pub fn list_visible_missions(
    conn: &mut SqliteConnection,
    tree: &ScopeTree,
    actor: &User,
) -> Result<Vec<Mission>, PersistenceError> {
    let rows: Vec<(MissionRow, UserRow)> = missions::table
        .inner_join(users::table)
        .order(missions::mission_id.asc())
        .load::<(MissionRow, UserRow)>(conn)?;

    let mut visible: Vec<Mission> = Vec::new();
    for (mission_row, creator_row) in rows {
        let creator: User = User::try_from(creator_row)?;
        let allowed: bool = match creator.scope_node_id() {
            Some(node_id) => can_access(tree, actor, node_id)
                .map_err(|err| PersistenceError::ReconstructionError(err.to_string()))?,
            None => can_access_unscoped(actor, false),
        };
        if allowed {
            visible.push(Mission::try_from(mission_row)?);
        }
    }
    Ok(visible)
}
