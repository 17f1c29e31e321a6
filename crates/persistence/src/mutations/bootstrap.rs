// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scope node and user creation.
//!
//! These run during setup and administration rather than day-to-day
//! mission work. Structural validation (parent links, level ordering,
//! role/scope pairing) happens in the domain types before rows reach
//! this module; foreign keys are the database-side backstop.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::{ScopeNode, User};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewUserRow, ScopeNodeRow};
use crate::diesel_schema::{scope_nodes, users};
use crate::error::PersistenceError;

/// Inserts a validated scope node.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the node id
/// already exists or the parent row is missing.
pub fn insert_scope_node(
    conn: &mut SqliteConnection,
    node: &ScopeNode,
) -> Result<(), PersistenceError> {
    let row: ScopeNodeRow = ScopeNodeRow::from(node);
    diesel::insert_into(scope_nodes::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Inserts a validated user and returns them with their assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails or the new rowid cannot be
/// read back.
pub fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<User, PersistenceError> {
    conn.transaction::<User, PersistenceError, _>(|conn| {
        let row: NewUserRow = NewUserRow::from(user);
        diesel::insert_into(users::table).values(&row).execute(conn)?;
        let id: i64 = get_last_insert_rowid(conn)?;
        Ok(user.clone().with_id(id))
    })
}
