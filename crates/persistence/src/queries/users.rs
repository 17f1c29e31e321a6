// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User lookups.

use diesel::prelude::*;
use diesel::SqliteConnection;

use sala_mission_domain::User;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Fetches a user by id.
///
/// # Errors
///
/// Returns [`PersistenceError::UserNotFound`] if no such user exists,
/// or an error if the query fails or the row cannot be reconstructed.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<User, PersistenceError> {
    let row: UserRow = users::table
        .filter(users::user_id.eq(user_id))
        .first::<UserRow>(conn)
        .optional()?
        .ok_or(PersistenceError::UserNotFound(user_id))?;
    User::try_from(row)
}

/// Whether any administrator account exists yet.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn administrator_exists(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let count: i64 = users::table
        .filter(users::role.eq("administrator"))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
