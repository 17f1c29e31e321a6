// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Sala mission platform.
//!
//! This crate stores the scope tree, users, missions, participant
//! rosters, tracking pings, and the audit trail in `SQLite` via Diesel.
//!
//! ## Write discipline
//!
//! Mutations that depend on current state (lifecycle transitions,
//! confirmations, check-ins, pings) run as a single transaction that
//! re-reads the rows involved, re-validates the request through the
//! rules crate, and writes with a precondition on the state it read.
//! A row changed underneath the transaction updates nothing and the
//! caller sees a concurrency error rather than a lost update.
//!
//! ## Testing
//!
//! Tests run against in-memory `SQLite` databases. Each
//! [`Persistence::new_in_memory`] call opens a uniquely named shared
//! in-memory database, so tests are isolated and deterministic with
//! no files on disk.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use time::OffsetDateTime;

use sala_mission::{AuthzContext, CheckInResult, Command, ConfirmOutcome, TransitionResult};
use sala_mission_audit::{Actor, AuditEvent, Cause};
use sala_mission_domain::{
    Activity, Mission, MissionParticipant, Position, RoleHierarchy, ScopeNode, ScopeTree,
    TrackingPing, User,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::{OperationError, PersistenceError};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning a single `SQLite` connection.
///
/// Callers that share an adapter across threads wrap it in a mutex;
/// the write discipline above handles whatever interleaving remains.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Startup loads
    // ========================================================================

    /// Loads the full location tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored node is invalid.
    pub fn load_scope_tree(&mut self) -> Result<ScopeTree, PersistenceError> {
        queries::scopes::load_scope_tree(&mut self.conn)
    }

    /// Loads the seeded role hierarchy.
    ///
    /// An empty or incomplete table is an error; callers treat it as
    /// fatal at startup rather than falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::RoleHierarchyUnavailable`] if the
    /// table cannot back authorization decisions.
    pub fn load_role_hierarchy(&mut self) -> Result<RoleHierarchy, PersistenceError> {
        queries::roles::load_role_hierarchy(&mut self.conn)
    }

    // ========================================================================
    // Bootstrap
    // ========================================================================

    /// Inserts a validated scope node.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_scope_node(&mut self, node: &ScopeNode) -> Result<(), PersistenceError> {
        mutations::bootstrap::insert_scope_node(&mut self.conn, node)
    }

    /// Inserts a validated user and returns them with their assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(&mut self, user: &User) -> Result<User, PersistenceError> {
        mutations::bootstrap::create_user(&mut self.conn, user)
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::UserNotFound`] if no such user exists.
    pub fn get_user(&mut self, user_id: i64) -> Result<User, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Whether any administrator account exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn administrator_exists(&mut self) -> Result<bool, PersistenceError> {
        queries::users::administrator_exists(&mut self.conn)
    }

    // ========================================================================
    // Missions
    // ========================================================================

    /// Fetches a mission by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::MissionNotFound`] if no such mission
    /// exists.
    pub fn get_mission(&mut self, mission_id: i64) -> Result<Mission, PersistenceError> {
        queries::missions::get_mission(&mut self.conn, mission_id)
    }

    /// Lists the missions the actor is allowed to see.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be
    /// reconstructed.
    pub fn list_visible_missions(
        &mut self,
        tree: &ScopeTree,
        actor: &User,
    ) -> Result<Vec<Mission>, PersistenceError> {
        queries::missions::list_visible_missions(&mut self.conn, tree, actor)
    }

    /// Inserts a draft mission and its creation audit event, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or either insert fails.
    pub fn create_mission(
        &mut self,
        mission: &Mission,
        actor: &Actor,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<Mission, PersistenceError> {
        mutations::missions::create_mission(&mut self.conn, mission, actor, cause, now)
    }

    /// Applies a lifecycle command to a stored mission, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Core`] when the rules crate refuses
    /// the command, and [`OperationError::Persistence`] for missing
    /// rows, concurrent updates, or query failures.
    pub fn transition_mission(
        &mut self,
        ctx: &AuthzContext<'_>,
        actor_id: i64,
        mission_id: i64,
        command: &Command,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<TransitionResult, OperationError> {
        mutations::missions::transition_mission(
            &mut self.conn,
            ctx,
            actor_id,
            mission_id,
            command,
            cause,
            now,
        )
    }

    // ========================================================================
    // Participants & tracking
    // ========================================================================

    /// Adds a user to a mission's roster, unconfirmed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::DuplicateParticipant`] if the user
    /// is already on the roster.
    pub fn add_participant(
        &mut self,
        participant: &MissionParticipant,
    ) -> Result<MissionParticipant, PersistenceError> {
        mutations::participants::add_participant(&mut self.conn, participant)
    }

    /// Fetches a participant by mission and user.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ParticipantNotFound`] if the user is
    /// not on the mission's roster.
    pub fn get_participant(
        &mut self,
        mission_id: i64,
        user_id: i64,
    ) -> Result<MissionParticipant, PersistenceError> {
        queries::participants::get_participant(&mut self.conn, mission_id, user_id)
    }

    /// Lists every participant on a mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_participants(
        &mut self,
        mission_id: i64,
    ) -> Result<Vec<MissionParticipant>, PersistenceError> {
        queries::participants::list_participants(&mut self.conn, mission_id)
    }

    /// Confirms the actor's own participation, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Core`] when the rules crate refuses
    /// the confirmation.
    pub fn confirm_participation(
        &mut self,
        mission_id: i64,
        actor_id: i64,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<ConfirmOutcome, OperationError> {
        mutations::participants::confirm_participation(
            &mut self.conn,
            mission_id,
            actor_id,
            cause,
            now,
        )
    }

    /// Records the actor's own arrival at the mission site, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Core`] when the rules crate refuses
    /// the check-in.
    pub fn check_in(
        &mut self,
        mission_id: i64,
        actor_id: i64,
        position: Position,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<CheckInResult, OperationError> {
        mutations::participants::check_in(&mut self.conn, mission_id, actor_id, position, cause, now)
    }

    /// Appends a position ping for the actor's own participation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Core`] when the rules crate refuses
    /// the ping.
    #[allow(clippy::too_many_arguments)]
    pub fn record_ping(
        &mut self,
        mission_id: i64,
        actor_id: i64,
        position: Position,
        accuracy_m: Option<f64>,
        activity: Activity,
        notes: Option<String>,
        now: OffsetDateTime,
    ) -> Result<TrackingPing, OperationError> {
        mutations::tracking::record_ping(
            &mut self.conn,
            mission_id,
            actor_id,
            position,
            accuracy_m,
            activity,
            notes,
            now,
        )
    }

    /// Lists a mission's tracking pings in recorded order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pings(&mut self, mission_id: i64) -> Result<Vec<TrackingPing>, PersistenceError> {
        queries::tracking::list_pings(&mut self.conn, mission_id)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Appends an audit event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Lists a mission's audit trail in recorded order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be
    /// reconstructed.
    pub fn mission_audit_trail(
        &mut self,
        mission_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::mission_audit_trail(&mut self.conn, mission_id)
    }
}
