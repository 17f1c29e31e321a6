// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sala_mission::CoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested mission was not found.
    MissionNotFound(i64),
    /// The requested user was not found.
    UserNotFound(i64),
    /// The user is not on the mission's participant list.
    ParticipantNotFound {
        /// The mission.
        mission_id: i64,
        /// The user without a participant row.
        user_id: i64,
    },
    /// The user is already on the mission's participant list.
    DuplicateParticipant {
        /// The mission.
        mission_id: i64,
        /// The already-listed user.
        user_id: i64,
    },
    /// The `role_hierarchy_access` table is empty or incomplete.
    ///
    /// Authorization cannot run without the capability table; startup
    /// must abort.
    RoleHierarchyUnavailable(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A concurrent writer changed the mission between read and write.
    ConcurrentUpdate {
        /// The contested mission.
        mission_id: i64,
    },
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::MissionNotFound(id) => write!(f, "Mission not found: {id}"),
            Self::UserNotFound(id) => write!(f, "User not found: {id}"),
            Self::ParticipantNotFound {
                mission_id,
                user_id,
            } => write!(
                f,
                "User {user_id} is not a participant of mission {mission_id}"
            ),
            Self::DuplicateParticipant {
                mission_id,
                user_id,
            } => write!(
                f,
                "User {user_id} is already a participant of mission {mission_id}"
            ),
            Self::RoleHierarchyUnavailable(msg) => {
                write!(f, "Role hierarchy table unusable: {msg}")
            }
            Self::ReconstructionError(msg) => write!(f, "Row reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ConcurrentUpdate { mission_id } => {
                write!(
                    f,
                    "Mission {mission_id} was modified concurrently; transition aborted"
                )
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Error type for mutations that re-validate through the core inside
/// their write transaction.
///
/// Keeping the two sides separate matters: a core refusal (forbidden,
/// invalid transition) is a business outcome the API maps precisely,
/// while a persistence failure is infrastructure.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationError {
    /// The core refused the operation.
    Core(CoreError),
    /// Storage failed.
    Persistence(PersistenceError),
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<CoreError> for OperationError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<PersistenceError> for OperationError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}

impl From<diesel::result::Error> for OperationError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Persistence(PersistenceError::from(err))
    }
}
