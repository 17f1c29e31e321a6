// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sala_mission_domain::{DomainError, MissionStatus};

/// Errors produced by the lifecycle and participation core.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor is not allowed to perform this action.
    ///
    /// This is always a refusal, never a claim the record does not
    /// exist; callers must not translate it into not-found.
    Forbidden {
        /// The action that was refused.
        action: &'static str,
        /// Why the actor does not qualify.
        reason: String,
    },
    /// The requested status edge is not in the transition table.
    InvalidTransition {
        /// The mission's current status.
        from: MissionStatus,
        /// The requested status.
        to: MissionStatus,
    },
    /// A request field failed validation.
    Validation {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
    /// The participant has not confirmed their participation.
    NotConfirmed {
        /// The mission.
        mission_id: i64,
        /// The unconfirmed user.
        user_id: i64,
    },
    /// The mission's status does not permit this action.
    MissionNotActive {
        /// The mission.
        mission_id: i64,
        /// The status that blocked the action.
        status: MissionStatus,
    },
    /// A state snapshot could not be serialized.
    Serialization(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain rule violation: {err}"),
            Self::Forbidden { action, reason } => {
                write!(f, "Action '{action}' forbidden: {reason}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "No transition from '{from}' to '{to}'")
            }
            Self::Validation { field, message } => {
                write!(f, "Invalid field '{field}': {message}")
            }
            Self::NotConfirmed {
                mission_id,
                user_id,
            } => write!(
                f,
                "User {user_id} has not confirmed participation in mission {mission_id}"
            ),
            Self::MissionNotActive { mission_id, status } => {
                write!(f, "Mission {mission_id} is '{status}', which does not permit this action")
            }
            Self::Serialization(message) => write!(f, "State serialization failed: {message}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
