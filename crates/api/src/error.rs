// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Inner errors are translated here into the API contract. One rule is
//! load-bearing: an authorization refusal is always surfaced as
//! [`ApiError::Unauthorized`], never as [`ApiError::ResourceNotFound`].
//! Hiding a record's existence from someone out of scope would make
//! "you may not" indistinguishable from "there is no such mission",
//! and supervisors triaging refusals need the difference.

use sala_mission::CoreError;
use sala_mission_domain::DomainError;
use sala_mission_persistence::{OperationError, PersistenceError};

use crate::coordinates::CoordinateError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor was refused.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The stored state changed while the request was being processed.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}' refused: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoordinateError> for ApiError {
    fn from(err: CoordinateError) -> Self {
        let field: &'static str = match err {
            CoordinateError::LatitudeOutOfRange { .. } => "latitude",
            CoordinateError::LongitudeOutOfRange { .. } => "longitude",
            CoordinateError::NotFinite { field } => field,
            CoordinateError::InvalidAccuracy { .. } => "accuracy_m",
        };
        Self::InvalidInput {
            field: String::from(field),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into the API contract.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownScopeNode { node_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Scope node"),
            message: format!("Scope node '{node_id}' does not exist"),
        },
        DomainError::UnknownRole { name } => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{name}'"),
        },
        DomainError::InvalidScopeKind(value) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid scope kind: {value}"),
        },
        DomainError::DuplicateScopeNode { node_id } => ApiError::DomainRuleViolation {
            rule: String::from("unique_scope_node"),
            message: format!("Scope node '{node_id}' already exists"),
        },
        DomainError::OrphanScopeNode { node_id, parent_id } => ApiError::DomainRuleViolation {
            rule: String::from("scope_parent_exists"),
            message: format!("Scope node '{node_id}' references missing parent '{parent_id}'"),
        },
        DomainError::ScopeDepthMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("scope_level_order"),
            message: err.to_string(),
        },
        DomainError::ScopeRoleMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("role_station"),
            message: err.to_string(),
        },
        DomainError::MalformedLocationScope { reason } => ApiError::InvalidInput {
            field: String::from("scope"),
            message: reason,
        },
        DomainError::InvalidRoleHierarchy { reason } => ApiError::Internal {
            message: format!("Role hierarchy is invalid: {reason}"),
        },
        DomainError::InvalidMissionType(value) => ApiError::InvalidInput {
            field: String::from("mission_type"),
            message: format!("Invalid mission type: {value}"),
        },
        DomainError::InvalidMissionStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid mission status: {value}"),
        },
        DomainError::InvalidParticipantRole(value) => ApiError::InvalidInput {
            field: String::from("participant_role"),
            message: format!("Invalid participant role: {value}"),
        },
        DomainError::InvalidActivity(value) => ApiError::InvalidInput {
            field: String::from("activity"),
            message: format!("Invalid tracking activity: {value}"),
        },
        DomainError::InvalidCoordinate { field, value } => ApiError::InvalidInput {
            field: String::from(field),
            message: format!("{value} is out of range"),
        },
        DomainError::EmptyField { field } => ApiError::InvalidInput {
            field: String::from(field),
            message: String::from("must not be empty"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end} precedes start date {start}"),
        },
    }
}

/// Translates a rules-crate error into the API contract.
///
/// A [`CoreError::Forbidden`] is a refusal of an existing record and
/// stays a refusal here; it must never become `ResourceNotFound`. The
/// same holds for a scope node or role the rules crate fails to resolve
/// while deciding a request: at that point the actor and mission are
/// already loaded, so the broken reference is a data integrity fault,
/// not a missing resource named by the caller.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err @ DomainError::UnknownScopeNode { .. })
        | CoreError::DomainViolation(domain_err @ DomainError::UnknownRole { .. }) => {
            ApiError::Internal {
                message: format!("Authorization data is inconsistent: {domain_err}"),
            }
        }
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Forbidden { action, reason } => ApiError::Unauthorized {
            action: String::from(action),
            reason,
        },
        CoreError::InvalidTransition { from, to } => ApiError::DomainRuleViolation {
            rule: String::from("mission_lifecycle"),
            message: format!("Cannot move a mission from '{from}' to '{to}'"),
        },
        CoreError::Validation { field, message } => ApiError::InvalidInput {
            field: String::from(field),
            message,
        },
        CoreError::NotConfirmed {
            mission_id,
            user_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("participation_confirmed"),
            message: format!(
                "User {user_id} has not confirmed participation in mission {mission_id}"
            ),
        },
        CoreError::MissionNotActive { mission_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("mission_active"),
            message: format!("Mission {mission_id} is '{status}' and does not accept this action"),
        },
        CoreError::Serialization(message) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into the API contract.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::MissionNotFound(mission_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message: format!("Mission {mission_id} does not exist"),
        },
        PersistenceError::UserNotFound(user_id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        },
        PersistenceError::ParticipantNotFound {
            mission_id,
            user_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Participant"),
            message: format!("User {user_id} is not on the roster of mission {mission_id}"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DuplicateParticipant {
            mission_id,
            user_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_participant"),
            message: format!("User {user_id} is already on the roster of mission {mission_id}"),
        },
        PersistenceError::ConcurrentUpdate { mission_id } => ApiError::Conflict {
            message: format!("Mission {mission_id} was changed by another request; retry"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a combined core/persistence error into the API contract.
#[must_use]
pub fn translate_operation_error(err: OperationError) -> ApiError {
    match err {
        OperationError::Core(core_err) => translate_core_error(core_err),
        OperationError::Persistence(persistence_err) => {
            translate_persistence_error(persistence_err)
        }
    }
}
