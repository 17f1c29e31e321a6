// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::role::Role;
use crate::scope::ScopeKind;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A scope node id was referenced that does not exist in the tree.
    ///
    /// Unknown nodes are always an error, never an empty scope.
    UnknownScopeNode {
        /// The missing node id.
        node_id: String,
    },
    /// A role name was encountered that is not part of the hierarchy.
    ///
    /// Unknown roles are always an error; authorization never falls back
    /// to the weakest role.
    UnknownRole {
        /// The unrecognized role name.
        name: String,
    },
    /// A scope kind string could not be parsed.
    InvalidScopeKind(String),
    /// A scope node already exists with this id.
    DuplicateScopeNode {
        /// The duplicated node id.
        node_id: String,
    },
    /// A scope node references a parent that is not in the tree.
    OrphanScopeNode {
        /// The node being inserted.
        node_id: String,
        /// The missing parent id.
        parent_id: String,
    },
    /// A scope node's kind does not sit exactly one level below its parent.
    ScopeDepthMismatch {
        /// The node being inserted.
        node_id: String,
        /// The node's kind.
        kind: ScopeKind,
        /// The parent's kind, if the node has a parent.
        parent_kind: Option<ScopeKind>,
    },
    /// A user's location scope does not match the station of their role.
    ScopeRoleMismatch {
        /// The user's role.
        role: Role,
        /// The scope level the role must be stationed at, if any.
        expected: Option<ScopeKind>,
        /// The most specific level actually present in the scope.
        found: Option<ScopeKind>,
    },
    /// A location scope skips a level or links to the wrong parent.
    MalformedLocationScope {
        /// Description of the inconsistency.
        reason: String,
    },
    /// The role hierarchy table failed structural validation.
    InvalidRoleHierarchy {
        /// Description of the structural problem.
        reason: String,
    },
    /// A mission type string could not be parsed.
    InvalidMissionType(String),
    /// A mission status string could not be parsed.
    InvalidMissionStatus(String),
    /// A participant role string could not be parsed.
    InvalidParticipantRole(String),
    /// A tracking activity string could not be parsed.
    InvalidActivity(String),
    /// A latitude or longitude is outside its valid range.
    InvalidCoordinate {
        /// Which coordinate failed validation.
        field: &'static str,
        /// The out-of-range value.
        value: f64,
    },
    /// A required text field is empty.
    EmptyField {
        /// The name of the empty field.
        field: &'static str,
    },
    /// A mission's end date precedes its start date.
    InvalidDateRange {
        /// The mission start date.
        start: time::Date,
        /// The mission end date.
        end: time::Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScopeNode { node_id } => {
                write!(f, "Unknown scope node '{node_id}'")
            }
            Self::UnknownRole { name } => write!(f, "Unknown role '{name}'"),
            Self::InvalidScopeKind(value) => write!(f, "Invalid scope kind: {value}"),
            Self::DuplicateScopeNode { node_id } => {
                write!(f, "Scope node '{node_id}' already exists")
            }
            Self::OrphanScopeNode { node_id, parent_id } => {
                write!(
                    f,
                    "Scope node '{node_id}' references missing parent '{parent_id}'"
                )
            }
            Self::ScopeDepthMismatch {
                node_id,
                kind,
                parent_kind,
            } => match parent_kind {
                Some(parent_kind) => write!(
                    f,
                    "Scope node '{node_id}' of kind {} cannot be a child of {}",
                    kind.as_str(),
                    parent_kind.as_str()
                ),
                None => write!(
                    f,
                    "Scope node '{node_id}' of kind {} requires a parent",
                    kind.as_str()
                ),
            },
            Self::ScopeRoleMismatch {
                role,
                expected,
                found,
            } => {
                let expected: &str = expected.map_or("no scope", |kind| kind.as_str());
                let found: &str = found.map_or("no scope", |kind| kind.as_str());
                write!(
                    f,
                    "Role {} must be stationed at {expected}, but the scope ends at {found}",
                    role.as_str()
                )
            }
            Self::MalformedLocationScope { reason } => {
                write!(f, "Malformed location scope: {reason}")
            }
            Self::InvalidRoleHierarchy { reason } => {
                write!(f, "Invalid role hierarchy: {reason}")
            }
            Self::InvalidMissionType(value) => write!(f, "Invalid mission type: {value}"),
            Self::InvalidMissionStatus(value) => write!(f, "Invalid mission status: {value}"),
            Self::InvalidParticipantRole(value) => {
                write!(f, "Invalid participant role: {value}")
            }
            Self::InvalidActivity(value) => write!(f, "Invalid tracking activity: {value}"),
            Self::InvalidCoordinate { field, value } => {
                write!(f, "Invalid {field}: {value} is out of range")
            }
            Self::EmptyField { field } => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "End date {end} precedes start date {start}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
