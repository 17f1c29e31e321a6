// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::role::Role;
use crate::scope::{LocationScope, ScopeKind, ScopeTree};

/// A platform user: a ministry official, director, or teacher.
///
/// Authentication happens upstream; by the time a `User` exists here the
/// gateway has already established who is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database id; `None` until persisted.
    pub id: Option<i64>,
    /// Display name.
    pub name: String,
    /// The user's role in the hierarchy.
    pub role: Role,
    /// The user's location scope; `None` only for administrators.
    pub scope: Option<LocationScope>,
}

impl User {
    /// Creates a user after validating the name, and the scope against
    /// the role's station and the tree.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] for a blank name,
    /// [`DomainError::ScopeRoleMismatch`] when the scope's depth does not
    /// match the role, and any error from
    /// [`LocationScope::validate`].
    pub fn new(
        name: String,
        role: Role,
        scope: Option<LocationScope>,
        tree: &ScopeTree,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" });
        }
        let user: Self = Self {
            id: None,
            name,
            role,
            scope,
        };
        user.validate_scope(tree)?;
        Ok(user)
    }

    /// Returns the user with their database id set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks that the scope exists, is well formed, and ends at the
    /// level the role is stationed at.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ScopeRoleMismatch`] or the scope's own
    /// validation errors.
    pub fn validate_scope(&self, tree: &ScopeTree) -> Result<(), DomainError> {
        let expected: Option<ScopeKind> = self.role.station();
        let found: Option<ScopeKind> = self.scope.as_ref().map(LocationScope::most_specific_kind);
        if expected != found {
            return Err(DomainError::ScopeRoleMismatch {
                role: self.role,
                expected,
                found,
            });
        }
        if let Some(scope) = &self.scope {
            scope.validate(tree)?;
        }
        Ok(())
    }

    /// The id of the deepest scope node the user is stationed at, if the
    /// user has a scope at all.
    #[must_use]
    pub fn scope_node_id(&self) -> Option<&str> {
        self.scope.as_ref().map(LocationScope::most_specific)
    }
}
