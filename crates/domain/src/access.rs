// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::role::Role;
use crate::scope::ScopeTree;
use crate::user::User;

/// Whether an actor can access a record scoped at `record_scope_id`.
///
/// Visibility is self-and-descendants: the actor's most specific scope
/// node must be an ancestor of (or equal to) the record's node.
/// Administrators have no scope and see everything.
///
/// # Errors
///
/// Returns [`DomainError::UnknownScopeNode`] when either the actor's or
/// the record's node id is not in the tree. An unknown node is always an
/// error, never a silent denial or a silent grant.
pub fn can_access(
    tree: &ScopeTree,
    actor: &User,
    record_scope_id: &str,
) -> Result<bool, DomainError> {
    if actor.role == Role::Administrator {
        // Still reject dangling record scopes; a missing node means the
        // data is wrong, not that access was decided.
        tree.get(record_scope_id)?;
        return Ok(true);
    }
    match actor.scope_node_id() {
        Some(actor_node) => tree.is_ancestor_of(actor_node, record_scope_id),
        // A non-administrator without a scope is malformed; deny.
        None => {
            tree.get(record_scope_id)?;
            Ok(false)
        }
    }
}

/// Whether an actor can access a record that carries no scope at all.
///
/// Unscoped records are global: administrators only, unless the record
/// is explicitly public.
#[must_use]
pub const fn can_access_unscoped(actor: &User, is_public: bool) -> bool {
    is_public || matches!(actor.role, Role::Administrator)
}
