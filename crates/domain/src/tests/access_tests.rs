// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_tree, create_test_user, provincial_scope, zone_one_school_scope};
use crate::{DomainError, Role, ScopeTree, User, can_access, can_access_unscoped};

#[test]
fn test_administrator_sees_everything() {
    let tree: ScopeTree = create_test_tree();
    let admin: User = create_test_user(1, Role::Administrator, None);
    assert!(can_access(&tree, &admin, "zone-1").unwrap());
    assert!(can_access(&tree, &admin, "school-21111").unwrap());
}

#[test]
fn test_actor_sees_own_node_and_descendants() {
    let tree: ScopeTree = create_test_tree();
    let provincial: User = create_test_user(
        2,
        Role::Provincial,
        Some(provincial_scope("zone-1", "province-11")),
    );
    assert!(can_access(&tree, &provincial, "province-11").unwrap());
    assert!(can_access(&tree, &provincial, "department-111").unwrap());
    assert!(can_access(&tree, &provincial, "school-11111").unwrap());
}

#[test]
fn test_actor_cannot_see_upward() {
    let tree: ScopeTree = create_test_tree();
    let provincial: User = create_test_user(
        2,
        Role::Provincial,
        Some(provincial_scope("zone-1", "province-11")),
    );
    assert!(!can_access(&tree, &provincial, "zone-1").unwrap());
}

#[test]
fn test_sibling_zones_are_isolated() {
    let tree: ScopeTree = create_test_tree();
    let provincial: User = create_test_user(
        2,
        Role::Provincial,
        Some(provincial_scope("zone-1", "province-11")),
    );
    // Nothing under zone-2 is visible, whatever the role's rank.
    assert!(!can_access(&tree, &provincial, "zone-2").unwrap());
    assert!(!can_access(&tree, &provincial, "province-21").unwrap());
    assert!(!can_access(&tree, &provincial, "school-21111").unwrap());
}

#[test]
fn test_teacher_sees_only_their_school() {
    let tree: ScopeTree = create_test_tree();
    let teacher: User = create_test_user(3, Role::Teacher, Some(zone_one_school_scope()));
    assert!(can_access(&tree, &teacher, "school-11111").unwrap());
    assert!(!can_access(&tree, &teacher, "cluster-1111").unwrap());
}

#[test]
fn test_unknown_record_scope_is_an_error_not_a_denial() {
    let tree: ScopeTree = create_test_tree();
    let provincial: User = create_test_user(
        2,
        Role::Provincial,
        Some(provincial_scope("zone-1", "province-11")),
    );
    let err: DomainError = can_access(&tree, &provincial, "school-404").unwrap_err();
    assert!(matches!(err, DomainError::UnknownScopeNode { .. }));

    let admin: User = create_test_user(1, Role::Administrator, None);
    let err: DomainError = can_access(&tree, &admin, "school-404").unwrap_err();
    assert!(matches!(err, DomainError::UnknownScopeNode { .. }));
}

#[test]
fn test_unscoped_records_are_admin_only_unless_public() {
    let admin: User = create_test_user(1, Role::Administrator, None);
    let teacher: User = create_test_user(3, Role::Teacher, Some(zone_one_school_scope()));
    assert!(can_access_unscoped(&admin, false));
    assert!(!can_access_unscoped(&teacher, false));
    assert!(can_access_unscoped(&teacher, true));
}
