// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_hierarchy, entry};
use crate::{DomainError, Role, RoleHierarchy};

#[test]
fn test_role_round_trips_through_strings() {
    for role in Role::ALL {
        let parsed: Role = role.as_str().parse().unwrap();
        assert_eq!(parsed, role);
    }
}

#[test]
fn test_unknown_role_name_is_fatal() {
    let err: DomainError = "supervisor".parse::<Role>().unwrap_err();
    assert_eq!(
        err,
        DomainError::UnknownRole {
            name: String::from("supervisor")
        }
    );
}

#[test]
fn test_seeded_approval_capabilities() {
    let hierarchy: RoleHierarchy = create_test_hierarchy();
    assert!(hierarchy.can_approve(Role::Administrator));
    assert!(hierarchy.can_approve(Role::Zone));
    assert!(hierarchy.can_approve(Role::Provincial));
    assert!(hierarchy.can_approve(Role::Director));
    assert!(!hierarchy.can_approve(Role::Department));
    assert!(!hierarchy.can_approve(Role::Cluster));
    assert!(!hierarchy.can_approve(Role::Teacher));
}

#[test]
fn test_seeded_analytics_capabilities() {
    let hierarchy: RoleHierarchy = create_test_hierarchy();
    assert!(hierarchy.can_view_analytics(Role::Administrator));
    assert!(hierarchy.can_view_analytics(Role::Zone));
    assert!(hierarchy.can_view_analytics(Role::Provincial));
    assert!(!hierarchy.can_view_analytics(Role::Department));
    assert!(!hierarchy.can_view_analytics(Role::Cluster));
    assert!(!hierarchy.can_view_analytics(Role::Director));
    assert!(!hierarchy.can_view_analytics(Role::Teacher));
}

#[test]
fn test_ranks_strictly_decrease() {
    let hierarchy: RoleHierarchy = create_test_hierarchy();
    for pair in Role::ALL.windows(2) {
        assert!(hierarchy.outranks(pair[0], pair[1]));
    }
}

#[test]
fn test_empty_table_is_rejected() {
    let err: DomainError = RoleHierarchy::from_entries(&[]).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRoleHierarchy { .. }));
}

#[test]
fn test_missing_role_is_rejected() {
    let err: DomainError = RoleHierarchy::from_entries(&[
        entry(Role::Administrator, 100, true, true),
        entry(Role::Zone, 80, true, true),
    ])
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRoleHierarchy { .. }));
}

#[test]
fn test_duplicate_role_is_rejected() {
    let err: DomainError = RoleHierarchy::from_entries(&[
        entry(Role::Administrator, 100, true, true),
        entry(Role::Administrator, 99, true, true),
    ])
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRoleHierarchy { .. }));
}

#[test]
fn test_non_decreasing_levels_are_rejected() {
    let err: DomainError = RoleHierarchy::from_entries(&[
        entry(Role::Administrator, 100, true, true),
        entry(Role::Zone, 100, true, true),
        entry(Role::Provincial, 60, true, true),
        entry(Role::Department, 40, false, false),
        entry(Role::Cluster, 30, false, false),
        entry(Role::Director, 20, true, false),
        entry(Role::Teacher, 10, false, false),
    ])
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRoleHierarchy { .. }));
}

#[test]
fn test_station_matches_role() {
    assert_eq!(Role::Administrator.station(), None);
    assert_eq!(
        Role::Director.station(),
        Some(crate::ScopeKind::School)
    );
    assert_eq!(
        Role::Teacher.station(),
        Some(crate::ScopeKind::School)
    );
    assert_eq!(Role::Zone.station(), Some(crate::ScopeKind::Zone));
}
