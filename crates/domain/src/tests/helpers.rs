// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    LocationScope, Role, RoleHierarchy, RoleHierarchyEntry, ScopeKind, ScopeNode, ScopeTree, User,
};

/// Two zones, each with a full path down to one school:
/// zone-1 > province-11 > department-111 > cluster-1111 > school-11111
/// zone-2 > province-21 > department-211 > cluster-2111 > school-21111
pub fn create_test_tree() -> ScopeTree {
    let mut tree: ScopeTree = ScopeTree::new();
    for (id, kind, parent) in [
        ("zone-1", ScopeKind::Zone, None),
        ("province-11", ScopeKind::Province, Some("zone-1")),
        ("department-111", ScopeKind::Department, Some("province-11")),
        ("cluster-1111", ScopeKind::Cluster, Some("department-111")),
        ("school-11111", ScopeKind::School, Some("cluster-1111")),
        ("zone-2", ScopeKind::Zone, None),
        ("province-21", ScopeKind::Province, Some("zone-2")),
        ("department-211", ScopeKind::Department, Some("province-21")),
        ("cluster-2111", ScopeKind::Cluster, Some("department-211")),
        ("school-21111", ScopeKind::School, Some("cluster-2111")),
    ] {
        tree.insert(ScopeNode::new(
            String::from(id),
            kind,
            parent.map(String::from),
        ))
        .unwrap();
    }
    tree
}

/// The seeded capability table, as the migration writes it.
pub fn create_test_hierarchy() -> RoleHierarchy {
    RoleHierarchy::from_entries(&[
        entry(Role::Administrator, 100, true, true),
        entry(Role::Zone, 80, true, true),
        entry(Role::Provincial, 60, true, true),
        entry(Role::Department, 40, false, false),
        entry(Role::Cluster, 30, false, false),
        entry(Role::Director, 20, true, false),
        entry(Role::Teacher, 10, false, false),
    ])
    .unwrap()
}

pub fn entry(
    role: Role,
    level: i32,
    can_approve_missions: bool,
    can_view_analytics: bool,
) -> RoleHierarchyEntry {
    RoleHierarchyEntry {
        role,
        level,
        can_approve_missions,
        can_view_analytics,
    }
}

pub fn school_scope(zone: &str, province: &str, department: &str, cluster: &str, school: &str) -> LocationScope {
    LocationScope {
        zone_id: String::from(zone),
        province_id: Some(String::from(province)),
        department_id: Some(String::from(department)),
        cluster_id: Some(String::from(cluster)),
        school_id: Some(String::from(school)),
    }
}

pub fn zone_one_school_scope() -> LocationScope {
    school_scope(
        "zone-1",
        "province-11",
        "department-111",
        "cluster-1111",
        "school-11111",
    )
}

pub fn provincial_scope(zone: &str, province: &str) -> LocationScope {
    LocationScope {
        zone_id: String::from(zone),
        province_id: Some(String::from(province)),
        department_id: None,
        cluster_id: None,
        school_id: None,
    }
}

pub fn create_test_user(id: i64, role: Role, scope: Option<LocationScope>) -> User {
    User {
        id: Some(id),
        name: format!("User {id}"),
        role,
        scope,
    }
}
