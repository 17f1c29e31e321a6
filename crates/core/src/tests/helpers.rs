// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::{date, datetime};

use sala_mission_audit::Cause;
use sala_mission_domain::{
    LocationScope, Mission, MissionParticipant, MissionStatus, MissionType, ParticipantRole,
    Position, Role, RoleHierarchy, RoleHierarchyEntry, ScopeKind, ScopeNode, ScopeTree, User,
};

pub const CREATOR_ID: i64 = 100;
pub const PARTICIPANT_ID: i64 = 200;

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// Two zones, each with one full path down to a school.
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

pub fn create_test_hierarchy() -> RoleHierarchy {
    let rows: Vec<RoleHierarchyEntry> = vec![
        row(Role::Administrator, 100, true, true),
        row(Role::Zone, 80, true, true),
        row(Role::Provincial, 60, true, true),
        row(Role::Department, 40, false, false),
        row(Role::Cluster, 30, false, false),
        row(Role::Director, 20, true, false),
        row(Role::Teacher, 10, false, false),
    ];
    RoleHierarchy::from_entries(&rows).unwrap()
}

fn row(
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

fn school_scope(branch: u8) -> LocationScope {
    match branch {
        1 => LocationScope {
            zone_id: String::from("zone-1"),
            province_id: Some(String::from("province-11")),
            department_id: Some(String::from("department-111")),
            cluster_id: Some(String::from("cluster-1111")),
            school_id: Some(String::from("school-11111")),
        },
        _ => LocationScope {
            zone_id: String::from("zone-2"),
            province_id: Some(String::from("province-21")),
            department_id: Some(String::from("department-211")),
            cluster_id: Some(String::from("cluster-2111")),
            school_id: Some(String::from("school-21111")),
        },
    }
}

fn cluster_scope() -> LocationScope {
    LocationScope {
        zone_id: String::from("zone-1"),
        province_id: Some(String::from("province-11")),
        department_id: Some(String::from("department-111")),
        cluster_id: Some(String::from("cluster-1111")),
        school_id: None,
    }
}

fn provincial_scope(branch: u8) -> LocationScope {
    match branch {
        1 => LocationScope {
            zone_id: String::from("zone-1"),
            province_id: Some(String::from("province-11")),
            department_id: None,
            cluster_id: None,
            school_id: None,
        },
        _ => LocationScope {
            zone_id: String::from("zone-2"),
            province_id: Some(String::from("province-21")),
            department_id: None,
            cluster_id: None,
            school_id: None,
        },
    }
}

/// The mission creator: a teacher at school-11111.
pub fn creator() -> User {
    User {
        id: Some(CREATOR_ID),
        name: String::from("Creator"),
        role: Role::Teacher,
        scope: Some(school_scope(1)),
    }
}

/// Director of the creator's school; approver in scope.
pub fn director_same_school() -> User {
    User {
        id: Some(300),
        name: String::from("Director A"),
        role: Role::Director,
        scope: Some(school_scope(1)),
    }
}

/// Director of the other zone's school; approver out of scope.
pub fn director_other_school() -> User {
    User {
        id: Some(301),
        name: String::from("Director B"),
        role: Role::Director,
        scope: Some(school_scope(2)),
    }
}

/// Cluster coordinator over the creator's school; in scope but not an
/// approver.
pub fn cluster_coordinator() -> User {
    User {
        id: Some(302),
        name: String::from("Coordinator"),
        role: Role::Cluster,
        scope: Some(cluster_scope()),
    }
}

/// Provincial official over the creator's province.
pub fn provincial_same_zone() -> User {
    User {
        id: Some(303),
        name: String::from("Provincial A"),
        role: Role::Provincial,
        scope: Some(provincial_scope(1)),
    }
}

/// Provincial official of the other zone.
pub fn provincial_other_zone() -> User {
    User {
        id: Some(304),
        name: String::from("Provincial B"),
        role: Role::Provincial,
        scope: Some(provincial_scope(2)),
    }
}

pub fn administrator() -> User {
    User {
        id: Some(1),
        name: String::from("Admin"),
        role: Role::Administrator,
        scope: None,
    }
}

/// A teacher participant at the creator's school.
pub fn participant_user() -> User {
    User {
        id: Some(PARTICIPANT_ID),
        name: String::from("Participant"),
        role: Role::Teacher,
        scope: Some(school_scope(1)),
    }
}

pub fn mission_site() -> Position {
    Position::new(13.3633, 103.8564).unwrap()
}

pub fn create_test_mission(status: MissionStatus) -> Mission {
    let mut mission: Mission = Mission::new(
        String::from("Mentoring visit"),
        None,
        MissionType::FieldTrip,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 06),
        String::from("Siem Reap school"),
        mission_site(),
        CREATOR_ID,
        datetime!(2026-02-01 08:00 UTC),
    )
    .unwrap()
    .with_id(7);
    mission.status = status;
    mission
}

pub fn confirmed_participant() -> MissionParticipant {
    let mut participant: MissionParticipant =
        MissionParticipant::new(7, PARTICIPANT_ID, ParticipantRole::Participant).with_id(70);
    participant.confirmed = true;
    participant.confirmed_at = Some(now());
    participant
}

pub fn unconfirmed_participant() -> MissionParticipant {
    MissionParticipant::new(7, PARTICIPANT_ID, ParticipantRole::Participant).with_id(70)
}
