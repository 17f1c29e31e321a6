// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::{date, datetime};

use sala_mission_audit::Cause;
use sala_mission_domain::{
    LocationScope, Role, RoleHierarchy, ScopeKind, ScopeNode, ScopeTree, User,
};
use sala_mission_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CreateMissionRequest, TransitionMissionRequest, TransitionMissionResponse,
};

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// A seeded database plus the in-memory authorization state the server
/// would hold.
pub struct TestEnv {
    pub db: Persistence,
    pub tree: ScopeTree,
    pub roles: RoleHierarchy,
    pub admin_id: i64,
    pub creator_id: i64,
    pub director_id: i64,
    pub outsider_id: i64,
    pub participant_id: i64,
}

fn school_scope(branch: u8) -> LocationScope {
    LocationScope {
        zone_id: format!("zone-{branch}"),
        province_id: Some(format!("province-{branch}1")),
        department_id: Some(format!("department-{branch}11")),
        cluster_id: Some(format!("cluster-{branch}111")),
        school_id: Some(format!("school-{branch}1111")),
    }
}

fn provincial_scope(branch: u8) -> LocationScope {
    LocationScope {
        zone_id: format!("zone-{branch}"),
        province_id: Some(format!("province-{branch}1")),
        department_id: None,
        cluster_id: None,
        school_id: None,
    }
}

/// Two zones, a school under each, and one user of each interesting
/// kind: an administrator, a creator and participant at the zone-1
/// school, that school's director, and a provincial official of the
/// other zone.
pub fn setup() -> TestEnv {
    let mut db: Persistence = Persistence::new_in_memory().expect("in-memory database");
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
        db.insert_scope_node(&ScopeNode::new(
            String::from(id),
            kind,
            parent.map(String::from),
        ))
        .expect("seed scope node");
    }

    let mut seed = |name: &str, role: Role, scope: Option<LocationScope>| -> i64 {
        db.create_user(&User {
            id: None,
            name: String::from(name),
            role,
            scope,
        })
        .expect("seed user")
        .id
        .expect("assigned id")
    };
    let admin_id: i64 = seed("Admin", Role::Administrator, None);
    let creator_id: i64 = seed("Creator", Role::Teacher, Some(school_scope(1)));
    let director_id: i64 = seed("Director", Role::Director, Some(school_scope(1)));
    let outsider_id: i64 = seed("Provincial B", Role::Provincial, Some(provincial_scope(2)));
    let participant_id: i64 = seed("Participant", Role::Teacher, Some(school_scope(1)));

    let tree: ScopeTree = db.load_scope_tree().expect("scope tree");
    let roles: RoleHierarchy = db.load_role_hierarchy().expect("role hierarchy");
    TestEnv {
        db,
        tree,
        roles,
        admin_id,
        creator_id,
        director_id,
        outsider_id,
        participant_id,
    }
}

pub fn create_mission_request() -> CreateMissionRequest {
    CreateMissionRequest {
        title: String::from("Mentoring visit"),
        description: None,
        mission_type: String::from("field_trip"),
        start_date: date!(2026 - 03 - 02),
        end_date: date!(2026 - 03 - 06),
        location_name: String::from("Siem Reap school"),
        latitude: 13.3633,
        longitude: 103.8564,
    }
}

/// Creates a draft mission owned by the env's creator and returns its id.
pub fn seed_mission(env: &mut TestEnv) -> i64 {
    handlers::create_mission(
        &mut env.db,
        env.creator_id,
        &create_mission_request(),
        create_test_cause(),
        now(),
    )
    .expect("create mission")
    .mission
    .mission_id
}

pub fn transition(
    env: &mut TestEnv,
    actor_id: i64,
    mission_id: i64,
    action: &str,
) -> Result<TransitionMissionResponse, ApiError> {
    let request: TransitionMissionRequest = TransitionMissionRequest {
        action: String::from(action),
        comments: None,
        reason: if action == "reject" {
            Some(String::from("No budget this quarter"))
        } else {
            None
        },
        report: None,
    };
    handlers::transition_mission(
        &mut env.db,
        &env.tree,
        &env.roles,
        actor_id,
        mission_id,
        &request,
        create_test_cause(),
        now(),
    )
}

/// Drives a fresh mission to approved and returns its id.
pub fn approved_mission(env: &mut TestEnv) -> i64 {
    let creator: i64 = env.creator_id;
    let director: i64 = env.director_id;
    let mission_id: i64 = seed_mission(env);
    transition(env, creator, mission_id, "submit").expect("submit");
    transition(env, director, mission_id, "approve").expect("approve");
    mission_id
}
