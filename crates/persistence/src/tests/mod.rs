// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use time::OffsetDateTime;
use time::macros::{date, datetime};

use sala_mission::{AuthzContext, Command, TransitionResult};
use sala_mission_audit::{Actor, Cause};
use sala_mission_domain::{
    LocationScope, Mission, MissionType, Position, Role, ScopeKind, ScopeNode, User,
};

use crate::error::OperationError;
use crate::Persistence;

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

/// Opens an in-memory database and seeds two zones, each with one
/// full path down to a school.
pub fn seeded_db() -> Persistence {
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
        let node: ScopeNode = ScopeNode::new(
            String::from(id),
            kind,
            parent.map(String::from),
        );
        db.insert_scope_node(&node).expect("seed scope node");
    }
    db
}

pub fn school_scope(branch: u8) -> LocationScope {
    LocationScope {
        zone_id: format!("zone-{branch}"),
        province_id: Some(format!("province-{branch}1")),
        department_id: Some(format!("department-{branch}11")),
        cluster_id: Some(format!("cluster-{branch}111")),
        school_id: Some(format!("school-{branch}1111")),
    }
}

pub fn provincial_scope(branch: u8) -> LocationScope {
    LocationScope {
        zone_id: format!("zone-{branch}"),
        province_id: Some(format!("province-{branch}1")),
        department_id: None,
        cluster_id: None,
        school_id: None,
    }
}

pub fn seed_user(
    db: &mut Persistence,
    name: &str,
    role: Role,
    scope: Option<LocationScope>,
) -> User {
    let user: User = User {
        id: None,
        name: String::from(name),
        role,
        scope,
    };
    db.create_user(&user).expect("seed user")
}

pub fn mission_site() -> Position {
    Position::new(13.3633, 103.8564).unwrap()
}

/// Creates a draft mission owned by the given user and persists it.
pub fn seed_mission(db: &mut Persistence, creator: &User) -> Mission {
    let creator_id: i64 = creator.id.expect("seeded creator id");
    let draft: Mission = Mission::new(
        String::from("Mentoring visit"),
        None,
        MissionType::FieldTrip,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 06),
        String::from("Siem Reap school"),
        mission_site(),
        creator_id,
        now(),
    )
    .expect("valid draft");
    db.create_mission(
        &draft,
        &Actor::new(creator_id, creator.role),
        &create_test_cause(),
        now(),
    )
    .expect("persist draft")
}

/// Applies a lifecycle command using freshly loaded authorization state.
pub fn transition(
    db: &mut Persistence,
    actor_id: i64,
    mission_id: i64,
    command: &Command,
) -> Result<TransitionResult, OperationError> {
    let tree = db.load_scope_tree().expect("scope tree");
    let roles = db.load_role_hierarchy().expect("role hierarchy");
    let ctx: AuthzContext<'_> = AuthzContext {
        tree: &tree,
        roles: &roles,
    };
    db.transition_mission(&ctx, actor_id, mission_id, command, &create_test_cause(), now())
}
