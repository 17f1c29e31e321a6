// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sala_mission::CoreError;
use sala_mission_domain::DomainError;

use crate::error::{ApiError, translate_core_error};
use crate::handlers;
use crate::request_response::{CreateScopeNodeRequest, RegisterUserRequest};

use super::helpers::{TestEnv, seed_mission, setup, transition};

// ============================================================================
// Actor identity
// ============================================================================

#[test]
fn test_unknown_actor_is_unauthorized() {
    let mut env: TestEnv = setup();

    let result = handlers::list_visible(&mut env.db, &env.tree, 9999);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

// ============================================================================
// Administration is admin-only
// ============================================================================

#[test]
fn test_non_admin_cannot_create_scope_nodes() {
    let mut env: TestEnv = setup();
    let request: CreateScopeNodeRequest = CreateScopeNodeRequest {
        node_id: String::from("province-12"),
        kind: String::from("province"),
        parent_id: Some(String::from("zone-1")),
    };

    let mut tree = env.tree.clone();
    let result =
        handlers::create_scope_node(&mut env.db, &mut tree, env.director_id, &request);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_admin_grows_the_tree_in_memory_and_on_disk() {
    let mut env: TestEnv = setup();
    let request: CreateScopeNodeRequest = CreateScopeNodeRequest {
        node_id: String::from("province-12"),
        kind: String::from("province"),
        parent_id: Some(String::from("zone-1")),
    };

    let mut tree = env.tree.clone();
    handlers::create_scope_node(&mut env.db, &mut tree, env.admin_id, &request)
        .expect("create scope node");

    assert!(tree.contains("province-12"));
    let reloaded = env.db.load_scope_tree().expect("scope tree");
    assert!(reloaded.contains("province-12"));
}

#[test]
fn test_scope_node_with_wrong_parent_level_is_refused() {
    let mut env: TestEnv = setup();
    let request: CreateScopeNodeRequest = CreateScopeNodeRequest {
        node_id: String::from("school-x"),
        kind: String::from("school"),
        parent_id: Some(String::from("zone-1")),
    };

    let mut tree = env.tree.clone();
    let result = handlers::create_scope_node(&mut env.db, &mut tree, env.admin_id, &request);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "scope_level_order"
    ));
    // The staged insert failed, so neither view changed.
    assert!(!tree.contains("school-x"));
}

#[test]
fn test_register_user_requires_matching_station() {
    let mut env: TestEnv = setup();
    // A director must be stationed at a school, not a province.
    let request: RegisterUserRequest = RegisterUserRequest {
        name: String::from("Misplaced Director"),
        role: String::from("director"),
        zone_id: Some(String::from("zone-1")),
        province_id: Some(String::from("province-11")),
        department_id: None,
        cluster_id: None,
        school_id: None,
    };

    let result = handlers::register_user(&mut env.db, &env.tree, env.admin_id, &request);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "role_station"
    ));
}

#[test]
fn test_register_user_round_trips() {
    let mut env: TestEnv = setup();
    let request: RegisterUserRequest = RegisterUserRequest {
        name: String::from("New Teacher"),
        role: String::from("teacher"),
        zone_id: Some(String::from("zone-1")),
        province_id: Some(String::from("province-11")),
        department_id: Some(String::from("department-111")),
        cluster_id: Some(String::from("cluster-1111")),
        school_id: Some(String::from("school-11111")),
    };

    let response = handlers::register_user(&mut env.db, &env.tree, env.admin_id, &request)
        .expect("register user");
    assert_eq!(response.user.role, "teacher");
    assert_eq!(response.user.scope_node_id.as_deref(), Some("school-11111"));
}

// ============================================================================
// Refusals are never not-found
// ============================================================================

#[test]
fn test_out_of_scope_approval_is_refused_not_hidden() {
    let mut env: TestEnv = setup();
    let creator: i64 = env.creator_id;
    let outsider: i64 = env.outsider_id;
    let mission_id: i64 = seed_mission(&mut env);
    transition(&mut env, creator, mission_id, "submit").expect("submit");

    let result = transition(&mut env, outsider, mission_id, "approve");
    match result {
        Err(ApiError::Unauthorized { .. }) => {}
        other => panic!("expected an authorization refusal, got {other:?}"),
    }
}

#[test]
fn test_out_of_scope_audit_trail_is_refused_not_hidden() {
    let mut env: TestEnv = setup();
    let mission_id: i64 = seed_mission(&mut env);

    let result = handlers::mission_audit_trail(
        &mut env.db,
        &env.tree,
        &env.roles,
        env.outsider_id,
        mission_id,
    );
    match result {
        Err(ApiError::Unauthorized { .. }) => {}
        other => panic!("expected an authorization refusal, got {other:?}"),
    }
}

#[test]
fn test_missing_mission_is_genuinely_not_found() {
    let mut env: TestEnv = setup();

    let result = handlers::mission_audit_trail(
        &mut env.db,
        &env.tree,
        &env.roles,
        env.admin_id,
        9999,
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_creator_reads_own_audit_trail() {
    let mut env: TestEnv = setup();
    let mission_id: i64 = seed_mission(&mut env);

    let response = handlers::mission_audit_trail(
        &mut env.db,
        &env.tree,
        &env.roles,
        env.creator_id,
        mission_id,
    )
    .expect("audit trail");
    assert_eq!(response.events.len(), 1);
    assert_eq!(response.events[0].action, "CreateMission");
}

#[test]
fn test_broken_scope_reference_is_not_downgraded_to_not_found() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::UnknownScopeNode {
            node_id: String::from("school-99999"),
        },
    ));
    match err {
        ApiError::Internal { ref message } => {
            assert!(message.contains("school-99999"));
        }
        other => panic!("expected an internal fault, got {other:?}"),
    }
}

#[test]
fn test_broken_role_reference_is_not_downgraded_to_invalid_input() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::UnknownRole {
            name: String::from("provincial"),
        },
    ));
    assert!(matches!(err, ApiError::Internal { .. }));
}
