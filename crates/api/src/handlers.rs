// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers parse and validate boundary input, enforce who may do
//! what, and delegate state changes to persistence, which re-validates
//! inside its own transaction. The actor id arrives from the upstream
//! gateway; these functions trust it as an identity but never as an
//! authorization.

use std::str::FromStr;

use time::OffsetDateTime;
use tracing::info;

use sala_mission::{
    AuthzContext, CheckInResult, Command, ConfirmOutcome, TransitionResult, can_access_mission,
};
use sala_mission_audit::{Action, Actor, AuditEvent, Cause};
use sala_mission_domain::{
    Activity, LocationScope, Mission, MissionParticipant, MissionType, ParticipantRole, Position,
    Role, RoleHierarchy, ScopeKind, ScopeNode, ScopeTree, TravelEstimate, User,
    estimate_travel as estimate_travel_impl,
};
use sala_mission_persistence::{Persistence, PersistenceError};

use crate::coordinates::{validate_accuracy, validate_position};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_operation_error,
    translate_persistence_error,
};
use crate::request_response::{
    AddParticipantRequest, AddParticipantResponse, AuditEventInfo, CheckInRequest, CheckInResponse,
    ConfirmParticipationResponse, CreateMissionRequest, CreateMissionResponse,
    CreateScopeNodeRequest, CreateScopeNodeResponse, EstimateTravelRequest,
    EstimateTravelResponse, ListVisibleMissionsResponse, MissionAuditTrailResponse, MissionInfo,
    ParticipantInfo, PingInfo, RecordPositionRequest, RecordPositionResponse, RegisterUserRequest,
    RegisterUserResponse, TransitionMissionRequest, TransitionMissionResponse, UserInfo,
};

/// Resolves the acting user from their gateway-supplied id.
///
/// An id with no matching user is an authorization failure, not a
/// missing resource: this is the caller's own identity.
fn load_actor(
    persistence: &mut Persistence,
    actor_id: i64,
    action: &str,
) -> Result<User, ApiError> {
    persistence.get_user(actor_id).map_err(|err| match err {
        PersistenceError::UserNotFound(_) => ApiError::Unauthorized {
            action: String::from(action),
            reason: format!("user {actor_id} is not registered"),
        },
        other => translate_persistence_error(other),
    })
}

/// Checks whether the actor may see or govern the given mission.
///
/// A refusal is surfaced as [`ApiError::Unauthorized`]; the mission's
/// existence is never hidden behind a not-found.
fn require_mission_access(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    roles: &RoleHierarchy,
    actor: &User,
    mission: &Mission,
    action: &str,
) -> Result<(), ApiError> {
    let creator: User = persistence
        .get_user(mission.created_by)
        .map_err(translate_persistence_error)?;
    let ctx: AuthzContext<'_> = AuthzContext { tree, roles };
    let allowed: bool =
        can_access_mission(&ctx, actor, &creator).map_err(translate_core_error)?;
    if allowed || actor.id == Some(mission.created_by) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: String::from(action),
            reason: format!(
                "mission {} is outside the actor's location scope",
                mission.id.unwrap_or(0)
            ),
        })
    }
}

// ============================================================================
// Missions
// ============================================================================

/// Lists the missions the actor is allowed to see.
///
/// # Errors
///
/// Returns an error if the actor is unknown or a query fails.
pub fn list_visible(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    actor_id: i64,
) -> Result<ListVisibleMissionsResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "list_visible")?;
    let missions: Vec<Mission> = persistence
        .list_visible_missions(tree, &actor)
        .map_err(translate_persistence_error)?;
    Ok(ListVisibleMissionsResponse {
        missions: missions.iter().map(MissionInfo::from_mission).collect(),
    })
}

/// Creates a draft mission owned by the actor.
///
/// # Errors
///
/// Returns an error for invalid input or if persistence fails.
pub fn create_mission(
    persistence: &mut Persistence,
    actor_id: i64,
    request: &CreateMissionRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CreateMissionResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "create_mission")?;
    let mission_type: MissionType =
        MissionType::from_str(&request.mission_type).map_err(translate_domain_error)?;
    let position: Position = validate_position(request.latitude, request.longitude)?;

    let draft: Mission = Mission::new(
        request.title.clone(),
        request.description.clone(),
        mission_type,
        request.start_date,
        request.end_date,
        request.location_name.clone(),
        position,
        actor_id,
        now,
    )
    .map_err(translate_domain_error)?;

    let stored: Mission = persistence
        .create_mission(&draft, &Actor::new(actor_id, actor.role), &cause, now)
        .map_err(translate_persistence_error)?;
    info!(
        mission_id = stored.id,
        created_by = actor_id,
        "mission created"
    );

    Ok(CreateMissionResponse {
        mission: MissionInfo::from_mission(&stored),
        message: format!("Mission '{}' created as a draft", stored.title),
    })
}

fn parse_command(request: &TransitionMissionRequest) -> Result<Command, ApiError> {
    match request.action.as_str() {
        "submit" => Ok(Command::SubmitMission),
        "approve" => Ok(Command::ApproveMission {
            comments: request.comments.clone(),
        }),
        "reject" => Ok(Command::RejectMission {
            reason: request.reason.clone().unwrap_or_default(),
        }),
        "start" => Ok(Command::StartMission),
        "complete" => Ok(Command::CompleteMission {
            report: request.report.clone(),
        }),
        "cancel" => Ok(Command::CancelMission),
        other => Err(ApiError::InvalidInput {
            field: String::from("action"),
            message: format!(
                "Unknown action '{other}'; expected submit, approve, reject, start, complete, or cancel"
            ),
        }),
    }
}

/// Applies a lifecycle action to a mission.
///
/// # Errors
///
/// Returns an error if the action is unknown, the transition is
/// refused, or persistence fails.
pub fn transition_mission(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    roles: &RoleHierarchy,
    actor_id: i64,
    mission_id: i64,
    request: &TransitionMissionRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionMissionResponse, ApiError> {
    load_actor(persistence, actor_id, "transition_mission")?;
    let command: Command = parse_command(request)?;

    let ctx: AuthzContext<'_> = AuthzContext { tree, roles };
    let result: TransitionResult = persistence
        .transition_mission(&ctx, actor_id, mission_id, &command, &cause, now)
        .map_err(translate_operation_error)?;
    info!(
        mission_id,
        actor_id,
        status = %result.mission.status,
        "mission transitioned"
    );

    Ok(TransitionMissionResponse {
        message: format!("Mission is now '{}'", result.mission.status),
        mission: MissionInfo::from_mission(&result.mission),
    })
}

// ============================================================================
// Participation
// ============================================================================

/// Confirms the actor's own participation on a mission.
///
/// # Errors
///
/// Returns an error if the actor is not on the roster or the mission
/// no longer accepts confirmations.
pub fn confirm_participation(
    persistence: &mut Persistence,
    actor_id: i64,
    mission_id: i64,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ConfirmParticipationResponse, ApiError> {
    load_actor(persistence, actor_id, "confirm_participation")?;
    let outcome: ConfirmOutcome = persistence
        .confirm_participation(mission_id, actor_id, &cause, now)
        .map_err(translate_operation_error)?;

    Ok(match outcome {
        ConfirmOutcome::Confirmed { participant, .. } => ConfirmParticipationResponse {
            participant: ParticipantInfo::from_participant(&participant),
            already_confirmed: false,
            message: String::from("Participation confirmed"),
        },
        ConfirmOutcome::AlreadyConfirmed { participant } => ConfirmParticipationResponse {
            participant: ParticipantInfo::from_participant(&participant),
            already_confirmed: true,
            message: String::from("Participation was already confirmed"),
        },
    })
}

/// Records the actor's arrival at the mission site.
///
/// # Errors
///
/// Returns an error for invalid coordinates or a refused check-in.
pub fn check_in(
    persistence: &mut Persistence,
    actor_id: i64,
    mission_id: i64,
    request: &CheckInRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CheckInResponse, ApiError> {
    load_actor(persistence, actor_id, "check_in")?;
    let position: Position = validate_position(request.latitude, request.longitude)?;

    let result: CheckInResult = persistence
        .check_in(mission_id, actor_id, position, &cause, now)
        .map_err(translate_operation_error)?;

    Ok(CheckInResponse {
        participant: ParticipantInfo::from_participant(&result.participant),
        distance_km: result.distance_km,
        message: format!(
            "Checked in {:.1} km from the mission site",
            result.distance_km
        ),
    })
}

/// Records a position ping for the actor on an in-progress mission.
///
/// # Errors
///
/// Returns an error for invalid input or a refused ping.
pub fn record_position(
    persistence: &mut Persistence,
    actor_id: i64,
    mission_id: i64,
    request: &RecordPositionRequest,
    now: OffsetDateTime,
) -> Result<RecordPositionResponse, ApiError> {
    load_actor(persistence, actor_id, "record_position")?;
    let position: Position = validate_position(request.latitude, request.longitude)?;
    let accuracy_m: Option<f64> = validate_accuracy(request.accuracy_m)?;
    let activity: Activity =
        Activity::from_str(&request.activity).map_err(translate_domain_error)?;

    let ping = persistence
        .record_ping(
            mission_id,
            actor_id,
            position,
            accuracy_m,
            activity,
            request.notes.clone(),
            now,
        )
        .map_err(translate_operation_error)?;

    Ok(RecordPositionResponse {
        ping: PingInfo::from_ping(&ping),
        message: String::from("Position recorded"),
    })
}

/// Estimates travel between two points.
///
/// Pure computation; nothing is read or written.
///
/// # Errors
///
/// Returns an error for invalid coordinates.
pub fn estimate_travel(
    request: &EstimateTravelRequest,
) -> Result<EstimateTravelResponse, ApiError> {
    let from: Position = validate_position(request.from_latitude, request.from_longitude)?;
    let to: Position = validate_position(request.to_latitude, request.to_longitude)?;
    let estimate: TravelEstimate = estimate_travel_impl(from, to);
    Ok(EstimateTravelResponse::from_estimate(&estimate))
}

// ============================================================================
// Administration
// ============================================================================

fn require_administrator(actor: &User, action: &str) -> Result<(), ApiError> {
    if actor.role == Role::Administrator {
        Ok(())
    } else {
        Err(ApiError::Unauthorized {
            action: String::from(action),
            reason: format!("role '{}' may not administer the platform", actor.role),
        })
    }
}

/// Adds a node to the location tree. Administrators only.
///
/// The node is validated against a staged copy of the tree, persisted,
/// and only then committed to the in-memory tree, so a failed write
/// never leaves the two views disagreeing.
///
/// # Errors
///
/// Returns an error for non-administrators, invalid nodes, or a failed
/// insert.
pub fn create_scope_node(
    persistence: &mut Persistence,
    tree: &mut ScopeTree,
    actor_id: i64,
    request: &CreateScopeNodeRequest,
) -> Result<CreateScopeNodeResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "create_scope_node")?;
    require_administrator(&actor, "create_scope_node")?;

    let kind: ScopeKind = ScopeKind::from_str(&request.kind).map_err(translate_domain_error)?;
    let node: ScopeNode = ScopeNode::new(request.node_id.clone(), kind, request.parent_id.clone());

    let mut staged: ScopeTree = tree.clone();
    staged.insert(node.clone()).map_err(translate_domain_error)?;
    persistence
        .insert_scope_node(&node)
        .map_err(translate_persistence_error)?;
    *tree = staged;
    info!(node_id = %node.id, kind = %node.kind, "scope node created");

    Ok(CreateScopeNodeResponse {
        node_id: node.id,
        message: String::from("Scope node created"),
    })
}

/// Registers a user. Administrators only.
///
/// # Errors
///
/// Returns an error for non-administrators, a scope that does not
/// match the role, or a failed insert.
pub fn register_user(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    actor_id: i64,
    request: &RegisterUserRequest,
) -> Result<RegisterUserResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "register_user")?;
    require_administrator(&actor, "register_user")?;

    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;
    let scope: Option<LocationScope> = request.zone_id.clone().map(|zone_id| LocationScope {
        zone_id,
        province_id: request.province_id.clone(),
        department_id: request.department_id.clone(),
        cluster_id: request.cluster_id.clone(),
        school_id: request.school_id.clone(),
    });
    let user: User =
        User::new(request.name.clone(), role, scope, tree).map_err(translate_domain_error)?;

    let stored: User = persistence
        .create_user(&user)
        .map_err(translate_persistence_error)?;
    info!(user_id = stored.id, role = %stored.role, "user registered");

    Ok(RegisterUserResponse {
        user: UserInfo::from_user(&stored),
        message: format!("User '{}' registered", stored.name),
    })
}

/// Enrolls a user on a mission's roster.
///
/// Only the mission's creator, or an approver whose scope covers the
/// mission, may build the roster; enrollment closes once the mission
/// reaches a terminal status.
///
/// # Errors
///
/// Returns an error for out-of-scope actors, closed missions, unknown
/// users, or duplicate enrollment.
pub fn add_participant(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    roles: &RoleHierarchy,
    actor_id: i64,
    mission_id: i64,
    request: &AddParticipantRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<AddParticipantResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "add_participant")?;
    let mission: Mission = persistence
        .get_mission(mission_id)
        .map_err(translate_persistence_error)?;

    let is_creator: bool = actor_id == mission.created_by;
    if !is_creator {
        if !roles.can_approve(actor.role) {
            return Err(ApiError::Unauthorized {
                action: String::from("add_participant"),
                reason: format!("role '{}' may not build mission rosters", actor.role),
            });
        }
        require_mission_access(persistence, tree, roles, &actor, &mission, "add_participant")?;
    }
    if mission.status.is_terminal() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("mission_active"),
            message: format!(
                "Mission {mission_id} is '{}' and its roster is closed",
                mission.status
            ),
        });
    }

    let role: ParticipantRole =
        ParticipantRole::from_str(&request.role).map_err(translate_domain_error)?;
    // Unknown enrollee is a 404; this is a record the actor names, not
    // the actor's own identity.
    persistence
        .get_user(request.user_id)
        .map_err(translate_persistence_error)?;

    let entry: MissionParticipant = MissionParticipant::new(mission_id, request.user_id, role);
    let stored: MissionParticipant = persistence
        .add_participant(&entry)
        .map_err(translate_persistence_error)?;

    let event: AuditEvent = AuditEvent::new(
        Some(mission_id),
        Actor::new(actor_id, actor.role),
        cause,
        Action::new(
            String::from("AddParticipant"),
            Some(format!("user {} as {}", request.user_id, stored.role)),
        ),
        None,
        None,
        now,
    );
    persistence
        .persist_audit_event(&event)
        .map_err(translate_persistence_error)?;

    Ok(AddParticipantResponse {
        participant: ParticipantInfo::from_participant(&stored),
        message: String::from("Participant added"),
    })
}

/// Returns a mission's audit trail to an actor whose scope covers it.
///
/// # Errors
///
/// Returns an error for unknown missions or out-of-scope actors.
pub fn mission_audit_trail(
    persistence: &mut Persistence,
    tree: &ScopeTree,
    roles: &RoleHierarchy,
    actor_id: i64,
    mission_id: i64,
) -> Result<MissionAuditTrailResponse, ApiError> {
    let actor: User = load_actor(persistence, actor_id, "mission_audit_trail")?;
    let mission: Mission = persistence
        .get_mission(mission_id)
        .map_err(translate_persistence_error)?;
    require_mission_access(
        persistence,
        tree,
        roles,
        &actor,
        &mission,
        "mission_audit_trail",
    )?;

    let events = persistence
        .mission_audit_trail(mission_id)
        .map_err(translate_persistence_error)?;
    Ok(MissionAuditTrailResponse {
        events: events.iter().map(AuditEventInfo::from_event).collect(),
    })
}
