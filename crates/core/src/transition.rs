// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

use sala_mission_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use sala_mission_domain::{
    Mission, MissionStatus, RoleHierarchy, ScopeTree, User, can_access, can_access_unscoped,
};

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{TransitionResult, snapshot};

/// Who qualifies to drive a given edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Only the mission's creator.
    CreatorOnly,
    /// Only an actor whose role can approve missions and whose scope
    /// covers the mission creator's scope. Both conditions, always.
    ApproverOnly,
    /// The creator, or anyone the `ApproverOnly` guard would admit.
    CreatorOrApprover,
}

/// One permitted edge of the mission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status the mission must currently hold.
    pub from: MissionStatus,
    /// Status the edge leads to.
    pub to: MissionStatus,
    /// Who may drive the edge.
    pub guard: Guard,
}

/// The complete lifecycle. Every edge not listed here is invalid, which
/// leaves terminal statuses (rejected, completed, cancelled) with no way
/// out.
pub const TRANSITIONS: [Transition; 8] = [
    Transition {
        from: MissionStatus::Draft,
        to: MissionStatus::Submitted,
        guard: Guard::CreatorOnly,
    },
    Transition {
        from: MissionStatus::Draft,
        to: MissionStatus::Cancelled,
        guard: Guard::CreatorOrApprover,
    },
    Transition {
        from: MissionStatus::Submitted,
        to: MissionStatus::Approved,
        guard: Guard::ApproverOnly,
    },
    Transition {
        from: MissionStatus::Submitted,
        to: MissionStatus::Rejected,
        guard: Guard::ApproverOnly,
    },
    Transition {
        from: MissionStatus::Submitted,
        to: MissionStatus::Cancelled,
        guard: Guard::CreatorOrApprover,
    },
    Transition {
        from: MissionStatus::Approved,
        to: MissionStatus::InProgress,
        guard: Guard::CreatorOnly,
    },
    Transition {
        from: MissionStatus::InProgress,
        to: MissionStatus::Completed,
        guard: Guard::CreatorOnly,
    },
    Transition {
        from: MissionStatus::InProgress,
        to: MissionStatus::Cancelled,
        guard: Guard::CreatorOrApprover,
    },
];

/// The read-only authorization inputs every lifecycle decision needs:
/// the startup-loaded scope tree and capability table.
#[derive(Debug, Clone, Copy)]
pub struct AuthzContext<'a> {
    /// The administrative hierarchy.
    pub tree: &'a ScopeTree,
    /// The seeded role capability table.
    pub roles: &'a RoleHierarchy,
}

/// Whether the actor's scope grants access to a mission, given its
/// creator.
///
/// A mission inherits its creator's location scope. A mission created by
/// an administrator has no scope and is visible to administrators only.
///
/// # Errors
///
/// Propagates [`sala_mission_domain::DomainError::UnknownScopeNode`] as
/// a domain violation; an unknown node is never a quiet denial.
pub fn can_access_mission(
    ctx: &AuthzContext<'_>,
    actor: &User,
    creator: &User,
) -> Result<bool, CoreError> {
    match creator.scope_node_id() {
        Some(node_id) => Ok(can_access(ctx.tree, actor, node_id)?),
        None => Ok(can_access_unscoped(actor, false)),
    }
}

fn is_approver(ctx: &AuthzContext<'_>, actor: &User, creator: &User) -> Result<bool, CoreError> {
    Ok(ctx.roles.can_approve(actor.role) && can_access_mission(ctx, actor, creator)?)
}

fn persisted_id(user: &User) -> Result<i64, CoreError> {
    user.id.ok_or(CoreError::Validation {
        field: "user_id",
        message: String::from("user has not been persisted"),
    })
}

/// Applies a lifecycle command to a mission.
///
/// Pure function: takes the mission as currently stored, the creator and
/// acting users, and a command; returns the mission as it should be
/// written plus the audit event, or an error. Persistence calls this
/// inside the write transaction so validation always runs against the
/// just-read row.
///
/// # Arguments
///
/// * `ctx` - Scope tree and role capability table
/// * `mission` - The mission as currently stored
/// * `creator` - The user who created the mission
/// * `actor` - The user requesting the change
/// * `command` - The requested change
/// * `cause` - Why the change is happening, for the audit trail
/// * `now` - Timestamp recorded on the event and any stamped fields
///
/// # Errors
///
/// Returns [`CoreError::InvalidTransition`] for an edge not in
/// [`TRANSITIONS`], [`CoreError::Forbidden`] when the guard refuses the
/// actor, [`CoreError::Validation`] for missing mandatory fields, and
/// [`CoreError::DomainViolation`] for unknown scope nodes or roles.
pub fn apply_transition(
    ctx: &AuthzContext<'_>,
    mission: &Mission,
    creator: &User,
    actor: &User,
    command: &Command,
    cause: &Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let target: MissionStatus = command.target_status();
    let edge: &Transition = TRANSITIONS
        .iter()
        .find(|transition| transition.from == mission.status && transition.to == target)
        .ok_or(CoreError::InvalidTransition {
            from: mission.status,
            to: target,
        })?;

    let actor_id: i64 = persisted_id(actor)?;
    let is_creator: bool = actor_id == mission.created_by;
    let qualifies: bool = match edge.guard {
        Guard::CreatorOnly => is_creator,
        Guard::ApproverOnly => is_approver(ctx, actor, creator)?,
        Guard::CreatorOrApprover => is_creator || is_approver(ctx, actor, creator)?,
    };
    if !qualifies {
        return Err(CoreError::Forbidden {
            action: command.action_name(),
            reason: format!(
                "user {actor_id} with role '{}' does not qualify for '{}' -> '{target}'",
                actor.role, mission.status
            ),
        });
    }

    let before: StateSnapshot = snapshot(mission)?;
    let mut updated: Mission = mission.clone();
    updated.status = target;
    let mut details: Option<String> = None;
    match command {
        Command::ApproveMission { comments } => {
            updated.approved_by = Some(actor_id);
            updated.approved_at = Some(now);
            updated.approval_comments.clone_from(comments);
            details.clone_from(comments);
        }
        Command::RejectMission { reason } => {
            if reason.trim().is_empty() {
                return Err(CoreError::Validation {
                    field: "rejection_reason",
                    message: String::from("a rejection requires a non-empty reason"),
                });
            }
            updated.rejection_reason = Some(reason.clone());
            details = Some(reason.clone());
        }
        Command::CompleteMission { report } => {
            updated.completion_report.clone_from(report);
        }
        Command::SubmitMission | Command::StartMission | Command::CancelMission => {}
    }
    let after: StateSnapshot = snapshot(&updated)?;

    let audit_event: AuditEvent = AuditEvent::new(
        mission.id,
        Actor::new(actor_id, actor.role),
        cause.clone(),
        Action::new(String::from(command.action_name()), details),
        Some(before),
        Some(after),
        now,
    );

    Ok(TransitionResult {
        mission: updated,
        audit_event,
    })
}
