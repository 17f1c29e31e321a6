// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use sala_mission_domain::{MissionStatus, Role};

/// The user performing an action.
///
/// By the time an actor reaches the audit trail the upstream gateway has
/// authenticated them; the trail records who they were and the role they
/// held at that moment, since roles can change later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's id.
    pub user_id: i64,
    /// The role the user held when the action ran.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// The reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier, e.g. a request id.
    pub id: String,
    /// A description of what triggered the action.
    pub description: String,
}

impl Cause {
    /// Creates a new cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g. `"ApproveMission"`, `"CheckIn"`).
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a mission at a point in time.
///
/// The status is pulled out so the trail can be filtered without
/// deserializing; everything else rides along as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// The mission's lifecycle status at snapshot time.
    pub status: MissionStatus,
    /// Serialized mission fields.
    pub payload: String,
}

impl StateSnapshot {
    /// Creates a new snapshot.
    #[must_use]
    pub const fn new(status: MissionStatus, payload: String) -> Self {
        Self { status, payload }
    }
}

/// An immutable audit event.
///
/// Every successful state change produces exactly one audit event
/// capturing who acted, why, what they did, and the mission state before
/// and after. Events are append-only; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The mission this event belongs to; `None` for events that precede
    /// a mission id, such as bootstrap actions.
    pub mission_id: Option<i64>,
    /// The user who initiated the change.
    pub actor: Actor,
    /// The reason for the change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The mission state before the change; `None` when the event
    /// created the record.
    pub before: Option<StateSnapshot>,
    /// The mission state after the change.
    pub after: Option<StateSnapshot>,
    /// When the event was recorded.
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new audit event. Once created, the event is immutable.
    #[must_use]
    pub const fn new(
        mission_id: Option<i64>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: Option<StateSnapshot>,
        after: Option<StateSnapshot>,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            mission_id,
            actor,
            cause,
            action,
            before,
            after,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(42, Role::Director);

        assert_eq!(actor.user_id, 42);
        assert_eq!(actor.role, Role::Director);
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-456"), String::from("Mobile app request"));

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Mobile app request");
    }

    #[test]
    fn test_action_creation_requires_name() {
        let action: Action = Action::new(String::from("ApproveMission"), None);

        assert_eq!(action.name, "ApproveMission");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("RejectMission"),
            Some(String::from("Budget not available")),
        );

        assert_eq!(action.details, Some(String::from("Budget not available")));
    }

    #[test]
    fn test_snapshot_carries_status_and_payload() {
        let snapshot: StateSnapshot =
            StateSnapshot::new(MissionStatus::Submitted, String::from("{}"));

        assert_eq!(snapshot.status, MissionStatus::Submitted);
        assert_eq!(snapshot.payload, "{}");
    }

    #[test]
    fn test_audit_event_captures_before_and_after() {
        let event: AuditEvent = AuditEvent::new(
            Some(7),
            Actor::new(42, Role::Provincial),
            Cause::new(String::from("req-1"), String::from("Approval request")),
            Action::new(String::from("ApproveMission"), None),
            Some(StateSnapshot::new(
                MissionStatus::Submitted,
                String::from("{}"),
            )),
            Some(StateSnapshot::new(
                MissionStatus::Approved,
                String::from("{}"),
            )),
            datetime!(2026-03-01 09:00 UTC),
        );

        assert_eq!(event.mission_id, Some(7));
        assert_eq!(
            event.before.as_ref().map(|snapshot| snapshot.status),
            Some(MissionStatus::Submitted)
        );
        assert_eq!(
            event.after.as_ref().map(|snapshot| snapshot.status),
            Some(MissionStatus::Approved)
        );
    }
}
