// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sala_mission_domain::MissionStatus;

/// A lifecycle intent: pure data describing the status change an actor
/// wants, with the fields that change takes.
///
/// Commands carry no authorization; [`crate::apply_transition`] decides
/// whether the actor qualifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move a draft mission into the approval queue.
    SubmitMission,
    /// Approve a submitted mission.
    ApproveMission {
        /// Optional comments recorded with the approval.
        comments: Option<String>,
    },
    /// Reject a submitted mission. The reason is mandatory and must not
    /// be blank.
    RejectMission {
        /// Why the mission was rejected.
        reason: String,
    },
    /// Begin field work on an approved mission.
    StartMission,
    /// Close out a mission that is underway.
    CompleteMission {
        /// Optional completion report.
        report: Option<String>,
    },
    /// Call the mission off.
    CancelMission,
}

impl Command {
    /// The status this command drives the mission toward.
    #[must_use]
    pub const fn target_status(&self) -> MissionStatus {
        match self {
            Self::SubmitMission => MissionStatus::Submitted,
            Self::ApproveMission { .. } => MissionStatus::Approved,
            Self::RejectMission { .. } => MissionStatus::Rejected,
            Self::StartMission => MissionStatus::InProgress,
            Self::CompleteMission { .. } => MissionStatus::Completed,
            Self::CancelMission => MissionStatus::Cancelled,
        }
    }

    /// The audit action name recorded for this command.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::SubmitMission => "SubmitMission",
            Self::ApproveMission { .. } => "ApproveMission",
            Self::RejectMission { .. } => "RejectMission",
            Self::StartMission => "StartMission",
            Self::CompleteMission { .. } => "CompleteMission",
            Self::CancelMission => "CancelMission",
        }
    }
}
