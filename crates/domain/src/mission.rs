// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::error::DomainError;
use crate::geo::Position;

/// The kind of field mission being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    /// School or classroom field visit.
    FieldTrip,
    /// Teacher training delivery.
    Training,
    /// Planning or coordination meeting.
    Meeting,
    /// School monitoring inspection.
    Monitoring,
    /// Anything the other types do not cover.
    Other,
}

impl MissionType {
    /// Returns the stable string form of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FieldTrip => "field_trip",
            Self::Training => "training",
            Self::Meeting => "meeting",
            Self::Monitoring => "monitoring",
            Self::Other => "other",
        }
    }
}

impl FromStr for MissionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "field_trip" => Ok(Self::FieldTrip),
            "training" => Ok(Self::Training),
            "meeting" => Ok(Self::Meeting),
            "monitoring" => Ok(Self::Monitoring),
            "other" => Ok(Self::Other),
            other => Err(DomainError::InvalidMissionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for MissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a mission.
///
/// The permitted edges and their guards live in the core transition
/// table; this enum only names the statuses and knows which are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// Being drafted by its creator; not yet visible for approval.
    Draft,
    /// Submitted and awaiting an approval decision.
    Submitted,
    /// Approved; may begin.
    Approved,
    /// Rejected with a recorded reason. Terminal.
    Rejected,
    /// Underway in the field.
    InProgress,
    /// Finished. Terminal.
    Completed,
    /// Called off. Terminal.
    Cancelled,
}

impl MissionStatus {
    /// Returns the stable string form of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the status has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Whether participants may check in while the mission holds this
    /// status.
    #[must_use]
    pub const fn allows_check_in(&self) -> bool {
        matches!(self, Self::Approved | Self::InProgress)
    }
}

impl FromStr for MissionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidMissionStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Database id; `None` until persisted.
    pub id: Option<i64>,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// The kind of mission.
    pub mission_type: MissionType,
    /// Current lifecycle status.
    pub status: MissionStatus,
    /// First day of field work.
    pub start_date: Date,
    /// Last day of field work.
    pub end_date: Date,
    /// Destination name, e.g. a school or cluster office.
    pub location_name: String,
    /// Destination coordinates.
    pub position: Position,
    /// User id of the creator. The mission inherits the creator's
    /// location scope for visibility.
    pub created_by: i64,
    /// User id of the approver, once approved.
    pub approved_by: Option<i64>,
    /// When the mission was approved.
    pub approved_at: Option<OffsetDateTime>,
    /// Optional comments recorded at approval.
    pub approval_comments: Option<String>,
    /// Reason recorded at rejection; required for rejected missions.
    pub rejection_reason: Option<String>,
    /// Report recorded at completion.
    pub completion_report: Option<String>,
    /// When the mission record was created.
    pub created_at: OffsetDateTime,
}

impl Mission {
    /// Creates a new draft mission after field validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] for a blank title or location
    /// name and [`DomainError::InvalidDateRange`] when the end date
    /// precedes the start date.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: Option<String>,
        mission_type: MissionType,
        start_date: Date,
        end_date: Date,
        location_name: String,
        position: Position,
        created_by: i64,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "title" });
        }
        if location_name.trim().is_empty() {
            return Err(DomainError::EmptyField {
                field: "location_name",
            });
        }
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id: None,
            title,
            description,
            mission_type,
            status: MissionStatus::Draft,
            start_date,
            end_date,
            location_name,
            position,
            created_by,
            approved_by: None,
            approved_at: None,
            approval_comments: None,
            rejection_reason: None,
            completion_report: None,
            created_at,
        })
    }

    /// Returns the mission with its database id set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Role a user plays on a specific mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// Leads the mission in the field.
    Leader,
    /// Travels on the mission without leading it.
    Participant,
}

impl ParticipantRole {
    /// Returns the stable string form of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Participant => "participant",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leader" => Ok(Self::Leader),
            "participant" => Ok(Self::Participant),
            other => Err(DomainError::InvalidParticipantRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership on a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionParticipant {
    /// Database id; `None` until persisted.
    pub id: Option<i64>,
    /// The mission.
    pub mission_id: i64,
    /// The participating user.
    pub user_id: i64,
    /// The part the user plays on this mission.
    pub role: ParticipantRole,
    /// Whether the user has confirmed they will take part.
    pub confirmed: bool,
    /// When the user confirmed.
    pub confirmed_at: Option<OffsetDateTime>,
    /// Whether the user has checked in on site.
    pub checked_in: bool,
    /// When the user checked in.
    pub checked_in_at: Option<OffsetDateTime>,
    /// Where the user checked in. The raw fact is stored; distance from
    /// the mission site is derived at check-in time and only logged.
    pub check_in_position: Option<Position>,
}

impl MissionParticipant {
    /// Creates an unconfirmed participant row.
    #[must_use]
    pub const fn new(mission_id: i64, user_id: i64, role: ParticipantRole) -> Self {
        Self {
            id: None,
            mission_id,
            user_id,
            role,
            confirmed: false,
            confirmed_at: None,
            checked_in: false,
            checked_in_at: None,
            check_in_position: None,
        }
    }

    /// Returns the participant with its database id set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// What a participant reports themselves doing in a position ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// En route to the mission site.
    Traveling,
    /// At the mission site.
    OnSite,
    /// Heading back.
    Returning,
    /// Stationary, not at the site.
    Idle,
}

impl Activity {
    /// Returns the stable string form of the activity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Traveling => "traveling",
            Self::OnSite => "on_site",
            Self::Returning => "returning",
            Self::Idle => "idle",
        }
    }
}

impl FromStr for Activity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveling" => Ok(Self::Traveling),
            "on_site" => Ok(Self::OnSite),
            "returning" => Ok(Self::Returning),
            "idle" => Ok(Self::Idle),
            other => Err(DomainError::InvalidActivity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One append-only position report from the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingPing {
    /// Database id; `None` until persisted.
    pub id: Option<i64>,
    /// The mission being tracked.
    pub mission_id: i64,
    /// The reporting participant.
    pub user_id: i64,
    /// Reported position.
    pub position: Position,
    /// Reported GPS accuracy in metres, when the device provides one.
    pub accuracy_m: Option<f64>,
    /// When the position was recorded.
    pub recorded_at: OffsetDateTime,
    /// What the participant reports doing.
    pub activity: Activity,
    /// Optional free-form note.
    pub notes: Option<String>,
}

impl TrackingPing {
    /// Returns the ping with its database id set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
