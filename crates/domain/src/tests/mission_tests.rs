// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::{date, datetime};

use super::helpers::{create_test_tree, zone_one_school_scope};
use crate::{
    Activity, DomainError, Mission, MissionParticipant, MissionStatus, MissionType,
    ParticipantRole, Position, Role, ScopeTree, User,
};

fn create_test_mission() -> Mission {
    Mission::new(
        String::from("Cluster mentoring visit"),
        Some(String::from("Quarterly mentoring round")),
        MissionType::FieldTrip,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 06),
        String::from("Siem Reap school"),
        Position::new(13.3633, 103.8564).unwrap(),
        42,
        datetime!(2026-02-01 08:00 UTC),
    )
    .unwrap()
}

#[test]
fn test_new_mission_starts_as_draft() {
    let mission: Mission = create_test_mission();
    assert_eq!(mission.status, MissionStatus::Draft);
    assert_eq!(mission.id, None);
    assert_eq!(mission.created_by, 42);
    assert_eq!(mission.approved_by, None);
}

#[test]
fn test_mission_rejects_blank_title() {
    let err: DomainError = Mission::new(
        String::from("   "),
        None,
        MissionType::Training,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 06),
        String::from("Somewhere"),
        Position::new(11.0, 104.0).unwrap(),
        42,
        datetime!(2026-02-01 08:00 UTC),
    )
    .unwrap_err();
    assert_eq!(err, DomainError::EmptyField { field: "title" });
}

#[test]
fn test_mission_rejects_inverted_dates() {
    let err: DomainError = Mission::new(
        String::from("Visit"),
        None,
        MissionType::Training,
        date!(2026 - 03 - 06),
        date!(2026 - 03 - 02),
        String::from("Somewhere"),
        Position::new(11.0, 104.0).unwrap(),
        42,
        datetime!(2026-02-01 08:00 UTC),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::InvalidDateRange { .. }));
}

#[test]
fn test_single_day_mission_is_valid() {
    Mission::new(
        String::from("Inspection"),
        None,
        MissionType::Monitoring,
        date!(2026 - 03 - 02),
        date!(2026 - 03 - 02),
        String::from("Somewhere"),
        Position::new(11.0, 104.0).unwrap(),
        42,
        datetime!(2026-02-01 08:00 UTC),
    )
    .unwrap();
}

#[test]
fn test_status_string_round_trip() {
    for status in [
        MissionStatus::Draft,
        MissionStatus::Submitted,
        MissionStatus::Approved,
        MissionStatus::Rejected,
        MissionStatus::InProgress,
        MissionStatus::Completed,
        MissionStatus::Cancelled,
    ] {
        let parsed: MissionStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_terminal_statuses() {
    assert!(MissionStatus::Rejected.is_terminal());
    assert!(MissionStatus::Completed.is_terminal());
    assert!(MissionStatus::Cancelled.is_terminal());
    assert!(!MissionStatus::Draft.is_terminal());
    assert!(!MissionStatus::Submitted.is_terminal());
    assert!(!MissionStatus::Approved.is_terminal());
    assert!(!MissionStatus::InProgress.is_terminal());
}

#[test]
fn test_check_in_window() {
    assert!(MissionStatus::Approved.allows_check_in());
    assert!(MissionStatus::InProgress.allows_check_in());
    assert!(!MissionStatus::Draft.allows_check_in());
    assert!(!MissionStatus::Submitted.allows_check_in());
    assert!(!MissionStatus::Completed.allows_check_in());
}

#[test]
fn test_unknown_status_string_is_rejected() {
    let err: DomainError = "archived".parse::<MissionStatus>().unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidMissionStatus(String::from("archived"))
    );
}

#[test]
fn test_mission_type_wire_values() {
    for (text, mission_type) in [
        ("field_trip", MissionType::FieldTrip),
        ("training", MissionType::Training),
        ("meeting", MissionType::Meeting),
        ("monitoring", MissionType::Monitoring),
        ("other", MissionType::Other),
    ] {
        assert_eq!(text.parse::<MissionType>().unwrap(), mission_type);
        assert_eq!(mission_type.as_str(), text);
    }
}

#[test]
fn test_unknown_mission_type_string_is_rejected() {
    let err: DomainError = "vacation".parse::<MissionType>().unwrap_err();
    assert_eq!(err, DomainError::InvalidMissionType(String::from("vacation")));
}

#[test]
fn test_participant_starts_unconfirmed() {
    let participant: MissionParticipant =
        MissionParticipant::new(7, 42, ParticipantRole::Participant);
    assert!(!participant.confirmed);
    assert!(!participant.checked_in);
    assert_eq!(participant.confirmed_at, None);
    assert_eq!(participant.check_in_position, None);
}

#[test]
fn test_participant_role_wire_values() {
    assert_eq!("leader".parse::<ParticipantRole>().unwrap(), ParticipantRole::Leader);
    assert_eq!(
        "participant".parse::<ParticipantRole>().unwrap(),
        ParticipantRole::Participant
    );
    assert_eq!(ParticipantRole::Leader.as_str(), "leader");
    assert_eq!(ParticipantRole::Participant.as_str(), "participant");
}

#[test]
fn test_activity_round_trip() {
    for activity in [
        Activity::Traveling,
        Activity::OnSite,
        Activity::Returning,
        Activity::Idle,
    ] {
        assert_eq!(activity.as_str().parse::<Activity>().unwrap(), activity);
    }
}

#[test]
fn test_user_scope_must_match_role_station() {
    let tree: ScopeTree = create_test_tree();
    // A director must be stationed at a school.
    let err: DomainError = User::new(
        String::from("Sok Dara"),
        Role::Director,
        None,
        &tree,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::ScopeRoleMismatch { .. }));

    User::new(
        String::from("Sok Dara"),
        Role::Director,
        Some(zone_one_school_scope()),
        &tree,
    )
    .unwrap();
}

#[test]
fn test_scope_role_mismatch_message_names_both_stations() {
    let tree: ScopeTree = create_test_tree();
    let err: DomainError =
        User::new(String::from("Sok Dara"), Role::Director, None, &tree).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Role director must be stationed at school, but the scope ends at no scope"
    );
}

#[test]
fn test_administrator_must_not_carry_scope() {
    let tree: ScopeTree = create_test_tree();
    let err: DomainError = User::new(
        String::from("Ministry Admin"),
        Role::Administrator,
        Some(zone_one_school_scope()),
        &tree,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::ScopeRoleMismatch { .. }));
}
