//! Integration tests for errors, statuses, messages, and race profiles

use racereel_foundation::{
    ConfigIssue, Error, ErrorContext, ErrorKind, MalformedReason, MalformedRecord, Message,
    MessageKind, RaceKind, RaceProfile, RaceTime, Status, StatusVocabulary,
};

// =============================================================================
// Errors
// =============================================================================

#[test]
fn malformed_record_display() {
    let err = Error::malformed(MalformedRecord::new(
        7,
        MalformedReason::InvalidTimestamp("soon".to_string()),
    ));
    let msg = err.to_string();
    assert!(msg.contains("line 7"));
    assert!(msg.contains("soon"));
    assert!(!err.is_configuration());
}

#[test]
fn configuration_errors_are_flagged() {
    let err = Error::configuration(ConfigIssue::InvalidFrameRate(0.0));
    assert!(err.is_configuration());
    assert!(matches!(
        err.kind,
        ErrorKind::Configuration(ConfigIssue::InvalidFrameRate(_))
    ));
}

#[test]
fn error_context_display() {
    let context = ErrorContext::new().with_source("telemetry.csv").with_line(12);
    assert_eq!(context.to_string(), "at telemetry.csv:12");
    let err = Error::missing_column("timestamp").with_context(context);
    assert!(err.context.is_some());
    assert!(err.to_string().contains("timestamp"));
}

// =============================================================================
// Statuses
// =============================================================================

#[test]
fn vocabulary_lookup_is_case_insensitive() {
    let vocabulary = StatusVocabulary::default();
    assert_eq!(vocabulary.lookup("  DNF "), Some(Status::Retired));
    assert_eq!(vocabulary.lookup("In Pit"), Some(Status::InPit));
    assert_eq!(vocabulary.lookup("sleeping"), None);
}

#[test]
fn terminal_statuses() {
    assert!(Status::Retired.is_terminal());
    assert!(Status::Finished.is_terminal());
    assert!(!Status::Active.is_terminal());
    assert!(!Status::InPit.is_terminal());
    assert!(!Status::Unknown.is_terminal());
}

// =============================================================================
// Messages
// =============================================================================

#[test]
fn message_classification() {
    let at = RaceTime::ZERO;
    assert_eq!(Message::new(at, "GREEN FLAG").kind(), MessageKind::Green);
    assert_eq!(Message::new(at, "VSC deployed").kind(), MessageKind::Yellow);
    assert_eq!(Message::new(at, "Safety car").kind(), MessageKind::Red);
    assert_eq!(Message::new(at, "Hamilton leads").kind(), MessageKind::Other);
}

#[test]
fn message_start_and_end() {
    let at = RaceTime::ZERO;
    assert!(Message::new(at, "green flag").is_start());
    assert!(Message::new(at, "END").is_end());
    assert!(!Message::new(at, "Norris pits").is_end());
}

// =============================================================================
// Race profiles
// =============================================================================

#[test]
fn profiles_by_kind() {
    for kind in [RaceKind::Car, RaceKind::Drone, RaceKind::Bike, RaceKind::GoKart] {
        assert_eq!(RaceProfile::for_kind(kind).kind, kind);
    }
    assert_eq!(RaceProfile::go_kart().dimensions, 2);
}

#[test]
fn drone_vocabulary_extends_defaults() {
    let drone = RaceProfile::drone();
    assert_eq!(drone.statuses.lookup("crashed"), Some(Status::Retired));
    assert_eq!(drone.statuses.lookup("active"), Some(Status::Active));
}
