//! Integration tests for gap detection and repair

use racereel_foundation::{Position, RaceRecord, RaceTime, Status};
use racereel_timeline::{BuilderConfig, QualityNote, TimelineBuilder};

fn secs(s: f64) -> RaceTime {
    RaceTime::from_secs(s).unwrap()
}

fn record(id: &str, t: f64, x: f64) -> RaceRecord {
    RaceRecord::new(id, secs(t)).with_position(Position::scalar(x))
}

fn builder() -> TimelineBuilder {
    TimelineBuilder::new(BuilderConfig::default()).unwrap()
}

// =============================================================================
// Gap filling
// =============================================================================

#[test]
fn gap_is_filled_with_evenly_spaced_points() {
    let mut records: Vec<RaceRecord> = (0..=5).map(|i| record("A", f64::from(i), f64::from(i))).collect();
    records.push(record("A", 10.0, 10.0));
    let timeline = builder().build(records);

    let track = timeline.track("A").unwrap();
    let synthesized: Vec<f64> = track
        .points()
        .iter()
        .filter(|p| p.synthesized)
        .map(|p| p.time.secs())
        .collect();
    assert_eq!(synthesized.len(), 4);
    for (got, want) in synthesized.iter().zip([6.0, 7.0, 8.0, 9.0]) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }

    let gaps: Vec<&QualityNote> = timeline.quality().gaps().collect();
    assert_eq!(gaps.len(), 1);
    assert!(matches!(
        gaps[0],
        QualityNote::GapDetected { synthesized: 4, .. }
    ));
}

#[test]
fn synthesized_positions_are_interpolated() {
    let mut records: Vec<RaceRecord> = (0..=3).map(|i| record("A", f64::from(i), 0.0)).collect();
    records.push(record("A", 7.0, 40.0));
    let timeline = builder().build(records);
    let sample = timeline.sample_at("A", secs(5.0)).unwrap();
    assert!(sample.synthesized);
    let x = sample.position.unwrap().x();
    assert!((x - 20.0).abs() < 1e-9);
}

#[test]
fn spacing_within_tolerance_is_not_a_gap() {
    let records = [0.0, 1.0, 2.0, 3.4, 4.4].map(|t| record("A", t, t));
    let timeline = builder().build(records);
    assert_eq!(timeline.synthesized_count(), 0);
    assert!(timeline.quality().gaps().next().is_none());
}

#[test]
fn fixed_sample_interval_overrides_median() {
    let records = [0.0, 2.0, 4.0].map(|t| record("A", t, t));
    let config = BuilderConfig::default().with_sample_interval(0.5);
    let timeline = TimelineBuilder::new(config).unwrap().build(records);
    // Each 2s step is four intervals long, so three points fill it.
    assert_eq!(timeline.synthesized_count(), 6);
}

#[test]
fn invalid_builder_config_is_rejected() {
    assert!(TimelineBuilder::new(BuilderConfig::default().with_gap_tolerance(0.5)).is_err());
    assert!(TimelineBuilder::new(BuilderConfig::default().with_sample_interval(-1.0)).is_err());
}

// =============================================================================
// Position repair
// =============================================================================

#[test]
fn missing_position_between_known_ones_is_repaired() {
    let records = vec![
        record("A", 0.0, 0.0),
        RaceRecord::new("A", secs(1.0)),
        record("A", 2.0, 8.0),
    ];
    let timeline = builder().build(records);
    let point = &timeline.track("A").unwrap().points()[1];
    assert_eq!(point.position, Some(Position::scalar(4.0)));
    assert!(point.synthesized);
    assert!(
        timeline
            .quality()
            .notes
            .iter()
            .any(|n| matches!(n, QualityNote::RepairedPosition { .. }))
    );
}

#[test]
fn missing_edge_position_becomes_unknown() {
    let records = vec![
        RaceRecord::new("A", secs(0.0)).with_status(Status::Active),
        record("A", 1.0, 1.0),
        record("A", 2.0, 2.0),
    ];
    let timeline = builder().build(records);
    assert_eq!(timeline.status_at("A", secs(0.0)), Some(Status::Unknown));
    assert_eq!(timeline.status_at("A", secs(1.5)), Some(Status::Active));
}

// =============================================================================
// Duplicates
// =============================================================================

#[test]
fn duplicate_times_keep_first_sample() {
    let records = vec![
        record("A", 0.0, 0.0).with_line(2),
        record("A", 1.0, 1.0).with_line(3),
        record("A", 1.0, 99.0).with_line(4),
        record("A", 2.0, 2.0).with_line(5),
    ];
    let timeline = builder().build(records);
    assert_eq!(timeline.track("A").unwrap().len(), 3);
    assert_eq!(timeline.quality().duplicate_count(), 1);
    let sample = timeline.sample_at("A", secs(1.0)).unwrap();
    assert_eq!(sample.position, Some(Position::scalar(1.0)));
}
