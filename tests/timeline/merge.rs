//! Integration tests for the merged chronological sequence
//!
//! Uses generated races loaded through the record loader.

use racereel_foundation::RaceProfile;
use racereel_loader::{RecordLoader, SampleConfig, SampleRace};
use racereel_timeline::{BuilderConfig, TimelineBuilder};

fn sample_records(config: &SampleConfig) -> Vec<racereel_foundation::RaceRecord> {
    let race = SampleRace::generate(config);
    RecordLoader::new(&RaceProfile::car())
        .unwrap()
        .load(race.telemetry.as_bytes(), "telemetry.csv")
        .unwrap()
        .items
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn merged_points_are_chronological_with_id_tie_break() {
    let records = sample_records(&SampleConfig::default().with_samples(200));
    let timeline = TimelineBuilder::default().build(records);
    let merged = timeline.merged();
    for pair in merged.iter().collect::<Vec<_>>().windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            (a.time, &a.competitor) <= (b.time, &b.competitor),
            "{} {} before {} {}",
            a.time,
            a.competitor,
            b.time,
            b.competitor
        );
    }
}

#[test]
fn merged_contains_every_track_point() {
    let records = sample_records(&SampleConfig::default().with_samples(120).with_drop_rate(0.1));
    let timeline = TimelineBuilder::default().build(records);
    let per_track: usize = timeline.tracks().iter().map(|t| t.len()).sum();
    assert_eq!(timeline.len(), per_track);
}

#[test]
fn clean_race_has_no_synthesized_points() {
    let records = sample_records(&SampleConfig::default().with_samples(100));
    let observed = records.len();
    let timeline = TimelineBuilder::default().build(records);
    assert_eq!(timeline.synthesized_count(), 0);
    assert_eq!(timeline.len(), observed);
}

#[test]
fn dropped_samples_are_synthesized_back() {
    let config = SampleConfig::default()
        .with_samples(300)
        .with_drop_rate(0.2)
        .with_seed(9);
    let records = sample_records(&config);
    let timeline = TimelineBuilder::new(BuilderConfig::default().with_sample_interval(0.1))
        .unwrap()
        .build(records);
    assert!(timeline.synthesized_count() > 0);
    assert!(timeline.quality().gaps().count() > 0);
}

// =============================================================================
// Roster
// =============================================================================

#[test]
fn roster_without_grid_is_sorted_by_id() {
    let records = sample_records(&SampleConfig::default().with_samples(10));
    let timeline = TimelineBuilder::default().build(records);
    let roster: Vec<&str> = timeline.roster().map(|c| c.as_str()).collect();
    assert_eq!(roster, ["Hamilton", "Norris", "Sainz", "Verstappen"]);
}

#[test]
fn grid_order_comes_first() {
    let records = sample_records(&SampleConfig::default().with_samples(10));
    let timeline = TimelineBuilder::default()
        .with_roster(["Verstappen", "Hamilton"])
        .build(records);
    let roster: Vec<&str> = timeline.roster().map(|c| c.as_str()).collect();
    assert_eq!(roster, ["Verstappen", "Hamilton", "Norris", "Sainz"]);
}
