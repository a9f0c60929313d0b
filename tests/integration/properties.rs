//! Property tests across the whole pipeline

use proptest::prelude::*;

use racereel_foundation::{Position, RaceProfile, RaceRecord, RaceTime};
use racereel_loader::{RecordLoader, SampleConfig};
use racereel_projector::{FrameProjector, ProjectorConfig, RaceFeeds};
use racereel_timeline::TimelineBuilder;

use crate::load_sample;

fn secs(s: f64) -> RaceTime {
    RaceTime::from_secs(s).unwrap()
}

// =============================================================================
// Send and Sync
// =============================================================================

#[test]
fn core_types_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<racereel_timeline::Timeline>();
    assert_send_sync::<FrameProjector>();
    assert_send_sync::<racereel_projector::Frame>();
    assert_send_sync::<racereel_loader::RaceSource>();
}

#[test]
fn frames_render_on_another_thread() {
    let (_dir, source) = load_sample(&SampleConfig::default().with_samples(30));
    let timeline = TimelineBuilder::default().build(source.telemetry.items);
    let projector = FrameProjector::new(timeline, ProjectorConfig::new(), RaceFeeds::new()).unwrap();
    let worker = projector.clone();
    let count = std::thread::spawn(move || worker.frames().count()).join().unwrap();
    assert_eq!(count, projector.len());
}

// =============================================================================
// Load accounting
// =============================================================================

#[test]
fn blank_timestamps_never_reach_the_timeline() {
    let csv = "SessionTime,Driver,X,Y\n0.0,A,0,0\n,A,5,5\n1.0,A,1,1\n";
    let loaded = RecordLoader::new(&RaceProfile::car())
        .unwrap()
        .load(csv.as_bytes(), "telemetry.csv")
        .unwrap();
    assert_eq!(loaded.len(), loaded.report.input_rows - loaded.report.excluded_count());
    let timeline = TimelineBuilder::default().build(loaded.items);
    assert_eq!(timeline.len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn frames_are_evenly_spaced(
        fps in 1.0f64..120.0,
        end in 0.5f64..20.0,
    ) {
        let records = [(0.0, 0.0), (end, end)]
            .map(|(t, x)| RaceRecord::new("A", secs(t)).with_position(Position::scalar(x)));
        let timeline = TimelineBuilder::default().build(records);
        let projector = FrameProjector::new(
            timeline,
            ProjectorConfig::new().with_fps(fps),
            RaceFeeds::new(),
        )
        .unwrap();

        let times: Vec<f64> = projector.frames().map(|f| f.time.secs()).collect();
        prop_assert!(!times.is_empty());
        prop_assert_eq!(times[0], 0.0);
        for pair in times.windows(2) {
            prop_assert!((pair[1] - pair[0] - 1.0 / fps).abs() < 1e-9);
        }
        prop_assert!(*times.last().unwrap() <= end + 1e-9);
        prop_assert!(*times.last().unwrap() + 1.0 / fps > end - 1e-9);
    }

    #[test]
    fn linear_resampling_matches_time(
        t in 0.0f64..10.0,
    ) {
        let records = [(0.0, 0.0), (10.0, 10.0)]
            .map(|(t, x)| RaceRecord::new("A", secs(t)).with_position(Position::scalar(x)));
        let timeline = TimelineBuilder::default().build(records);
        let sample = timeline.sample_at("A", secs(t)).unwrap();
        prop_assert!((sample.position.unwrap().x() - t).abs() < 1e-9);
    }

    #[test]
    fn replay_is_deterministic(seed in 0u64..1000) {
        let config = SampleConfig::default()
            .with_samples(40)
            .with_drop_rate(0.1)
            .with_seed(seed);
        let (_dir, source) = load_sample(&config);
        let build = || {
            let timeline = TimelineBuilder::default().build(source.telemetry.items.clone());
            FrameProjector::new(timeline, ProjectorConfig::new().with_fps(10.0), RaceFeeds::new())
                .unwrap()
                .frames()
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(build(), build());
    }
}
