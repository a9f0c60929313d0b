//! Integration tests for frame sequences

use racereel_foundation::{Status, RaceRecord};
use racereel_projector::{FrameProjector, ProjectorConfig, RaceFeeds, ReplayWindow};
use racereel_timeline::TimelineBuilder;

use crate::{secs, timeline};

fn projector(samples: &[(&str, f64, f64)], config: ProjectorConfig) -> FrameProjector {
    FrameProjector::new(timeline(samples), config, RaceFeeds::new()).unwrap()
}

// =============================================================================
// Timing
// =============================================================================

#[test]
fn frames_are_evenly_spaced() {
    for fps in [1.0, 24.0, 30.0, 60.0, 7.5] {
        let p = projector(&[("A", 0.0, 0.0), ("A", 4.0, 4.0)], ProjectorConfig::new().with_fps(fps));
        let times: Vec<f64> = p.frames().map(|f| f.time.secs()).collect();
        assert!(!times.is_empty());
        for pair in times.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!((pair[1] - pair[0] - 1.0 / fps).abs() < 1e-9, "fps {fps}");
        }
        assert!(*times.last().unwrap() <= 4.0 + 1e-9);
    }
}

#[test]
fn frame_count_includes_both_ends() {
    let p = projector(&[("A", 0.0, 0.0), ("A", 10.0, 10.0)], ProjectorConfig::new());
    assert_eq!(p.len(), 301);
    assert_eq!(p.frames().len(), 301);
    assert_eq!(p.frame_at(300).unwrap().time, secs(10.0));
    assert!(p.frame_at(301).is_none());
}

#[test]
fn default_frame_rate_is_thirty() {
    let p = projector(&[("A", 0.0, 0.0), ("A", 1.0, 1.0)], ProjectorConfig::default());
    assert!((p.fps() - 30.0).abs() < f64::EPSILON);
    assert!((p.interval() - 1.0 / 30.0).abs() < 1e-12);
}

#[test]
fn invalid_frame_rate_fails_before_any_frame() {
    for fps in [0.0, -1.0] {
        let result = FrameProjector::new(
            timeline(&[("A", 0.0, 0.0), ("A", 1.0, 1.0)]),
            ProjectorConfig::new().with_fps(fps),
            RaceFeeds::new(),
        );
        assert!(result.unwrap_err().is_configuration());
    }
}

#[test]
fn frame_rate_too_high_to_index_is_rejected() {
    let err = FrameProjector::new(
        timeline(&[("A", 0.0, 0.0), ("A", 10.0, 10.0)]),
        ProjectorConfig::new().with_fps(1e300),
        RaceFeeds::new(),
    )
    .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("too many frames"));
}

// =============================================================================
// Resampling
// =============================================================================

#[test]
fn midpoint_is_interpolated() {
    let p = projector(&[("A", 0.0, 0.0), ("A", 10.0, 10.0)], ProjectorConfig::new());
    let frame = p.frame_at(150).unwrap();
    assert_eq!(frame.time, secs(5.0));
    let x = frame.snapshot("A").unwrap().position.unwrap().x();
    assert!((x - 5.0).abs() < 1e-9);
}

#[test]
fn competitor_is_unknown_outside_its_span() {
    let p = projector(
        &[("A", 0.0, 0.0), ("A", 10.0, 10.0), ("B", 4.0, 0.0), ("B", 6.0, 2.0)],
        ProjectorConfig::new().with_fps(1.0),
    );
    let early = p.frame_at(2).unwrap();
    let b = early.snapshot("B").unwrap();
    assert_eq!(b.status, Status::Unknown);
    assert_eq!(b.position, None);
    assert_eq!(b.rank, None);

    let late = p.frame_at(8).unwrap();
    assert_eq!(late.snapshot("B").unwrap().status, Status::Unknown);
    assert_eq!(late.snapshot("A").unwrap().rank, Some(1));
}

#[test]
fn single_record_competitor_is_constant() {
    let p = projector(
        &[("A", 0.0, 0.0), ("A", 2.0, 2.0), ("Solo", 1.0, 42.0)],
        ProjectorConfig::new().with_fps(2.0),
    );
    for frame in &p {
        let solo = frame.snapshot("Solo").unwrap();
        assert_eq!(solo.status, Status::InsufficientData);
        assert_eq!(solo.position.map(|pos| pos.x()), Some(42.0));
    }
}

#[test]
fn every_frame_has_a_snapshot_per_competitor() {
    let p = projector(
        &[("A", 0.0, 0.0), ("A", 3.0, 3.0), ("B", 1.0, 0.0), ("B", 2.0, 1.0)],
        ProjectorConfig::new().with_fps(10.0),
    );
    assert!(p.frames().all(|f| f.snapshots.len() == 2));
}

// =============================================================================
// Restartability and windows
// =============================================================================

#[test]
fn iterating_twice_yields_identical_frames() {
    let p = projector(
        &[("A", 0.0, 0.0), ("A", 3.0, 9.0), ("B", 0.0, 1.0), ("B", 3.0, 5.0)],
        ProjectorConfig::new(),
    );
    let first: Vec<_> = p.frames().collect();
    let second: Vec<_> = (&p).into_iter().collect();
    assert_eq!(first, second);
}

#[test]
fn frames_iterate_from_both_ends() {
    let p = projector(&[("A", 0.0, 0.0), ("A", 1.0, 1.0)], ProjectorConfig::new().with_fps(4.0));
    let backwards: Vec<usize> = p.frames().rev().map(|f| f.index).collect();
    assert_eq!(backwards, [4, 3, 2, 1, 0]);
    assert_eq!(p.frames().nth(3).map(|f| f.index), Some(3));
}

#[test]
fn between_window_limits_frames() {
    let p = projector(
        &[("A", 0.0, 0.0), ("A", 10.0, 10.0)],
        ProjectorConfig::new()
            .with_fps(2.0)
            .with_window(ReplayWindow::Between(secs(2.0), secs(4.0))),
    );
    assert_eq!(p.len(), 5);
    assert_eq!(p.time_of(0), Some(secs(2.0)));
    assert_eq!(p.time_of(4), Some(secs(4.0)));
}

#[test]
fn empty_timeline_has_no_frames() {
    let timeline = TimelineBuilder::default().build(Vec::<RaceRecord>::new());
    let p = FrameProjector::new(timeline, ProjectorConfig::new(), RaceFeeds::new()).unwrap();
    assert!(p.is_empty());
    assert_eq!(p.frames().count(), 0);
    assert_eq!(p.index_at(secs(1.0)), None);
}
