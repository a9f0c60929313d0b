//! End-to-end replays of generated races

use std::sync::Arc;

use racereel_foundation::{RaceProfile, RaceTime, Status};
use racereel_loader::SampleConfig;
use racereel_projector::{
    FrameProjector, Playback, ProjectorConfig, RaceFeeds, RankingKey, ReplayWindow,
};
use racereel_timeline::{BuilderConfig, Timeline, TimelineBuilder};

use crate::load_sample;

fn secs(s: f64) -> RaceTime {
    RaceTime::from_secs(s).unwrap()
}

fn build(source: &racereel_loader::RaceSource) -> Timeline {
    TimelineBuilder::new(BuilderConfig::default())
        .unwrap()
        .with_grid(&source.grid.items)
        .with_pit_stops(source.pit_stops.items.iter().cloned())
        .build(source.telemetry.items.iter().cloned())
}

fn feeds(source: &racereel_loader::RaceSource) -> RaceFeeds {
    RaceFeeds::new()
        .with_messages(source.messages.items.iter().cloned())
        .with_standings(source.standings.items.iter().cloned())
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn directory_to_frames() {
    let (_dir, source) = load_sample(&SampleConfig::default());
    let timeline = build(&source);

    let roster: Vec<&str> = timeline.roster().map(|c| c.as_str()).collect();
    assert_eq!(roster, ["Hamilton", "Verstappen", "Norris", "Sainz"]);

    let projector = FrameProjector::new(timeline, ProjectorConfig::new(), feeds(&source)).unwrap();
    // Telemetry ends at 49.9s.
    assert_eq!(projector.len(), 1498);

    // END at 50.0s lies past the last frame.
    assert_eq!(projector.unattached().len(), 1);
    assert!(projector.unattached()[0].is_end());
    let attached: usize = projector.frames().map(|f| f.messages.len()).sum();
    assert_eq!(attached, source.messages.len() - 1);
}

#[test]
fn pit_window_shows_in_frames() {
    let (_dir, source) = load_sample(&SampleConfig::default());
    let projector = FrameProjector::new(build(&source), ProjectorConfig::new(), feeds(&source)).unwrap();

    let during = projector.frame_at(projector.index_at(secs(17.0)).unwrap()).unwrap();
    assert_eq!(during.snapshot("Sainz").unwrap().status, Status::InPit);
    assert_eq!(during.snapshot("Hamilton").unwrap().status, Status::Active);

    let after = projector.frame_at(projector.index_at(secs(25.0)).unwrap()).unwrap();
    assert_eq!(after.snapshot("Sainz").unwrap().status, Status::Active);
}

#[test]
fn standings_ranking_follows_leaderboard_file() {
    let (_dir, source) = load_sample(&SampleConfig::default());
    let config = ProjectorConfig::new().with_ranking(RankingKey::Standings);
    let projector = FrameProjector::new(build(&source), config, feeds(&source)).unwrap();

    let order = |t: f64| -> Vec<String> {
        let frame = projector.frame_at(projector.index_at(secs(t)).unwrap()).unwrap();
        frame
            .leaderboard()
            .into_iter()
            .map(|e| e.competitor.to_string())
            .collect()
    };
    assert_eq!(order(12.0), ["Hamilton", "Verstappen", "Norris", "Sainz"]);
    assert_eq!(order(30.0), ["Hamilton", "Verstappen", "Sainz", "Norris"]);
}

#[test]
fn flag_to_flag_replays_the_race_proper() {
    let (_dir, source) = load_sample(&SampleConfig::default());
    let config = ProjectorConfig::for_profile(&RaceProfile::car())
        .unwrap()
        .with_fps(10.0)
        .with_window(ReplayWindow::FlagToFlag);
    let projector = FrameProjector::new(build(&source), config, feeds(&source)).unwrap();

    let window = projector.window().unwrap();
    assert_eq!(window.start, secs(0.0));
    assert_eq!(window.end, secs(50.0));
    assert!(projector.unattached().is_empty());

    // Nobody has telemetry at the END message.
    let last = projector.frames().next_back().unwrap();
    assert_eq!(last.messages[0].text(), "END");
    assert!(last.snapshots.iter().all(|s| s.status == Status::Unknown));
    assert!(last.leader().is_none());
}

#[test]
fn gappy_race_still_replays() {
    let config = SampleConfig::default()
        .with_samples(200)
        .with_drop_rate(0.15)
        .with_blank_timestamp_rate(0.02)
        .with_seed(3);
    let (_dir, source) = load_sample(&config);
    assert!(source.telemetry.report.excluded_count() > 0);

    let timeline = build(&source);
    assert!(timeline.synthesized_count() > 0);

    let projector = FrameProjector::new(timeline, ProjectorConfig::new(), feeds(&source)).unwrap();
    for frame in &projector {
        assert_eq!(frame.snapshots.len(), 4);
        assert!(frame.leader().is_some());
    }
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn projectors_share_one_timeline() {
    let (_dir, source) = load_sample(&SampleConfig::default().with_samples(50));
    let timeline = Arc::new(build(&source));
    let a = FrameProjector::new(Arc::clone(&timeline), ProjectorConfig::new(), feeds(&source)).unwrap();
    let b = FrameProjector::new(
        Arc::clone(&timeline),
        ProjectorConfig::new().with_fps(5.0),
        feeds(&source),
    )
    .unwrap();
    assert!(Arc::ptr_eq(a.timeline(), b.timeline()));
    assert!(a.len() > b.len());
}

#[test]
fn renderer_loop_with_playback() {
    let (_dir, source) = load_sample(&SampleConfig::default().with_samples(50));
    let projector = FrameProjector::new(build(&source), ProjectorConfig::new(), feeds(&source)).unwrap();
    let mut playback = Playback::new(projector.len());
    let mut rendered = 0;
    loop {
        let index = playback.current().unwrap();
        let frame = projector.frame_at(index).unwrap();
        assert_eq!(frame.index, index);
        rendered += 1;
        if playback.advance().is_none() {
            break;
        }
    }
    assert_eq!(rendered, projector.len());
}
