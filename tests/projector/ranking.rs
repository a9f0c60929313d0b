//! Integration tests for per-frame ranking

use std::cmp::Ordering;

use racereel_foundation::Standing;
use racereel_projector::{FrameProjector, ProjectorConfig, RaceFeeds, RankingKey};

use crate::{secs, timeline};

fn leaderboard_at(p: &FrameProjector, index: usize) -> Vec<String> {
    p.frame_at(index)
        .unwrap()
        .leaderboard()
        .into_iter()
        .filter(|entry| entry.rank.is_some())
        .map(|entry| entry.competitor.to_string())
        .collect()
}

// =============================================================================
// Overtakes
// =============================================================================

#[test]
fn overtake_is_reflected_in_the_next_frame() {
    // B starts behind and passes A at t=5.
    let p = FrameProjector::new(
        timeline(&[("A", 0.0, 10.0), ("A", 10.0, 20.0), ("B", 0.0, 0.0), ("B", 10.0, 30.0)]),
        ProjectorConfig::new().with_fps(10.0),
        RaceFeeds::new(),
    )
    .unwrap();

    let crossing = p
        .frames()
        .position(|f| f.leader().map(|id| id.as_str()) == Some("B"))
        .unwrap();
    assert_eq!(leaderboard_at(&p, crossing - 1), ["A", "B"]);
    assert_eq!(leaderboard_at(&p, crossing), ["B", "A"]);
    // Level at t=5, where the id tie-break still favours A.
    assert_eq!(crossing, 51);
}

#[test]
fn ranks_are_contiguous_from_one() {
    let p = FrameProjector::new(
        timeline(&[
            ("A", 0.0, 1.0),
            ("A", 2.0, 3.0),
            ("B", 0.0, 2.0),
            ("B", 2.0, 2.5),
            ("C", 0.0, 0.0),
            ("C", 2.0, 4.0),
        ]),
        ProjectorConfig::new(),
        RaceFeeds::new(),
    )
    .unwrap();
    for frame in &p {
        let mut ranks: Vec<u32> = frame.snapshots.iter().filter_map(|s| s.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, [1, 2, 3]);
    }
}

// =============================================================================
// Ranking keys
// =============================================================================

#[test]
fn rank_key_orders_by_position_value() {
    let p = FrameProjector::new(
        timeline(&[("A", 0.0, 2.0), ("A", 1.0, 2.0), ("B", 0.0, 1.0), ("B", 1.0, 1.0)]),
        ProjectorConfig::new().with_ranking(RankingKey::Rank),
        RaceFeeds::new(),
    )
    .unwrap();
    assert_eq!(leaderboard_at(&p, 0), ["B", "A"]);
}

#[test]
fn standings_key_follows_recorded_ranks() {
    let standings = [
        Standing::new(secs(0.0), "A", 1),
        Standing::new(secs(0.0), "B", 2),
        Standing::new(secs(1.0), "A", 2),
        Standing::new(secs(1.0), "B", 1),
    ];
    let p = FrameProjector::new(
        timeline(&[("A", 0.0, 0.0), ("A", 2.0, 2.0), ("B", 0.0, 0.0), ("B", 2.0, 2.0)]),
        ProjectorConfig::new()
            .with_fps(2.0)
            .with_ranking(RankingKey::Standings),
        RaceFeeds::new().with_standings(standings),
    )
    .unwrap();
    assert_eq!(leaderboard_at(&p, 1), ["A", "B"]);
    assert_eq!(leaderboard_at(&p, 2), ["B", "A"]);
    assert_eq!(leaderboard_at(&p, 4), ["B", "A"]);
}

#[test]
fn standings_key_requires_standings() {
    let err = FrameProjector::new(
        timeline(&[("A", 0.0, 0.0), ("A", 1.0, 1.0)]),
        ProjectorConfig::new().with_ranking(RankingKey::Standings),
        RaceFeeds::new(),
    )
    .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn unknown_ranking_key_name_is_rejected() {
    assert!(RankingKey::from_name("lap time").unwrap_err().is_configuration());
    assert_eq!(RankingKey::from_name("leaderboard").unwrap().name(), "standings");
}

#[test]
fn custom_comparator_ranks_frames() {
    let slowest_first = RankingKey::custom("slowest first", |a, b| {
        a.progress
            .partial_cmp(&b.progress)
            .unwrap_or(Ordering::Equal)
    });
    let p = FrameProjector::new(
        timeline(&[("A", 0.0, 5.0), ("A", 1.0, 6.0), ("B", 0.0, 1.0), ("B", 1.0, 2.0)]),
        ProjectorConfig::new().with_ranking(slowest_first),
        RaceFeeds::new(),
    )
    .unwrap();
    assert_eq!(leaderboard_at(&p, 0), ["B", "A"]);
    assert_eq!(p.ranking().name(), "slowest first");
}
