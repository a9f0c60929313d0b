//! Frames and their contents.

use racereel_foundation::{CompetitorId, Message, Position, RaceTime, Status};
use racereel_timeline::TrackSample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One competitor's state in a frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompetitorSnapshot {
    /// The competitor.
    pub competitor: CompetitorId,
    /// Resampled position, `None` when unknown.
    pub position: Option<Position>,
    /// Lap number.
    pub lap: Option<u32>,
    /// Status.
    pub status: Status,
    /// Distance covered along the track.
    pub progress: Option<f64>,
    /// Leaderboard rank in this frame, 1 is the leader. `None` if unranked.
    pub rank: Option<u32>,
    /// Derived from synthesized points.
    pub synthesized: bool,
}

impl CompetitorSnapshot {
    pub(crate) fn from_sample(competitor: CompetitorId, sample: TrackSample) -> Self {
        Self {
            competitor,
            position: sample.position,
            lap: sample.lap,
            status: sample.status,
            progress: sample.progress,
            rank: None,
            synthesized: sample.synthesized,
        }
    }
}

/// One row of a frame's leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeaderboardEntry {
    /// Rank, `None` for unranked competitors listed after the ranked ones.
    pub rank: Option<u32>,
    /// The competitor.
    pub competitor: CompetitorId,
    /// Status.
    pub status: Status,
    /// Lap number.
    pub lap: Option<u32>,
}

/// One animation step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Frame index, from 0.
    pub index: usize,
    /// Race time shown by this frame.
    pub time: RaceTime,
    /// One snapshot per roster competitor, in roster order.
    pub snapshots: Vec<CompetitorSnapshot>,
    /// Messages due at this frame, in time order.
    pub messages: Vec<Message>,
}

impl Frame {
    /// Returns the race clock label, `MM:SS.mmm`.
    #[must_use]
    pub fn clock(&self) -> String {
        self.time.clock()
    }

    /// Returns one competitor's snapshot.
    #[must_use]
    pub fn snapshot(&self, competitor: &str) -> Option<&CompetitorSnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.competitor.as_str() == competitor)
    }

    /// Returns the leaderboard: ranked competitors by rank, then the
    /// unranked ones in roster order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let mut ranked: Vec<&CompetitorSnapshot> =
            self.snapshots.iter().filter(|s| s.rank.is_some()).collect();
        ranked.sort_by_key(|s| s.rank);
        ranked
            .into_iter()
            .chain(self.snapshots.iter().filter(|s| s.rank.is_none()))
            .map(|s| LeaderboardEntry {
                rank: s.rank,
                competitor: s.competitor.clone(),
                status: s.status,
                lap: s.lap,
            })
            .collect()
    }

    /// Returns the leader, if anyone is ranked.
    #[must_use]
    pub fn leader(&self) -> Option<&CompetitorId> {
        self.snapshots
            .iter()
            .find(|s| s.rank == Some(1))
            .map(|s| &s.competitor)
    }
}
