//! Session data recorded alongside telemetry: the starting grid, pit stops,
//! recorded standings, and the track outline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::competitor::CompetitorId;
use crate::position::Position;
use crate::time::RaceTime;

/// One slot on the starting grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSlot {
    /// The competitor.
    pub competitor: CompetitorId,
    /// Starting position, 1 is pole.
    pub grid_position: Option<u32>,
    /// Display name.
    pub name: Option<String>,
    /// Team or entrant.
    pub team: Option<String>,
}

impl GridSlot {
    /// Creates a slot with no further details.
    #[must_use]
    pub fn new(competitor: impl Into<CompetitorId>) -> Self {
        Self {
            competitor: competitor.into(),
            grid_position: None,
            name: None,
            team: None,
        }
    }

    /// Builder method to set the grid position.
    #[must_use]
    pub fn with_grid_position(mut self, position: u32) -> Self {
        self.grid_position = Some(position);
        self
    }
}

/// A pit stop window.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PitStop {
    /// The competitor.
    pub competitor: CompetitorId,
    /// Pit entry.
    pub time_in: RaceTime,
    /// Pit exit.
    pub time_out: RaceTime,
}

impl PitStop {
    /// Creates a pit stop window.
    #[must_use]
    pub fn new(competitor: impl Into<CompetitorId>, time_in: RaceTime, time_out: RaceTime) -> Self {
        Self {
            competitor: competitor.into(),
            time_in,
            time_out,
        }
    }

    /// Returns true if `time` falls inside the window, bounds included.
    #[must_use]
    pub fn covers(&self, time: RaceTime) -> bool {
        self.time_in <= time && time <= self.time_out
    }
}

/// A recorded leaderboard position taking effect at a point in race time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Standing {
    /// When the standing takes effect.
    pub time: RaceTime,
    /// The competitor.
    pub competitor: CompetitorId,
    /// Rank, 1 is the leader.
    pub rank: u32,
}

impl Standing {
    /// Creates a standing entry.
    #[must_use]
    pub fn new(time: RaceTime, competitor: impl Into<CompetitorId>, rank: u32) -> Self {
        Self {
            time,
            competitor: competitor.into(),
            rank,
        }
    }
}

/// Ordered outline of the track for drawing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackMap {
    /// Outline points in drawing order.
    pub points: Vec<Position>,
}

impl TrackMap {
    /// Creates a track map from outline points.
    #[must_use]
    pub fn new(points: Vec<Position>) -> Self {
        Self { points }
    }

    /// Returns true if the outline starts and ends on the same point.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first.distance(last) < 1e-9,
            _ => false,
        }
    }

    /// Returns the total outline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}
