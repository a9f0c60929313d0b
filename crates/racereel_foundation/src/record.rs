//! Raw race observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::competitor::CompetitorId;
use crate::position::Position;
use crate::status::Status;
use crate::time::RaceTime;

/// One observation of one competitor.
///
/// Created by the loader and immutable afterwards. The position may be
/// absent; the timeline builder repairs it from neighbouring samples.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RaceRecord {
    competitor: CompetitorId,
    time: RaceTime,
    position: Option<Position>,
    lap: Option<u32>,
    status: Status,
    in_pit: bool,
    line: Option<usize>,
}

impl RaceRecord {
    /// Creates an active record with no position.
    #[must_use]
    pub fn new(competitor: impl Into<CompetitorId>, time: RaceTime) -> Self {
        Self {
            competitor: competitor.into(),
            time,
            position: None,
            lap: None,
            status: Status::Active,
            in_pit: false,
            line: None,
        }
    }

    /// Builder method to set the position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Builder method to set the lap.
    #[must_use]
    pub fn with_lap(mut self, lap: u32) -> Self {
        self.lap = Some(lap);
        self
    }

    /// Builder method to set the status.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the pit flag.
    #[must_use]
    pub fn with_in_pit(mut self, in_pit: bool) -> Self {
        self.in_pit = in_pit;
        self
    }

    /// Builder method to record the source line (1-indexed, header is line 1).
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Returns the competitor.
    #[must_use]
    pub fn competitor(&self) -> &CompetitorId {
        &self.competitor
    }

    /// Returns the race-time offset.
    #[must_use]
    pub const fn time(&self) -> RaceTime {
        self.time
    }

    /// Returns the position, if recorded.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the lap, if recorded.
    #[must_use]
    pub const fn lap(&self) -> Option<u32> {
        self.lap
    }

    /// Returns the recorded status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns true if the source flagged the competitor in the pit lane.
    #[must_use]
    pub const fn in_pit(&self) -> bool {
        self.in_pit
    }

    /// Returns the source line, if known.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Returns the status after applying the pit flag.
    ///
    /// The pit flag only overrides an active status; a terminal or unknown
    /// status wins.
    #[must_use]
    pub const fn effective_status(&self) -> Status {
        match self.status {
            Status::Active if self.in_pit => Status::InPit,
            other => other,
        }
    }
}
