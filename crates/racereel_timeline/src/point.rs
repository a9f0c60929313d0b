//! Timeline points.

use racereel_foundation::{CompetitorId, Position, RaceRecord, RaceTime, Status};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One point on a competitor's corrected track.
///
/// Points come either from a loaded record or from repair, in which case
/// `synthesized` is set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimelinePoint {
    /// The competitor.
    pub competitor: CompetitorId,
    /// Race-time offset.
    pub time: RaceTime,
    /// Position, `None` when it could not be recorded or repaired.
    pub position: Option<Position>,
    /// Lap number.
    pub lap: Option<u32>,
    /// Status at this point.
    pub status: Status,
    /// Distance covered along the track up to this point. For scalar
    /// positions this is the position itself.
    pub progress: Option<f64>,
    /// Produced by interpolation rather than observed.
    pub synthesized: bool,
}

impl TimelinePoint {
    /// Creates an observed point from a record.
    #[must_use]
    pub fn from_record(record: &RaceRecord) -> Self {
        Self {
            competitor: record.competitor().clone(),
            time: record.time(),
            position: record.position(),
            lap: record.lap(),
            status: record.effective_status(),
            progress: None,
            synthesized: false,
        }
    }

    /// Returns whether the point has a position.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}
