//! Integration tests for Layer 3: Projector
//!
//! Tests for frame projection, per-frame ranking, message attachment, and
//! playback cursors.

mod frames;
mod messages;
mod playback;
mod ranking;

use racereel_foundation::{Position, RaceRecord, RaceTime};
use racereel_timeline::{Timeline, TimelineBuilder};

pub fn secs(s: f64) -> RaceTime {
    RaceTime::from_secs(s).unwrap()
}

/// Builds a timeline from `(competitor, time, scalar position)` triples.
pub fn timeline(samples: &[(&str, f64, f64)]) -> Timeline {
    let records = samples
        .iter()
        .map(|&(id, t, x)| RaceRecord::new(id, secs(t)).with_position(Position::scalar(x)));
    TimelineBuilder::default().build(records)
}
