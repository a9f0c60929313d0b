//! The built timeline.

use std::fmt;

use im::{HashMap, Vector};
use racereel_foundation::{CompetitorId, RaceTime, Status};

use crate::point::TimelinePoint;
use crate::quality::QualityReport;
use crate::track::{Track, TrackSample};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed interval on the race-time axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSpan {
    /// First instant.
    pub start: RaceTime,
    /// Last instant.
    pub end: RaceTime,
}

impl TimeSpan {
    /// Creates a span, or `None` if `end` precedes `start`.
    #[must_use]
    pub fn new(start: RaceTime, end: RaceTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Returns the length in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end.since(self.start)
    }

    /// Returns whether `time` lies within the span.
    #[must_use]
    pub fn contains(&self, time: RaceTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start.clock(), self.end.clock())
    }
}

/// Corrected per-competitor tracks and their chronological merge.
///
/// Immutable once built. Cloning shares the underlying tracks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timeline {
    tracks: Vector<Track>,
    index: HashMap<CompetitorId, usize>,
    merged: Vector<TimelinePoint>,
    span: Option<TimeSpan>,
    quality: QualityReport,
}

impl Timeline {
    pub(crate) fn new(
        tracks: Vector<Track>,
        merged: Vector<TimelinePoint>,
        span: Option<TimeSpan>,
        quality: QualityReport,
    ) -> Self {
        let index = tracks
            .iter()
            .enumerate()
            .map(|(i, track)| (track.competitor().clone(), i))
            .collect();
        Self {
            tracks,
            index,
            merged,
            span,
            quality,
        }
    }

    /// Returns the first and last sample time across all competitors, or
    /// `None` for an empty timeline.
    #[must_use]
    pub fn span(&self) -> Option<TimeSpan> {
        self.span
    }

    /// Returns the roster in display order: grid order first, then the
    /// remaining competitors by id.
    pub fn roster(&self) -> impl Iterator<Item = &CompetitorId> {
        self.tracks.iter().map(Track::competitor)
    }

    /// Returns the number of competitors on the roster.
    #[must_use]
    pub fn roster_len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns the tracks in roster order.
    #[must_use]
    pub fn tracks(&self) -> &Vector<Track> {
        &self.tracks
    }

    /// Returns one competitor's track.
    #[must_use]
    pub fn track(&self, competitor: &str) -> Option<&Track> {
        self.index.get(competitor).map(|&i| &self.tracks[i])
    }

    /// Returns every point of every competitor in race-time order.
    #[must_use]
    pub fn merged(&self) -> &Vector<TimelinePoint> {
        &self.merged
    }

    /// Returns the total number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Returns whether the timeline has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// Returns the number of synthesized points.
    #[must_use]
    pub fn synthesized_count(&self) -> usize {
        self.merged.iter().filter(|p| p.synthesized).count()
    }

    /// Returns the data quality notes raised while building.
    #[must_use]
    pub fn quality(&self) -> &QualityReport {
        &self.quality
    }

    /// Returns a competitor's status at `time`, or `None` if the competitor
    /// is not on the roster.
    #[must_use]
    pub fn status_at(&self, competitor: &str, time: RaceTime) -> Option<Status> {
        self.track(competitor).map(|track| track.status_at(time))
    }

    /// Returns every roster competitor's status at `time`, in roster order.
    #[must_use]
    pub fn statuses_at(&self, time: RaceTime) -> Vec<(CompetitorId, Status)> {
        self.tracks
            .iter()
            .map(|track| (track.competitor().clone(), track.status_at(time)))
            .collect()
    }

    /// Resamples one competitor at `time`.
    #[must_use]
    pub fn sample_at(&self, competitor: &str, time: RaceTime) -> Option<TrackSample> {
        self.track(competitor).map(|track| track.sample_at(time))
    }
}
