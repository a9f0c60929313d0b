//! Per-competitor corrected tracks.
//!
//! A [`Track`] answers "where was this competitor and what were they doing
//! at time t" for any t, including times outside its samples.

use im::Vector;
use racereel_foundation::{CompetitorId, PitStop, Position, RaceTime, Status};

use crate::config::Interpolation;
use crate::point::TimelinePoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much data a track was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackKind {
    /// Two or more samples; resampled by interpolation.
    Sampled,
    /// A single sample, shown as a static entry.
    InsufficientData,
    /// On the roster without records.
    NoRecords,
}

/// The state of a competitor at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackSample {
    /// Position, if known.
    pub position: Option<Position>,
    /// Lap number.
    pub lap: Option<u32>,
    /// Status.
    pub status: Status,
    /// Distance covered along the track.
    pub progress: Option<f64>,
    /// Derived from at least one synthesized point.
    pub synthesized: bool,
}

impl TrackSample {
    fn unknown(status: Status) -> Self {
        Self {
            position: None,
            lap: None,
            status,
            progress: None,
            synthesized: false,
        }
    }
}

/// One competitor's corrected, time-ordered points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    competitor: CompetitorId,
    kind: TrackKind,
    points: Vector<TimelinePoint>,
    pit_stops: Vector<PitStop>,
    interpolation: Interpolation,
}

impl Track {
    pub(crate) fn new(
        competitor: CompetitorId,
        kind: TrackKind,
        points: Vector<TimelinePoint>,
        pit_stops: Vector<PitStop>,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            competitor,
            kind,
            points,
            pit_stops,
            interpolation,
        }
    }

    /// Returns the competitor.
    #[must_use]
    pub fn competitor(&self) -> &CompetitorId {
        &self.competitor
    }

    /// Returns how much data the track was built from.
    #[must_use]
    pub const fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Returns the points in time order.
    #[must_use]
    pub fn points(&self) -> &Vector<TimelinePoint> {
        &self.points
    }

    /// Returns the pit stop windows applied to this track.
    #[must_use]
    pub fn pit_stops(&self) -> &Vector<PitStop> {
        &self.pit_stops
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the track has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first and last sample times.
    #[must_use]
    pub fn span(&self) -> Option<(RaceTime, RaceTime)> {
        Some((self.points.front()?.time, self.points.back()?.time))
    }

    /// Returns the number of synthesized points.
    #[must_use]
    pub fn synthesized_count(&self) -> usize {
        self.points.iter().filter(|p| p.synthesized).count()
    }

    /// Returns the status carried past the last sample, if it is terminal.
    #[must_use]
    pub fn terminal_status(&self) -> Option<Status> {
        self.points
            .back()
            .map(|p| p.status)
            .filter(|status| status.is_terminal())
    }

    /// Returns the competitor's status at `time`.
    ///
    /// Defined everywhere: before the first sample it is `Unknown`, after the
    /// last it is the terminal status or `Unknown`.
    #[must_use]
    pub fn status_at(&self, time: RaceTime) -> Status {
        self.sample_at(time).status
    }

    /// Resamples the track at `time`.
    #[must_use]
    pub fn sample_at(&self, time: RaceTime) -> TrackSample {
        match self.kind {
            TrackKind::NoRecords => TrackSample::unknown(Status::Unknown),
            TrackKind::InsufficientData => match self.points.front() {
                Some(point) => TrackSample {
                    position: point.position,
                    lap: point.lap,
                    status: Status::InsufficientData,
                    progress: point.progress,
                    synthesized: false,
                },
                None => TrackSample::unknown(Status::InsufficientData),
            },
            TrackKind::Sampled => self.sample_sampled(time),
        }
    }

    fn sample_sampled(&self, time: RaceTime) -> TrackSample {
        let Some((first, last)) = self.span() else {
            return TrackSample::unknown(Status::Unknown);
        };
        if time < first {
            return TrackSample::unknown(Status::Unknown);
        }
        if time > last {
            return TrackSample::unknown(self.terminal_status().unwrap_or(Status::Unknown));
        }

        let (before, after) = match self.points.binary_search_by(|p| p.time.cmp(&time)) {
            Ok(i) => {
                let point = &self.points[i];
                return TrackSample {
                    position: point.position,
                    lap: point.lap,
                    status: self.pit_status(point.status, time),
                    progress: point.progress,
                    synthesized: point.synthesized,
                };
            }
            Err(i) => (&self.points[i - 1], &self.points[i]),
        };

        let span = after.time.since(before.time);
        let fraction = if span > 0.0 {
            time.since(before.time) / span
        } else {
            0.0
        };
        let position = match (&before.position, &after.position) {
            (Some(a), Some(b)) => Some(self.interpolation.interpolate(a, b, fraction)),
            _ => None,
        };
        let progress = match (before.progress, after.progress) {
            (Some(a), Some(b)) => Some(a + (b - a) * fraction),
            _ => None,
        };
        let status = if position.is_none() && before.status == Status::Active {
            Status::Unknown
        } else {
            before.status
        };

        TrackSample {
            position,
            lap: before.lap,
            status: self.pit_status(status, time),
            progress,
            synthesized: before.synthesized || after.synthesized,
        }
    }

    fn pit_status(&self, status: Status, time: RaceTime) -> Status {
        if status == Status::Active && self.pit_stops.iter().any(|stop| stop.covers(time)) {
            Status::InPit
        } else {
            status
        }
    }
}
