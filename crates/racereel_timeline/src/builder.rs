//! Timeline construction.
//!
//! Building runs in a fixed order per competitor:
//!
//! 1. group records and sort them by race time, dropping duplicate times
//! 2. repair missing positions bounded by known ones
//! 3. detect gaps and fill them with synthesized points
//! 4. accumulate progress along the track
//!
//! and then across competitors: note unknown edge spans against the global
//! span, and merge all tracks chronologically.

use std::collections::HashMap;

use im::Vector;
use log::{debug, info};
use racereel_foundation::{
    CompetitorId, GridSlot, PitStop, RaceRecord, RaceTime, Result, Status,
};

use crate::config::{BuilderConfig, MAX_SYNTHESIZED_PER_GAP};
use crate::merge::merge_tracks;
use crate::point::TimelinePoint;
use crate::quality::{QualityNote, QualityReport};
use crate::timeline::{TimeSpan, Timeline};
use crate::track::{Track, TrackKind};

/// Builds a [`Timeline`] from loaded records.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    config: BuilderConfig,
    roster: Vec<CompetitorId>,
    pit_stops: Vec<PitStop>,
}

impl TimelineBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid.
    pub fn new(config: BuilderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            roster: Vec::new(),
            pit_stops: Vec::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builder method to set the roster from a starting grid, in grid order.
    #[must_use]
    pub fn with_grid<'a>(mut self, grid: impl IntoIterator<Item = &'a GridSlot>) -> Self {
        self.roster = grid.into_iter().map(|slot| slot.competitor.clone()).collect();
        self
    }

    /// Builder method to set the roster directly.
    #[must_use]
    pub fn with_roster<I, C>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CompetitorId>,
    {
        self.roster = roster.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set pit stop windows.
    #[must_use]
    pub fn with_pit_stops(mut self, pit_stops: impl IntoIterator<Item = PitStop>) -> Self {
        self.pit_stops = pit_stops.into_iter().collect();
        self
    }

    /// Builds the timeline.
    ///
    /// Never fails: every data problem becomes a [`QualityNote`].
    #[must_use]
    pub fn build(&self, records: impl IntoIterator<Item = RaceRecord>) -> Timeline {
        let mut quality = QualityReport::default();

        let mut groups: HashMap<CompetitorId, Vec<RaceRecord>> = HashMap::new();
        for record in records {
            groups
                .entry(record.competitor().clone())
                .or_default()
                .push(record);
        }

        let tracks: Vec<Track> = self
            .roster_order(&groups)
            .into_iter()
            .map(|id| match groups.remove(&id) {
                Some(records) => self.build_track(id, records, &mut quality),
                None => {
                    quality.push(QualityNote::NoRecords {
                        competitor: id.clone(),
                    });
                    self.track(id, TrackKind::NoRecords, Vector::new())
                }
            })
            .collect();

        let span = global_span(&tracks);
        if let Some(span) = span {
            for track in &tracks {
                note_unknown_edges(track, span, &mut quality);
            }
        }

        let merged = merge_tracks(&tracks);
        let timeline = Timeline::new(tracks.into_iter().collect(), merged, span, quality);
        info!(
            "built timeline: {} competitors, {} points ({} synthesized), {} quality notes",
            timeline.roster_len(),
            timeline.len(),
            timeline.synthesized_count(),
            timeline.quality().notes.len()
        );
        timeline
    }

    /// Grid order first, then competitors only seen in records, by id.
    fn roster_order(&self, groups: &HashMap<CompetitorId, Vec<RaceRecord>>) -> Vec<CompetitorId> {
        let mut order: Vec<CompetitorId> = Vec::with_capacity(self.roster.len() + groups.len());
        for id in &self.roster {
            if !order.contains(id) {
                order.push(id.clone());
            }
        }
        let mut extra: Vec<CompetitorId> = groups
            .keys()
            .filter(|id| !order.contains(id))
            .cloned()
            .collect();
        extra.sort();
        order.extend(extra);
        order
    }

    fn track(&self, id: CompetitorId, kind: TrackKind, points: Vector<TimelinePoint>) -> Track {
        let pit_stops = self
            .pit_stops
            .iter()
            .filter(|stop| stop.competitor == id)
            .cloned()
            .collect();
        Track::new(id, kind, points, pit_stops, self.config.interpolation)
    }

    fn build_track(
        &self,
        id: CompetitorId,
        mut records: Vec<RaceRecord>,
        quality: &mut QualityReport,
    ) -> Track {
        records.sort_by_key(RaceRecord::time);

        let mut points: Vec<TimelinePoint> = Vec::with_capacity(records.len());
        for record in &records {
            if points.last().is_some_and(|last| last.time == record.time()) {
                debug!("{id}: dropping duplicate sample at {}", record.time());
                quality.push(QualityNote::DuplicateSample {
                    competitor: id.clone(),
                    time: record.time(),
                    line: record.line(),
                });
                continue;
            }
            let mut point = TimelinePoint::from_record(record);
            point.status = self.pit_status(&id, point.status, point.time);
            points.push(point);
        }

        if points.len() < 2 {
            quality.push(QualityNote::InsufficientData {
                competitor: id.clone(),
                samples: points.len(),
            });
            accumulate_progress(&mut points);
            return self.track(id, TrackKind::InsufficientData, points.into_iter().collect());
        }

        self.repair_positions(&id, &mut points, quality);
        let mut points = self.fill_gaps(&id, points, quality);
        accumulate_progress(&mut points);
        self.track(id, TrackKind::Sampled, points.into_iter().collect())
    }

    /// Interpolates positions bounded on both sides by placed points. Edge
    /// points keep no position and become `Unknown`.
    fn repair_positions(
        &self,
        id: &CompetitorId,
        points: &mut [TimelinePoint],
        quality: &mut QualityReport,
    ) {
        let placed: Vec<usize> = points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_placed().then_some(i))
            .collect();

        for i in 0..points.len() {
            if points[i].is_placed() {
                continue;
            }
            let next = placed.partition_point(|&p| p < i);
            let bounds = next
                .checked_sub(1)
                .map(|prev| placed[prev])
                .zip(placed.get(next).copied());
            match bounds {
                Some((before, after)) => {
                    let (a, b) = (&points[before], &points[after]);
                    let fraction = points[i].time.since(a.time) / b.time.since(a.time);
                    let position = match (&a.position, &b.position) {
                        (Some(from), Some(to)) => {
                            Some(self.config.interpolation.interpolate(from, to, fraction))
                        }
                        _ => None,
                    };
                    let point = &mut points[i];
                    point.position = position;
                    point.synthesized = true;
                    quality.push(QualityNote::RepairedPosition {
                        competitor: id.clone(),
                        time: point.time,
                    });
                }
                None => {
                    let point = &mut points[i];
                    if !point.status.is_terminal() {
                        point.status = Status::Unknown;
                    }
                }
            }
        }
    }

    /// Inserts evenly spaced synthesized points into every gap.
    fn fill_gaps(
        &self,
        id: &CompetitorId,
        points: Vec<TimelinePoint>,
        quality: &mut QualityReport,
    ) -> Vec<TimelinePoint> {
        let interval = self
            .config
            .sample_interval
            .or_else(|| median_spacing(&points));
        let Some(interval) = interval.filter(|i| *i > 0.0) else {
            return points;
        };
        let threshold = self.config.gap_tolerance * interval;

        let mut filled = Vec::with_capacity(points.len());
        let mut iter = points.into_iter().peekable();
        while let Some(point) = iter.next() {
            let Some(next) = iter.peek() else {
                filled.push(point);
                break;
            };
            let delta = next.time.since(point.time);
            if delta <= threshold {
                filled.push(point);
                continue;
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let wanted = ((delta / interval).ceil() as usize).saturating_sub(1);
            let count = wanted.clamp(1, MAX_SYNTHESIZED_PER_GAP);
            debug!(
                "{id}: gap of {delta:.3}s after {}, synthesizing {count} points",
                point.time
            );
            quality.push(QualityNote::GapDetected {
                competitor: id.clone(),
                from: point.time,
                to: next.time,
                synthesized: count,
            });

            #[allow(clippy::cast_precision_loss)]
            let step = delta / (count + 1) as f64;
            let synthesized: Vec<TimelinePoint> = (1..=count)
                .filter_map(|k| {
                    #[allow(clippy::cast_precision_loss)]
                    let offset = step * k as f64;
                    let time = point.time.offset_by(offset)?;
                    let position = match (&point.position, &next.position) {
                        (Some(a), Some(b)) => {
                            Some(self.config.interpolation.interpolate(a, b, offset / delta))
                        }
                        _ => None,
                    };
                    let status = if position.is_none() {
                        Status::Unknown
                    } else {
                        point.status
                    };
                    Some(TimelinePoint {
                        competitor: id.clone(),
                        time,
                        position,
                        lap: point.lap,
                        status: self.pit_status(id, status, time),
                        progress: None,
                        synthesized: true,
                    })
                })
                .collect();
            filled.push(point);
            filled.extend(synthesized);
        }
        filled
    }

    fn pit_status(&self, id: &CompetitorId, status: Status, time: RaceTime) -> Status {
        let pitted = self
            .pit_stops
            .iter()
            .any(|stop| stop.competitor == *id && stop.covers(time));
        if pitted && status == Status::Active {
            Status::InPit
        } else {
            status
        }
    }
}

/// Median spacing between consecutive points.
fn median_spacing(points: &[TimelinePoint]) -> Option<f64> {
    let mut spacings: Vec<f64> = points
        .windows(2)
        .map(|w| w[1].time.since(w[0].time))
        .collect();
    if spacings.is_empty() {
        return None;
    }
    spacings.sort_by(f64::total_cmp);
    let mid = spacings.len() / 2;
    if spacings.len() % 2 == 0 {
        Some((spacings[mid - 1] + spacings[mid]) / 2.0)
    } else {
        Some(spacings[mid])
    }
}

/// Fills in distance covered. Scalar positions are their own progress;
/// otherwise progress is the path length through placed points.
fn accumulate_progress(points: &mut [TimelinePoint]) {
    let mut travelled = 0.0;
    let mut previous = None;
    for point in points.iter_mut() {
        let Some(position) = point.position else {
            continue;
        };
        if position.dims() == 1 {
            point.progress = Some(position.x());
            continue;
        }
        if let Some(prev) = previous {
            travelled += position.distance(&prev);
        }
        point.progress = Some(travelled);
        previous = Some(position);
    }
}

fn global_span(tracks: &[Track]) -> Option<TimeSpan> {
    let start = tracks.iter().filter_map(|t| t.span().map(|s| s.0)).min()?;
    let end = tracks.iter().filter_map(|t| t.span().map(|s| s.1)).max()?;
    TimeSpan::new(start, end)
}

/// Notes the spans of the replay where a sampled competitor has no position.
fn note_unknown_edges(track: &Track, span: TimeSpan, quality: &mut QualityReport) {
    if track.kind() != TrackKind::Sampled {
        return;
    }
    let placed = || track.points().iter().filter(|p| p.is_placed());
    let competitor = track.competitor().clone();

    let (Some(first), Some(last)) = (placed().next(), placed().last()) else {
        quality.push(QualityNote::UnknownSpan {
            competitor,
            from: span.start,
            to: span.end,
        });
        return;
    };

    if span.start < first.time {
        quality.push(QualityNote::UnknownSpan {
            competitor: competitor.clone(),
            from: span.start,
            to: first.time,
        });
    }
    if last.time < span.end && track.terminal_status().is_none() {
        quality.push(QualityNote::UnknownSpan {
            competitor,
            from: last.time,
            to: span.end,
        });
    }
}
