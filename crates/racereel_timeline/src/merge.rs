//! Chronological k-way merge of tracks.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use im::Vector;
use racereel_foundation::{CompetitorId, RaceTime};

use crate::point::TimelinePoint;
use crate::track::Track;

/// Merges time-ordered tracks into one time-ordered sequence.
///
/// Equal times across competitors come out in competitor id order. Points
/// of one competitor keep their track order.
pub(crate) fn merge_tracks(tracks: &[Track]) -> Vector<TimelinePoint> {
    let mut heap: BinaryHeap<Reverse<(RaceTime, CompetitorId, usize, usize)>> = tracks
        .iter()
        .enumerate()
        .filter_map(|(t, track)| {
            let first = track.points().front()?;
            Some(Reverse((first.time, track.competitor().clone(), t, 0)))
        })
        .collect();

    let mut merged = Vector::new();
    while let Some(Reverse((_, competitor, t, i))) = heap.pop() {
        let points = tracks[t].points();
        merged.push_back(points[i].clone());
        if let Some(next) = points.get(i + 1) {
            heap.push(Reverse((next.time, competitor, t, i + 1)));
        }
    }
    merged
}
