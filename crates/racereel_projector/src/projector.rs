//! Fixed-rate frame projection.
//!
//! A [`FrameProjector`] resamples a [`Timeline`] at a fixed frame rate.
//! Frames are produced on demand, so a projector over a long race costs the
//! same to build as one over a short race; only message attachment is done
//! up front.

use std::collections::BTreeMap;
use std::iter::FusedIterator;
use std::sync::Arc;

use log::{debug, info, warn};
use racereel_foundation::{ConfigIssue, Error, Message, RaceTime, Result, Standing};
use racereel_timeline::{TimeSpan, Timeline};

use crate::config::ProjectorConfig;
use crate::frame::{CompetitorSnapshot, Frame};
use crate::ranking::{RankingKey, StandingsBoard};

/// Slack when deciding whether the last frame still fits in the window.
const FRAME_EPSILON: f64 = 1e-9;

/// Messages and standings recorded alongside the telemetry.
#[derive(Clone, Debug, Default)]
pub struct RaceFeeds {
    /// Race control messages.
    pub messages: Vec<Message>,
    /// Recorded standings.
    pub standings: Vec<Standing>,
}

impl RaceFeeds {
    /// Creates empty feeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the messages.
    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages = messages.into_iter().collect();
        self
    }

    /// Builder method to set the standings.
    #[must_use]
    pub fn with_standings(mut self, standings: impl IntoIterator<Item = Standing>) -> Self {
        self.standings = standings.into_iter().collect();
        self
    }
}

/// Produces frames from a timeline at a fixed rate.
///
/// Cheap to clone; the timeline and attached messages are shared.
#[derive(Clone, Debug)]
pub struct FrameProjector {
    timeline: Arc<Timeline>,
    fps: f64,
    window: Option<TimeSpan>,
    len: usize,
    ranking: RankingKey,
    standings: Arc<StandingsBoard>,
    attached: Arc<BTreeMap<usize, Vec<Message>>>,
    unattached: Arc<Vec<Message>>,
}

impl FrameProjector {
    /// Creates a projector.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the frame rate is not positive and
    /// finite, the replay window is reversed, the `standings` ranking key is
    /// chosen without standings, or the window holds more frames than can be
    /// indexed.
    pub fn new(
        timeline: impl Into<Arc<Timeline>>,
        config: ProjectorConfig,
        feeds: RaceFeeds,
    ) -> Result<Self> {
        config.validate()?;
        if matches!(config.ranking, RankingKey::Standings) && feeds.standings.is_empty() {
            return Err(Error::configuration(ConfigIssue::MissingStandings));
        }

        let timeline = timeline.into();
        let mut messages = feeds.messages;
        messages.sort_by_key(Message::time);

        let window = config.window.resolve(timeline.span(), &messages)?;
        let len = match window {
            Some(w) => frame_count(w, config.fps)?,
            None => 0,
        };

        let mut attached: BTreeMap<usize, Vec<Message>> = BTreeMap::new();
        let mut unattached = Vec::new();
        for message in messages {
            let time = message.time();
            match window.and_then(|w| nearest_frame(w.start, config.fps, len, time)) {
                Some(index) => attached.entry(index).or_default().push(message),
                None => {
                    debug!("message outside replay window: {message}");
                    unattached.push(message);
                }
            }
        }

        if !unattached.is_empty() {
            warn!("{} message(s) fall outside the replay window", unattached.len());
        }
        info!(
            "projector ready: {len} frames at {} fps, ranking by {}, {} message(s) attached",
            config.fps,
            config.ranking.name(),
            attached.values().map(Vec::len).sum::<usize>()
        );

        Ok(Self {
            timeline,
            fps: config.fps,
            window,
            len,
            ranking: config.ranking,
            standings: Arc::new(StandingsBoard::new(feeds.standings)),
            attached: Arc::new(attached),
            unattached: Arc::new(unattached),
        })
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the frame rate.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Returns the race time between frames, `1 / fps`.
    #[must_use]
    pub fn interval(&self) -> f64 {
        1.0 / self.fps
    }

    /// Returns the resolved replay window.
    #[must_use]
    pub fn window(&self) -> Option<TimeSpan> {
        self.window
    }

    /// Returns the timeline.
    #[must_use]
    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Returns the ranking key.
    #[must_use]
    pub fn ranking(&self) -> &RankingKey {
        &self.ranking
    }

    /// Returns the messages that fell outside the replay window.
    #[must_use]
    pub fn unattached(&self) -> &[Message] {
        &self.unattached
    }

    /// Returns the race time of frame `index`.
    #[must_use]
    pub fn time_of(&self, index: usize) -> Option<RaceTime> {
        if index >= self.len {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f64 / self.fps;
        self.window.and_then(|w| w.start.offset_by(offset))
    }

    /// Returns the frame nearest to `time`, clamped to the frame range.
    #[must_use]
    pub fn index_at(&self, time: RaceTime) -> Option<usize> {
        let window = self.window?;
        if self.len == 0 {
            return None;
        }
        let x = time.since(window.start) * self.fps;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (x - 0.5).ceil().max(0.0) as usize;
        Some(index.min(self.len - 1))
    }

    /// Builds frame `index`.
    #[must_use]
    pub fn frame_at(&self, index: usize) -> Option<Frame> {
        let time = self.time_of(index)?;
        let mut snapshots: Vec<CompetitorSnapshot> = self
            .timeline
            .tracks()
            .iter()
            .map(|track| {
                CompetitorSnapshot::from_sample(track.competitor().clone(), track.sample_at(time))
            })
            .collect();
        self.ranking.assign(&mut snapshots, time, &self.standings);

        Some(Frame {
            index,
            time,
            snapshots,
            messages: self.attached.get(&index).cloned().unwrap_or_default(),
        })
    }

    /// Returns the latest message attached at or before frame `index`, the
    /// one a banner would still be showing.
    #[must_use]
    pub fn latest_message_at(&self, index: usize) -> Option<&Message> {
        self.attached
            .range(..=index)
            .next_back()
            .and_then(|(_, messages)| messages.last())
    }

    /// Returns the frames in order. Each call starts from the first frame.
    #[must_use]
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            projector: self,
            next: 0,
            end: self.len,
        }
    }
}

impl<'a> IntoIterator for &'a FrameProjector {
    type Item = Frame;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames()
    }
}

/// Lazy iterator over a projector's frames.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    projector: &'a FrameProjector,
    next: usize,
    end: usize,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.projector.frame_at(self.next);
        self.next += 1;
        frame
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Frame> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl DoubleEndedIterator for Frames<'_> {
    fn next_back(&mut self) -> Option<Frame> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        self.projector.frame_at(self.end)
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}

/// Number of frames `i` with `start + i / fps <= end`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn frame_count(window: TimeSpan, fps: f64) -> Result<usize> {
    let duration = window.duration();
    let last = (duration * fps + FRAME_EPSILON).floor();
    if !last.is_finite() || last >= usize::MAX as f64 {
        return Err(Error::configuration(ConfigIssue::TooManyFrames { fps, duration }));
    }
    Ok(last as usize + 1)
}

/// Nearest frame to `time`, ties toward the earlier frame, or `None` when
/// more than half an interval outside the frame range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn nearest_frame(start: RaceTime, fps: f64, len: usize, time: RaceTime) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let x = time.since(start) * fps;
    let index = (x - 0.5).ceil().clamp(0.0, (len - 1) as f64);
    ((x - index).abs() <= 0.5 + FRAME_EPSILON).then_some(index as usize)
}
