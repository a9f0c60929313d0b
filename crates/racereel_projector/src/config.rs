//! Projector configuration and replay windows.

use racereel_foundation::{ConfigIssue, Error, Message, RaceProfile, RaceTime, Result};
use racereel_timeline::TimeSpan;

use crate::ranking::RankingKey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default frame rate.
pub const DEFAULT_FPS: f64 = 30.0;

/// The part of the race to replay.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReplayWindow {
    /// The whole timeline span.
    #[default]
    Full,
    /// An explicit race-time range.
    Between(RaceTime, RaceTime),
    /// From the first green flag message to the last end message. Either
    /// bound falls back to the timeline span when no such message exists.
    FlagToFlag,
}

impl ReplayWindow {
    /// Resolves the window against a timeline span and its messages.
    ///
    /// Returns `None` when there is nothing to replay (an empty timeline
    /// with a window that depends on it).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window ends before it starts.
    pub fn resolve(&self, span: Option<TimeSpan>, messages: &[Message]) -> Result<Option<TimeSpan>> {
        let (start, end) = match *self {
            Self::Full => return Ok(span),
            Self::Between(start, end) => (start, end),
            Self::FlagToFlag => {
                let start = messages
                    .iter()
                    .filter(|m| m.is_start())
                    .map(Message::time)
                    .min()
                    .or(span.map(|s| s.start));
                let end = messages
                    .iter()
                    .filter(|m| m.is_end())
                    .map(Message::time)
                    .max()
                    .or(span.map(|s| s.end));
                match (start, end) {
                    (Some(start), Some(end)) => (start, end),
                    _ => return Ok(None),
                }
            }
        };
        TimeSpan::new(start, end).map(Some).ok_or_else(|| {
            Error::configuration(ConfigIssue::InvalidWindow {
                start: start.secs(),
                end: end.secs(),
            })
        })
    }
}

/// Configuration for [`FrameProjector`](crate::FrameProjector).
#[derive(Clone, Debug)]
pub struct ProjectorConfig {
    /// Frames per second of race time. Must be positive and finite.
    pub fps: f64,
    /// Leaderboard ranking rule.
    pub ranking: RankingKey,
    /// Part of the race to replay.
    pub window: ReplayWindow,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            ranking: RankingKey::Distance,
            window: ReplayWindow::Full,
        }
    }
}

impl ProjectorConfig {
    /// Creates the default configuration: 30 fps, distance ranking, full
    /// window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration using a race profile's ranking key.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile names an unknown key.
    pub fn for_profile(profile: &RaceProfile) -> Result<Self> {
        Ok(Self::default().with_ranking(RankingKey::from_name(&profile.ranking_key)?))
    }

    /// Builder method to set the frame rate.
    #[must_use]
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Builder method to set the ranking key.
    #[must_use]
    pub fn with_ranking(mut self, ranking: RankingKey) -> Self {
        self.ranking = ranking;
        self
    }

    /// Builder method to set the replay window.
    #[must_use]
    pub fn with_window(mut self, window: ReplayWindow) -> Self {
        self.window = window;
        self
    }

    /// Checks the frame rate.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `fps` is not positive and finite.
    pub fn validate(&self) -> Result<()> {
        if self.fps.is_finite() && self.fps > 0.0 {
            Ok(())
        } else {
            Err(Error::configuration(ConfigIssue::InvalidFrameRate(self.fps)))
        }
    }
}
