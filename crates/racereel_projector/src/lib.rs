//! Frame projection for racereel.
//!
//! This crate provides:
//! - [`FrameProjector`] - A lazy, restartable sequence of frames at a fixed rate
//! - [`Frame`] and [`CompetitorSnapshot`] - Per-frame state and leaderboard
//! - [`RankingKey`] - Distance, rank, recorded standings, or custom ordering
//! - [`ReplayWindow`] - Full race, explicit range, or flag to flag
//! - [`Playback`] - A caller-owned cursor over the frames

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod frame;
pub mod playback;
pub mod projector;
pub mod ranking;

pub use config::{DEFAULT_FPS, ProjectorConfig, ReplayWindow};
pub use frame::{CompetitorSnapshot, Frame, LeaderboardEntry};
pub use playback::{EndBehavior, Playback};
pub use projector::{FrameProjector, Frames, RaceFeeds};
pub use ranking::{Comparator, RankingKey, StandingsBoard};
