//! racereel - Recorded race telemetry replay
//!
//! This crate re-exports all layers of the racereel system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: racereel_projector  — Frames at a fixed rate, leaderboards, playback
//! Layer 2: racereel_timeline   — Sorting, gap repair, chronological merge
//! Layer 1: racereel_loader     — CSV tables to validated records and reports
//! Layer 0: racereel_foundation — Core types (RaceTime, Position, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use racereel::foundation::{Position, RaceRecord, RaceTime};
//! use racereel::projector::{FrameProjector, ProjectorConfig, RaceFeeds};
//! use racereel::timeline::TimelineBuilder;
//!
//! let at = |s| RaceTime::from_secs(s).unwrap();
//! let timeline = TimelineBuilder::default().build([
//!     RaceRecord::new("Hamilton", at(0.0)).with_position(Position::scalar(0.0)),
//!     RaceRecord::new("Hamilton", at(10.0)).with_position(Position::scalar(10.0)),
//! ]);
//! let projector = FrameProjector::new(timeline, ProjectorConfig::new(), RaceFeeds::new()).unwrap();
//!
//! let frame = projector.frame_at(150).unwrap();
//! assert_eq!(frame.clock(), "00:05.000");
//! assert_eq!(frame.leaderboard()[0].competitor.as_str(), "Hamilton");
//! ```

pub use racereel_foundation as foundation;
pub use racereel_loader as loader;
pub use racereel_projector as projector;
pub use racereel_timeline as timeline;
