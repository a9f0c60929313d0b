//! Timeline construction for racereel.
//!
//! Turns irregular, possibly incomplete records into strictly ordered,
//! gap-filled per-competitor tracks plus their chronological merge.
//!
//! This crate provides:
//! - [`TimelineBuilder`] and [`BuilderConfig`] - Sorting, repair, gap filling
//! - [`Timeline`] - Tracks, merged points, and status lookup at any time
//! - [`Track`] - One competitor, resampled on demand
//! - [`QualityReport`] - Non-fatal data quality notes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod config;
mod merge;
pub mod point;
pub mod quality;
pub mod timeline;
pub mod track;

pub use builder::TimelineBuilder;
pub use config::{BuilderConfig, DEFAULT_GAP_TOLERANCE, Interpolation, MAX_SYNTHESIZED_PER_GAP};
pub use point::TimelinePoint;
pub use quality::{QualityNote, QualityReport};
pub use timeline::{TimeSpan, Timeline};
pub use track::{Track, TrackKind, TrackSample};
