//! Core types, race profiles, and errors for racereel.
//!
//! This crate provides:
//! - [`RaceTime`] - Offsets on the race-time axis
//! - [`CompetitorId`] - Shared competitor identifiers
//! - [`Position`] - 1 to 3 dimensional positions
//! - [`Status`] and [`StatusVocabulary`] - Competitor state
//! - [`RaceRecord`] and [`Message`] - Loaded observations
//! - [`RaceProfile`] - Per race type configuration
//! - [`GridSlot`], [`PitStop`], [`Standing`], [`TrackMap`] - Session data
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod competitor;
pub mod error;
pub mod message;
pub mod position;
pub mod profile;
pub mod record;
pub mod session;
pub mod status;
pub mod time;

pub use competitor::CompetitorId;
pub use error::{
    ConfigIssue, Error, ErrorContext, ErrorKind, MalformedReason, MalformedRecord, Result,
};
pub use message::{Message, MessageKind};
pub use position::{MAX_DIMENSIONS, Position};
pub use profile::{RaceKind, RaceProfile};
pub use record::RaceRecord;
pub use session::{GridSlot, PitStop, Standing, TrackMap};
pub use status::{Status, StatusVocabulary};
pub use time::RaceTime;
