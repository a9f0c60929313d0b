//! CSV record loading and validation for racereel.
//!
//! This crate provides:
//! - [`RecordLoader`] - Telemetry tables into validated records
//! - [`SessionLoader`] - Messages, grid, pit stops, standings, track outline
//! - [`RaceSource`] - A whole race directory in one call
//! - [`LoadReport`] - What was loaded and what was excluded, by line
//! - [`SampleRace`] - Deterministic synthetic races for tests and demos

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod records;
pub mod report;
pub mod sample;
pub mod schema;
pub mod session;
pub mod source;
mod table;

pub use records::RecordLoader;
pub use report::{LoadReport, Loaded, ParsedRow, RowWarning, WarningKind};
pub use sample::{SampleConfig, SampleRace};
pub use schema::{
    ColumnSpec, GridSchema, MessageSchema, PitSchema, RecordSchema, StandingsSchema,
};
pub use session::SessionLoader;
pub use source::{
    EVENTS_FILE, GRID_FILE, PITS_FILE, RaceSource, STANDINGS_FILE, TELEMETRY_FILE, TRACK_FILE,
};
