//! Error types for racereel.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Per-record defects are recovered where they occur and reported in bulk;
//! they only surface as an [`Error`] when a caller asks for strict loading.
//! Configuration defects are always fatal and are raised before any frame is
//! produced.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main error type for racereel operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a malformed record error.
    #[must_use]
    pub fn malformed(record: MalformedRecord) -> Self {
        Self::new(ErrorKind::MalformedRecord(record))
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingColumn(column.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(issue: ConfigIssue) -> Self {
        Self::new(ErrorKind::Configuration(issue))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a CSV decoding error.
    #[must_use]
    pub fn csv(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Csv(message.into()))
    }

    /// Returns true for configuration errors.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }
}

/// Result type alias for racereel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A record is missing a required field or carries an unparseable one.
    #[error("malformed record: {0}")]
    MalformedRecord(MalformedRecord),

    /// A required column is absent from the header row.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Invalid replay configuration.
    #[error("configuration error: {0}")]
    Configuration(ConfigIssue),

    /// Reading the data source failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The CSV reader rejected the input.
    #[error("csv error: {0}")]
    Csv(String),
}

/// A record excluded by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MalformedRecord {
    /// Source line (1-indexed, the header is line 1).
    pub line: usize,
    /// What was wrong with it.
    pub reason: MalformedReason,
}

impl MalformedRecord {
    /// Creates a new malformed record entry.
    #[must_use]
    pub const fn new(line: usize, reason: MalformedReason) -> Self {
        Self { line, reason }
    }
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Why a record was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MalformedReason {
    /// The competitor identifier is empty or absent.
    MissingCompetitor,
    /// The race-time offset is empty or absent.
    MissingTimestamp,
    /// The race-time offset could not be parsed.
    InvalidTimestamp(String),
    /// Another required field is empty or absent.
    MissingField(String),
    /// A numeric field is present but not a finite number.
    InvalidNumber {
        /// The column name.
        column: String,
        /// The raw cell text.
        value: String,
    },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCompetitor => write!(f, "missing competitor id"),
            Self::MissingTimestamp => write!(f, "missing timestamp"),
            Self::InvalidTimestamp(raw) => write!(f, "invalid timestamp '{raw}'"),
            Self::MissingField(column) => write!(f, "missing {column}"),
            Self::InvalidNumber { column, value } => {
                write!(f, "invalid number '{value}' in column {column}")
            }
        }
    }
}

/// Configuration problems detected before a replay starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// Frame rate is zero, negative, or not finite.
    InvalidFrameRate(f64),
    /// No ranking key is registered under this name.
    UnknownRankingKey(String),
    /// The standings ranking key was selected without standings data.
    MissingStandings,
    /// Gap tolerance must be at least 1.
    InvalidGapTolerance(f64),
    /// A configured sample interval must be positive and finite.
    InvalidSampleInterval(f64),
    /// Position dimensionality outside 1 to 3.
    InvalidDimensions(usize),
    /// Replay window ends before it starts.
    InvalidWindow {
        /// Window start in seconds.
        start: f64,
        /// Window end in seconds.
        end: f64,
    },
    /// The frame rate and window length give a frame count that cannot be
    /// indexed.
    TooManyFrames {
        /// Frame rate in frames per second.
        fps: f64,
        /// Window length in seconds.
        duration: f64,
    },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrameRate(fps) => write!(f, "frame rate must be positive, got {fps}"),
            Self::UnknownRankingKey(name) => write!(f, "unknown ranking key '{name}'"),
            Self::MissingStandings => {
                write!(f, "ranking key 'standings' requires recorded standings")
            }
            Self::InvalidGapTolerance(t) => write!(f, "gap tolerance must be >= 1, got {t}"),
            Self::InvalidSampleInterval(s) => {
                write!(f, "sample interval must be positive, got {s}")
            }
            Self::InvalidDimensions(d) => write!(f, "position dimensions must be 1 to 3, got {d}"),
            Self::InvalidWindow { start, end } => {
                write!(f, "replay window ends ({end}) before it starts ({start})")
            }
            Self::TooManyFrames { fps, duration } => {
                write!(f, "{fps} fps over a {duration}s window yields too many frames")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or stream name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
