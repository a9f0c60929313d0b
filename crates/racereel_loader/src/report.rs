//! Load results and reports.
//!
//! Rows are validated into a tagged [`ParsedRow`] rather than probed for
//! attributes at use sites. Excluded rows are never silently dropped: each
//! one is kept in the [`LoadReport`] with its line and reason.

use std::fmt;

use racereel_foundation::{MalformedRecord, RaceRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of validating one row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParsedRow<T = RaceRecord> {
    /// The row produced a value.
    Valid(T),
    /// The row was excluded.
    Malformed(MalformedRecord),
}

impl<T> ParsedRow<T> {
    /// Returns true for a valid row.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the value of a valid row.
    #[must_use]
    pub fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Malformed(_) => None,
        }
    }
}

/// A recoverable oddity in a row that was still loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowWarning {
    /// Source line.
    pub line: usize,
    /// What was odd.
    pub kind: WarningKind,
}

/// Kinds of row warnings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WarningKind {
    /// The status word is not in the profile vocabulary; loaded as unknown.
    UnrecognizedStatus(String),
    /// A boolean flag cell could not be read; loaded as false.
    UnreadableFlag {
        /// The column name.
        column: String,
        /// The raw cell text.
        value: String,
    },
    /// Only some position components were present; loaded without a position.
    PartialPosition,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnrecognizedStatus(raw) => {
                write!(f, "line {}: unrecognized status '{raw}'", self.line)
            }
            WarningKind::UnreadableFlag { column, value } => {
                write!(f, "line {}: unreadable flag '{value}' in column {column}", self.line)
            }
            WarningKind::PartialPosition => {
                write!(f, "line {}: incomplete position", self.line)
            }
        }
    }
}

/// Summary of one table load.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadReport {
    /// Source name (file path or stream label).
    pub source: String,
    /// Number of data rows read, header excluded.
    pub input_rows: usize,
    /// Rows excluded as malformed.
    pub excluded: Vec<MalformedRecord>,
    /// Rows loaded with a warning.
    pub warnings: Vec<RowWarning>,
}

impl LoadReport {
    /// Creates an empty report for a source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Returns the number of rows loaded.
    ///
    /// Always `input_rows - excluded_count()`.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.input_rows - self.excluded.len()
    }

    /// Returns the number of excluded rows.
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    /// Returns true if nothing was excluded or warned about.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.excluded.is_empty() && self.warnings.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows, {} loaded, {} excluded, {} warnings",
            self.source,
            self.input_rows,
            self.loaded(),
            self.excluded_count(),
            self.warnings.len()
        )?;
        for excluded in &self.excluded {
            write!(f, "\n  excluded {excluded}")?;
        }
        Ok(())
    }
}

/// Values loaded from one table together with the report.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Loaded<T> {
    /// Valid values in source order.
    pub items: Vec<T>,
    /// What happened while loading.
    pub report: LoadReport,
}

impl<T> Loaded<T> {
    /// Creates an empty result, used for optional sources that are absent.
    #[must_use]
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            report: LoadReport::new(source),
        }
    }

    /// Returns the number of loaded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
