//! Data quality notes gathered while building a timeline.
//!
//! None of these are fatal. They describe what the builder had to drop,
//! repair, or leave unknown so a caller can judge how much of the replay is
//! observed and how much is estimated.

use std::fmt;

use racereel_foundation::{CompetitorId, RaceTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One data quality observation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityNote {
    /// Spacing between two samples exceeded the gap threshold.
    GapDetected {
        /// The competitor.
        competitor: CompetitorId,
        /// Last sample before the gap.
        from: RaceTime,
        /// First sample after the gap.
        to: RaceTime,
        /// Points synthesized into the gap.
        synthesized: usize,
    },
    /// A second sample at an already seen time was dropped.
    DuplicateSample {
        /// The competitor.
        competitor: CompetitorId,
        /// The repeated time.
        time: RaceTime,
        /// Source line of the dropped record, when known.
        line: Option<usize>,
    },
    /// Fewer than two samples; the competitor is shown as a static entry.
    InsufficientData {
        /// The competitor.
        competitor: CompetitorId,
        /// Samples available.
        samples: usize,
    },
    /// A span of the replay where the competitor's position is unknown.
    UnknownSpan {
        /// The competitor.
        competitor: CompetitorId,
        /// Span start.
        from: RaceTime,
        /// Span end.
        to: RaceTime,
    },
    /// On the roster but without any record.
    NoRecords {
        /// The competitor.
        competitor: CompetitorId,
    },
    /// A record without position was given an interpolated one.
    RepairedPosition {
        /// The competitor.
        competitor: CompetitorId,
        /// Time of the repaired record.
        time: RaceTime,
    },
}

impl QualityNote {
    /// Returns the competitor the note is about.
    #[must_use]
    pub fn competitor(&self) -> &CompetitorId {
        match self {
            Self::GapDetected { competitor, .. }
            | Self::DuplicateSample { competitor, .. }
            | Self::InsufficientData { competitor, .. }
            | Self::UnknownSpan { competitor, .. }
            | Self::NoRecords { competitor }
            | Self::RepairedPosition { competitor, .. } => competitor,
        }
    }
}

impl fmt::Display for QualityNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GapDetected {
                competitor,
                from,
                to,
                synthesized,
            } => write!(
                f,
                "{competitor}: gap {} to {}, {synthesized} points synthesized",
                from.clock(),
                to.clock()
            ),
            Self::DuplicateSample {
                competitor, time, ..
            } => write!(f, "{competitor}: duplicate sample at {}", time.clock()),
            Self::InsufficientData {
                competitor,
                samples,
            } => write!(f, "{competitor}: only {samples} sample(s), shown static"),
            Self::UnknownSpan {
                competitor,
                from,
                to,
            } => write!(
                f,
                "{competitor}: unknown from {} to {}",
                from.clock(),
                to.clock()
            ),
            Self::NoRecords { competitor } => write!(f, "{competitor}: no records"),
            Self::RepairedPosition { competitor, time } => {
                write!(f, "{competitor}: position repaired at {}", time.clock())
            }
        }
    }
}

/// All quality notes for one timeline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityReport {
    /// Notes in the order they were raised.
    pub notes: Vec<QualityNote>,
}

impl QualityReport {
    /// Returns whether nothing was noted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the notes about one competitor.
    pub fn for_competitor<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a QualityNote> {
        self.notes
            .iter()
            .filter(move |note| note.competitor().as_str() == id)
    }

    /// Returns the detected gaps.
    pub fn gaps(&self) -> impl Iterator<Item = &QualityNote> {
        self.notes
            .iter()
            .filter(|note| matches!(note, QualityNote::GapDetected { .. }))
    }

    /// Returns the competitors flagged with insufficient data.
    pub fn insufficient(&self) -> impl Iterator<Item = &CompetitorId> {
        self.notes.iter().filter_map(|note| match note {
            QualityNote::InsufficientData { competitor, .. } => Some(competitor),
            _ => None,
        })
    }

    /// Returns the number of dropped duplicate samples.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| matches!(note, QualityNote::DuplicateSample { .. }))
            .count()
    }

    pub(crate) fn push(&mut self, note: QualityNote) {
        self.notes.push(note);
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.notes.is_empty() {
            return write!(f, "no data quality issues");
        }
        writeln!(f, "{} data quality note(s):", self.notes.len())?;
        for note in &self.notes {
            writeln!(f, "  {note}")?;
        }
        Ok(())
    }
}
