//! Competitor status and the per-profile vocabulary that maps raw status
//! strings onto it.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a competitor at a point in race time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Racing on track.
    #[default]
    Active,
    /// In the pit lane.
    InPit,
    /// Out of the race.
    Retired,
    /// Crossed the finish.
    Finished,
    /// No data covers this point.
    Unknown,
    /// Fewer than two samples exist for this competitor.
    InsufficientData,
}

impl Status {
    /// Returns true for statuses that hold for the rest of the race.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Retired | Self::Finished)
    }

    /// Returns true if data backs this status.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InPit => "pit",
            Self::Retired => "retired",
            Self::Finished => "finished",
            Self::Unknown => "unknown",
            Self::InsufficientData => "insufficient-data",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps raw status strings from a data source onto [`Status`].
///
/// Lookup is case-insensitive and ignores surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusVocabulary {
    terms: HashMap<String, Status>,
}

impl StatusVocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }

    /// Builder method to add a term.
    #[must_use]
    pub fn with_term(mut self, term: &str, status: Status) -> Self {
        self.terms.insert(term.trim().to_lowercase(), status);
        self
    }

    /// Looks up a raw status string.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<Status> {
        self.terms.get(&raw.trim().to_lowercase()).copied()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no terms are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self::empty()
            .with_term("active", Status::Active)
            .with_term("racing", Status::Active)
            .with_term("running", Status::Active)
            .with_term("pit", Status::InPit)
            .with_term("inpit", Status::InPit)
            .with_term("in pit", Status::InPit)
            .with_term("retired", Status::Retired)
            .with_term("dnf", Status::Retired)
            .with_term("out", Status::Retired)
            .with_term("finished", Status::Finished)
            .with_term("chequered", Status::Finished)
            .with_term("unknown", Status::Unknown)
    }
}
