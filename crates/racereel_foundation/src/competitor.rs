//! Competitor identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of one competitor (driver, pilot, rider).
///
/// Cheap to clone: the name is shared behind an `Arc`. Ordering is lexical
/// on the name, which is the tie-break used wherever two competitors share a
/// race-time offset.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompetitorId(Arc<str>);

impl CompetitorId {
    /// Creates a new competitor ID.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the competitor name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompetitorId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CompetitorId {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl Borrow<str> for CompetitorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CompetitorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompetitorId({})", self.0)
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
