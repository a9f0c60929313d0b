//! Race control messages.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::RaceTime;

/// Broad category of a race control message, used by renderers to colour
/// the message banner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageKind {
    /// Green flag, track clear.
    Green,
    /// Yellow flag or virtual safety car.
    Yellow,
    /// Red flag or safety car.
    Red,
    /// Anything else.
    #[default]
    Other,
}

impl MessageKind {
    /// Classifies message text.
    ///
    /// Checks run in order: `GREEN`; then `YELLOW` or `VSC`; then `RED`,
    /// `SC` or `SAFETY CAR`. Matching is case-insensitive on substrings.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let upper = text.to_uppercase();
        if upper.contains("GREEN") {
            Self::Green
        } else if upper.contains("YELLOW") || upper.contains("VSC") {
            Self::Yellow
        } else if upper.contains("RED") || upper.contains("SC") || upper.contains("SAFETY CAR") {
            Self::Red
        } else {
            Self::Other
        }
    }
}

/// A race event announcement recorded at a race-time offset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    time: RaceTime,
    text: String,
    kind: MessageKind,
    lap: Option<u32>,
}

impl Message {
    /// Creates a message, classifying it from its text.
    #[must_use]
    pub fn new(time: RaceTime, text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = MessageKind::classify(&text);
        Self {
            time,
            text,
            kind,
            lap: None,
        }
    }

    /// Builder method to override the classification.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method to set the lap.
    #[must_use]
    pub fn with_lap(mut self, lap: u32) -> Self {
        self.lap = Some(lap);
        self
    }

    /// Returns the recorded time.
    #[must_use]
    pub const fn time(&self) -> RaceTime {
        self.time
    }

    /// Returns the message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the category.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the lap, if recorded.
    #[must_use]
    pub const fn lap(&self) -> Option<u32> {
        self.lap
    }

    /// Returns true for a race start message (contains `GREEN`).
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.text.to_uppercase().contains("GREEN")
    }

    /// Returns true for a race end message (contains `END`).
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.text.to_uppercase().contains("END")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time.clock(), self.text)
    }
}
