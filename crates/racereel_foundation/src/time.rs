//! Race-time offsets.
//!
//! Race time is the elapsed duration since race start and is the primary
//! ordering axis for every record, message, and frame. It is distinct from
//! wall-clock animation time.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An offset on the race-time axis, in seconds.
///
/// Always finite. Ordering is total, so `RaceTime` can be used as a sort key
/// and in ordered collections.
#[derive(Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RaceTime(f64);

impl RaceTime {
    /// The race start.
    pub const ZERO: Self = Self(0.0);

    /// Creates a race time from seconds.
    ///
    /// Returns `None` for NaN or infinite input.
    #[must_use]
    pub fn from_secs(secs: f64) -> Option<Self> {
        // Adding zero folds -0.0 into 0.0 so equal offsets hash alike.
        secs.is_finite().then_some(Self(secs + 0.0))
    }

    /// Creates a race time from milliseconds.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(millis as f64 / 1000.0)
    }

    /// Returns the offset in seconds.
    #[must_use]
    pub const fn secs(self) -> f64 {
        self.0
    }

    /// Returns this time shifted by `secs` seconds, or `None` if the result
    /// is not finite.
    #[must_use]
    pub fn offset_by(self, secs: f64) -> Option<Self> {
        Self::from_secs(self.0 + secs)
    }

    /// Returns the signed number of seconds from `earlier` to `self`.
    #[must_use]
    pub fn since(self, earlier: Self) -> f64 {
        self.0 - earlier.0
    }

    /// Parses a race time from a table cell.
    ///
    /// Accepts plain seconds (`12.5`), `MM:SS(.fff)`, `HH:MM:SS(.fff)` and
    /// the `N days HH:MM:SS(.ffffff)` timedelta notation.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(secs) = text.parse::<f64>() {
            return Self::from_secs(secs);
        }

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };

        let (days, clock) = match body.split_once("day") {
            Some((days, rest)) => {
                let days: f64 = days.trim().parse().ok()?;
                let rest = rest.strip_prefix('s').unwrap_or(rest);
                (days, rest.trim())
            }
            None => (0.0, body),
        };

        let mut secs = days * 86_400.0 + parse_clock(clock)?;
        if negative {
            secs = -secs;
        }
        Self::from_secs(secs)
    }

    /// Formats the time as a race clock label, `MM:SS.mmm`.
    ///
    /// Minutes are not wrapped into hours; a two hour race reads `120:00.000`.
    #[must_use]
    pub fn clock(self) -> String {
        let millis = (self.0.abs() * 1000.0).round();
        let sign = if self.0 < 0.0 && millis > 0.0 { "-" } else { "" };
        let minutes = (millis / 60_000.0).floor();
        let seconds = (millis - minutes * 60_000.0) / 1000.0;
        format!("{sign}{minutes:02}:{seconds:06.3}")
    }
}

/// Parses `SS`, `MM:SS` or `HH:MM:SS`, each with an optional fraction on the
/// seconds field.
fn parse_clock(clock: &str) -> Option<f64> {
    let fields: Vec<&str> = clock.split(':').collect();
    if fields.is_empty() || fields.len() > 3 || fields.iter().any(|f| f.trim().is_empty()) {
        return None;
    }

    let mut total = 0.0;
    for (i, field) in fields.iter().enumerate() {
        let value: f64 = field.trim().parse().ok()?;
        let last = i + 1 == fields.len();
        if value < 0.0 || (!last && value.fract() != 0.0) {
            return None;
        }
        total = total * 60.0 + value;
    }
    Some(total)
}

impl PartialEq for RaceTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RaceTime {}

impl Hash for RaceTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for RaceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RaceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RaceTime({}s)", self.0)
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
