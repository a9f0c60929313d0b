//! Timeline builder configuration.

use racereel_foundation::{ConfigIssue, Error, Position, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default gap tolerance, as a multiple of the sample interval.
pub const DEFAULT_GAP_TOLERANCE: f64 = 1.5;

/// Upper bound on points synthesized into a single gap.
pub const MAX_SYNTHESIZED_PER_GAP: usize = 10_000;

/// How positions are estimated between two known points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interpolation {
    /// Straight line between the neighbours, proportional to time.
    #[default]
    Linear,
}

impl Interpolation {
    /// Estimates the position `fraction` of the way from `from` to `to`.
    #[must_use]
    pub fn interpolate(self, from: &Position, to: &Position, fraction: f64) -> Position {
        match self {
            Self::Linear => from.lerp(to, fraction),
        }
    }
}

/// Configuration for [`TimelineBuilder`](crate::TimelineBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuilderConfig {
    /// A spacing larger than `gap_tolerance` times the sample interval is a
    /// gap. Must be at least 1.
    pub gap_tolerance: f64,
    /// Expected spacing between samples in seconds. When `None` it is
    /// inferred per competitor as the median spacing.
    pub sample_interval: Option<f64>,
    /// Interpolation used for repairs and gap filling.
    pub interpolation: Interpolation,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
            sample_interval: None,
            interpolation: Interpolation::Linear,
        }
    }
}

impl BuilderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the gap tolerance.
    #[must_use]
    pub fn with_gap_tolerance(mut self, tolerance: f64) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    /// Builder method to fix the sample interval instead of inferring it.
    #[must_use]
    pub fn with_sample_interval(mut self, secs: f64) -> Self {
        self.sample_interval = Some(secs);
        self
    }

    /// Builder method to set the interpolation mode.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the gap tolerance is below 1 or not
    /// finite, or the sample interval is not positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !self.gap_tolerance.is_finite() || self.gap_tolerance < 1.0 {
            return Err(Error::configuration(ConfigIssue::InvalidGapTolerance(
                self.gap_tolerance,
            )));
        }
        if let Some(interval) = self.sample_interval {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(Error::configuration(ConfigIssue::InvalidSampleInterval(
                    interval,
                )));
            }
        }
        Ok(())
    }
}
