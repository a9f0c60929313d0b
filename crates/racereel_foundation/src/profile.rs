//! Race profiles.
//!
//! Every race type shares one code path. What differs between a car race
//! and a drone race is captured here as data: how many position components
//! a sample carries, which words the source uses for statuses, and which
//! ranking key orders the leaderboard.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::status::{Status, StatusVocabulary};

/// The kind of race being replayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RaceKind {
    /// Circuit car racing, planar track coordinates.
    #[default]
    Car,
    /// Drone racing, spatial coordinates.
    Drone,
    /// Bike racing, distance covered along the route.
    Bike,
    /// Go-kart racing, planar track coordinates.
    GoKart,
}

impl RaceKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Drone => "drone",
            Self::Bike => "bike",
            Self::GoKart => "go-kart",
        }
    }

    /// Parses a race kind name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "car" => Some(Self::Car),
            "drone" => Some(Self::Drone),
            "bike" => Some(Self::Bike),
            "go-kart" | "gokart" | "kart" => Some(Self::GoKart),
            _ => None,
        }
    }
}

impl fmt::Display for RaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Race-type specific configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceProfile {
    /// The race type.
    pub kind: RaceKind,
    /// Number of position components per sample (1 to 3).
    pub dimensions: usize,
    /// Status words used by the source.
    pub statuses: StatusVocabulary,
    /// Name of the leaderboard ranking key.
    pub ranking_key: String,
}

impl Default for RaceProfile {
    fn default() -> Self {
        Self::car()
    }
}

impl RaceProfile {
    /// Profile for circuit car racing.
    #[must_use]
    pub fn car() -> Self {
        Self {
            kind: RaceKind::Car,
            dimensions: 2,
            statuses: StatusVocabulary::default(),
            ranking_key: "distance".to_string(),
        }
    }

    /// Profile for drone racing: 3D positions, gates counted as laps.
    #[must_use]
    pub fn drone() -> Self {
        Self {
            kind: RaceKind::Drone,
            dimensions: 3,
            statuses: StatusVocabulary::default()
                .with_term("flying", Status::Active)
                .with_term("crashed", Status::Retired)
                .with_term("landed", Status::Finished),
            ranking_key: "distance".to_string(),
        }
    }

    /// Profile for bike racing: scalar distance along the route.
    #[must_use]
    pub fn bike() -> Self {
        Self {
            kind: RaceKind::Bike,
            dimensions: 1,
            statuses: StatusVocabulary::default()
                .with_term("riding", Status::Active)
                .with_term("abandoned", Status::Retired)
                .with_term("dns", Status::Retired),
            ranking_key: "distance".to_string(),
        }
    }

    /// Profile for go-kart racing.
    #[must_use]
    pub fn go_kart() -> Self {
        Self {
            kind: RaceKind::GoKart,
            ..Self::car()
        }
    }

    /// Returns the preset profile for a race kind.
    #[must_use]
    pub fn for_kind(kind: RaceKind) -> Self {
        match kind {
            RaceKind::Car => Self::car(),
            RaceKind::Drone => Self::drone(),
            RaceKind::Bike => Self::bike(),
            RaceKind::GoKart => Self::go_kart(),
        }
    }

    /// Builder method to set the dimensionality.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Builder method to set the ranking key name.
    #[must_use]
    pub fn with_ranking_key(mut self, key: impl Into<String>) -> Self {
        self.ranking_key = key.into();
        self
    }

    /// Builder method to replace the status vocabulary.
    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusVocabulary) -> Self {
        self.statuses = statuses;
        self
    }
}
