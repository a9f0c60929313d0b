//! Column schemas.
//!
//! Sources from different timing systems name the same column differently
//! (`X`, `PosX`, `Longitude`). A [`ColumnSpec`] lists the accepted names for
//! one logical column; the first alias found in the header wins.

use racereel_foundation::{ConfigIssue, Error, MAX_DIMENSIONS, RaceProfile, Result};

/// Accepted header names for one logical column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Logical name used in reports.
    pub name: String,
    /// Header names, in priority order.
    pub aliases: Vec<String>,
}

impl ColumnSpec {
    /// Creates a column spec from a logical name and its aliases.
    #[must_use]
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Builder method to add an alias at lowest priority.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Finds this column in a header row.
    ///
    /// Exact matches take precedence over case-insensitive ones, so a
    /// header with both `X` and `x` resolves deterministically.
    #[must_use]
    pub fn resolve<'h>(&self, headers: impl IntoIterator<Item = &'h str> + Clone) -> Option<usize> {
        for alias in &self.aliases {
            if let Some(i) = headers.clone().into_iter().position(|h| h.trim() == alias) {
                return Some(i);
            }
        }
        for alias in &self.aliases {
            if let Some(i) = headers
                .clone()
                .into_iter()
                .position(|h| h.trim().eq_ignore_ascii_case(alias))
            {
                return Some(i);
            }
        }
        None
    }
}

pub(crate) fn competitor_column() -> ColumnSpec {
    ColumnSpec::new(
        "competitor",
        &["Driver", "Competitor", "CompetitorId", "Pilot", "Rider", "Id"],
    )
}

pub(crate) fn time_column() -> ColumnSpec {
    ColumnSpec::new(
        "timestamp",
        &["SessionTime", "RaceTime", "Time", "Timestamp", "t"],
    )
}

fn axis_columns(dimensions: usize) -> Vec<ColumnSpec> {
    if dimensions == 1 {
        return vec![ColumnSpec::new(
            "distance",
            &["Distance", "Progress", "Position", "Pos"],
        )];
    }
    let axes = [
        ColumnSpec::new("x", &["X", "Xpos", "PosX", "Longitude", "Lon"]),
        ColumnSpec::new("y", &["Y", "Ypos", "PosY", "Latitude", "Lat"]),
        ColumnSpec::new("z", &["Z", "Zpos", "PosZ", "Altitude", "Alt"]),
    ];
    axes.into_iter().take(dimensions).collect()
}

/// Column layout of a telemetry table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordSchema {
    /// Competitor identifier (required).
    pub competitor: ColumnSpec,
    /// Race-time offset (required).
    pub time: ColumnSpec,
    /// Position components, one per dimension (required).
    pub position: Vec<ColumnSpec>,
    /// Lap number.
    pub lap: ColumnSpec,
    /// Status word.
    pub status: ColumnSpec,
    /// Pit lane flag.
    pub pit: ColumnSpec,
}

impl RecordSchema {
    /// Builds the telemetry schema for a race profile.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile's dimensionality is
    /// outside 1 to 3.
    pub fn for_profile(profile: &RaceProfile) -> Result<Self> {
        if profile.dimensions == 0 || profile.dimensions > MAX_DIMENSIONS {
            return Err(Error::configuration(ConfigIssue::InvalidDimensions(
                profile.dimensions,
            )));
        }
        Ok(Self {
            competitor: competitor_column(),
            time: time_column(),
            position: axis_columns(profile.dimensions),
            lap: ColumnSpec::new("lap", &["Lap", "Laps", "LapNumber", "Gate"]),
            status: ColumnSpec::new("status", &["Status", "State"]),
            pit: ColumnSpec::new("pit", &["inPit", "InPit", "Pit", "PitStatus"]),
        })
    }

    /// Returns the number of position components.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.position.len()
    }
}

/// Column layout of a race control message table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageSchema {
    /// Race-time offset (required).
    pub time: ColumnSpec,
    /// Message text (required).
    pub text: ColumnSpec,
    /// Lap number.
    pub lap: ColumnSpec,
}

impl Default for MessageSchema {
    fn default() -> Self {
        Self {
            time: time_column(),
            text: ColumnSpec::new("message", &["Message", "Text", "Event"]),
            lap: ColumnSpec::new("lap", &["Lap"]),
        }
    }
}

/// Column layout of a starting grid table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSchema {
    /// Competitor identifier (required).
    pub competitor: ColumnSpec,
    /// Starting position.
    pub grid_position: ColumnSpec,
    /// Display name.
    pub name: ColumnSpec,
    /// Team.
    pub team: ColumnSpec,
}

impl Default for GridSchema {
    fn default() -> Self {
        Self {
            competitor: competitor_column().with_alias("DriverName"),
            grid_position: ColumnSpec::new("grid position", &["GridPosition", "Grid", "StartPosition"]),
            name: ColumnSpec::new("name", &["DriverName", "Name", "FullName"]),
            team: ColumnSpec::new("team", &["Team", "Entrant"]),
        }
    }
}

/// Column layout of a pit stop table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitSchema {
    /// Competitor identifier (required).
    pub competitor: ColumnSpec,
    /// Pit entry time; falls back to `time`.
    pub time_in: ColumnSpec,
    /// Pit exit time; falls back to entry plus `duration`.
    pub time_out: ColumnSpec,
    /// Stop duration in seconds.
    pub duration: ColumnSpec,
    /// Row timestamp.
    pub time: ColumnSpec,
}

impl Default for PitSchema {
    fn default() -> Self {
        Self {
            competitor: competitor_column(),
            time_in: ColumnSpec::new("pit entry", &["PitTimeIn", "TimeIn", "PitIn"]),
            time_out: ColumnSpec::new("pit exit", &["PitTimeOut", "TimeOut", "PitOut"]),
            duration: ColumnSpec::new("stop duration", &["StopDuration", "Duration"]),
            time: time_column(),
        }
    }
}

/// Column layout of a recorded standings table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandingsSchema {
    /// When the standing takes effect (required).
    pub time: ColumnSpec,
    /// Competitor identifier (required).
    pub competitor: ColumnSpec,
    /// Rank (required).
    pub rank: ColumnSpec,
}

impl Default for StandingsSchema {
    fn default() -> Self {
        Self {
            time: time_column(),
            competitor: competitor_column(),
            rank: ColumnSpec::new("rank", &["Position", "Rank", "Standing"]),
        }
    }
}
