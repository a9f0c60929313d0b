//! Directory bundles of race tables.
//!
//! A recorded race is usually exported as a directory of CSV files with
//! conventional names. Only the telemetry table is required.

use std::path::{Path, PathBuf};

use log::{debug, info};
use racereel_foundation::{
    GridSlot, Message, PitStop, RaceProfile, RaceRecord, Result, Standing, TrackMap,
};

use crate::records::RecordLoader;
use crate::report::{LoadReport, Loaded};
use crate::session::SessionLoader;
use crate::table::open_file;

/// Telemetry file name.
pub const TELEMETRY_FILE: &str = "telemetry.csv";
/// Race control message file name.
pub const EVENTS_FILE: &str = "race_events.csv";
/// Starting grid file name.
pub const GRID_FILE: &str = "starting_grid.csv";
/// Pit stop file name.
pub const PITS_FILE: &str = "pit_stops.csv";
/// Track outline file name.
pub const TRACK_FILE: &str = "track_map.csv";
/// Recorded standings file name.
pub const STANDINGS_FILE: &str = "leaderboard.csv";

/// Everything loaded for one race.
#[derive(Clone, Debug)]
pub struct RaceSource {
    /// Telemetry records.
    pub telemetry: Loaded<RaceRecord>,
    /// Race control messages, sorted by time.
    pub messages: Loaded<Message>,
    /// Starting grid, ordered by grid position.
    pub grid: Loaded<GridSlot>,
    /// Pit stop windows.
    pub pit_stops: Loaded<PitStop>,
    /// Recorded standings, sorted by time.
    pub standings: Loaded<Standing>,
    /// Track outline.
    pub track: TrackMap,
    /// Report of the track outline load.
    pub track_report: LoadReport,
}

impl RaceSource {
    /// Loads a race directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the telemetry file is missing or any present file
    /// is unreadable or lacks required columns.
    pub fn load_dir(dir: impl AsRef<Path>, profile: &RaceProfile) -> Result<Self> {
        let dir = dir.as_ref();
        let records = RecordLoader::new(profile)?;
        let session = SessionLoader::new();

        let telemetry = records.load_path(dir.join(TELEMETRY_FILE))?;
        let messages = load_optional(dir, EVENTS_FILE, |p, s| {
            session.messages(open_file(p)?, s)
        })?;
        let grid = load_optional(dir, GRID_FILE, |p, s| session.grid(open_file(p)?, s))?;
        let pit_stops = load_optional(dir, PITS_FILE, |p, s| {
            session.pit_stops(open_file(p)?, s)
        })?;
        let standings = load_optional(dir, STANDINGS_FILE, |p, s| {
            session.standings(open_file(p)?, s)
        })?;
        let track_points = load_optional(dir, TRACK_FILE, |p, s| {
            session.track_points(open_file(p)?, s)
        })?;

        let source = Self {
            telemetry,
            messages,
            grid,
            pit_stops,
            standings,
            track: TrackMap::new(track_points.items),
            track_report: track_points.report,
        };
        info!(
            "loaded race from {}: {} records, {} messages, {} on grid",
            dir.display(),
            source.telemetry.len(),
            source.messages.len(),
            source.grid.len()
        );
        Ok(source)
    }

    /// Returns the load reports of every table, telemetry first.
    pub fn reports(&self) -> impl Iterator<Item = &LoadReport> {
        [
            &self.telemetry.report,
            &self.messages.report,
            &self.grid.report,
            &self.pit_stops.report,
            &self.standings.report,
            &self.track_report,
        ]
        .into_iter()
    }

    /// Returns the total number of excluded rows across all tables.
    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.reports().map(LoadReport::excluded_count).sum()
    }
}

fn load_optional<T>(
    dir: &Path,
    name: &str,
    load: impl FnOnce(&Path, &str) -> Result<Loaded<T>>,
) -> Result<Loaded<T>> {
    let path: PathBuf = dir.join(name);
    let source = path.display().to_string();
    if path.is_file() {
        load(&path, &source)
    } else {
        debug!("{source} not present, skipping");
        Ok(Loaded::empty(source))
    }
}
