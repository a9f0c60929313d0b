//! Deterministic synthetic races.
//!
//! Generates a small oval race in the same table layout as real exports:
//! four cars lapping at different speeds, one pit stop, race control
//! messages, recorded standings and the track outline. Output depends only
//! on the seed, so tests and benches can rely on it.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use racereel_foundation::{Error, Result};

use crate::source::{
    EVENTS_FILE, GRID_FILE, PITS_FILE, STANDINGS_FILE, TELEMETRY_FILE, TRACK_FILE,
};

/// Drivers, start offsets in waypoints, and relative pace.
const FIELD: [(&str, &str, &str, f64, f64); 4] = [
    ("Hamilton", "Lewis Hamilton", "Mercedes", 0.0, 1.0),
    ("Verstappen", "Max Verstappen", "Red Bull", 10.0, 0.97),
    ("Norris", "Lando Norris", "McLaren", 20.0, 0.95),
    ("Sainz", "Carlos Sainz", "Ferrari", 30.0, 0.92),
];

/// Waypoints advanced per second at full pace.
const WAYPOINTS_PER_SECOND: f64 = 2.0;

/// Parameters of a synthetic race.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleConfig {
    /// RNG seed.
    pub seed: u64,
    /// Samples per driver.
    pub samples: usize,
    /// Seconds between samples.
    pub interval: f64,
    /// Position jitter amplitude.
    pub jitter: f64,
    /// Probability that a sample is dropped, leaving a gap.
    pub drop_rate: f64,
    /// Probability that a sample's timestamp is blanked.
    pub blank_timestamp_rate: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 500,
            interval: 0.1,
            jitter: 0.3,
            drop_rate: 0.0,
            blank_timestamp_rate: 0.0,
        }
    }
}

impl SampleConfig {
    /// Builder method to set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set samples per driver.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Builder method to set the drop rate.
    #[must_use]
    pub fn with_drop_rate(mut self, rate: f64) -> Self {
        self.drop_rate = rate;
        self
    }

    /// Builder method to set the blank timestamp rate.
    #[must_use]
    pub fn with_blank_timestamp_rate(mut self, rate: f64) -> Self {
        self.blank_timestamp_rate = rate;
        self
    }

    /// Builder method to set the jitter amplitude.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}

/// A generated race as CSV tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRace {
    /// `telemetry.csv` contents.
    pub telemetry: String,
    /// `race_events.csv` contents.
    pub events: String,
    /// `starting_grid.csv` contents.
    pub grid: String,
    /// `pit_stops.csv` contents.
    pub pits: String,
    /// `leaderboard.csv` contents.
    pub standings: String,
    /// `track_map.csv` contents.
    pub track: String,
    /// Telemetry rows written, including dropped-timestamp rows.
    pub telemetry_rows: usize,
    /// Rows written with a blank timestamp.
    pub blank_timestamps: usize,
}

impl SampleRace {
    /// Generates a race.
    #[must_use]
    pub fn generate(config: &SampleConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let waypoints = oval_waypoints();
        #[allow(clippy::cast_precision_loss)]
        let circuit = waypoints.len() as f64;

        let mut telemetry = String::from("SessionTime,Driver,Lap,X,Y,Speed,inPit\n");
        let mut telemetry_rows = 0;
        let mut blank_timestamps = 0;
        let pit_window = (150usize, 200usize);

        for step in 0..config.samples {
            #[allow(clippy::cast_precision_loss)]
            let time = step as f64 * config.interval;
            for &(driver, _, _, start, pace) in &FIELD {
                if config.drop_rate > 0.0 && rng.gen_bool(config.drop_rate.min(1.0)) {
                    continue;
                }
                let travelled = start + time * WAYPOINTS_PER_SECOND * pace;
                let along = travelled % circuit;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = along as usize;
                let (x0, y0) = waypoints[index];
                let (x1, y1) = waypoints[(index + 1) % waypoints.len()];
                let local = along.fract();
                let mut x = x0 + (x1 - x0) * local;
                let mut y = y0 + (y1 - y0) * local;
                if config.jitter > 0.0 {
                    x += rng.gen_range(-config.jitter..=config.jitter);
                    y += rng.gen_range(-config.jitter..=config.jitter);
                }

                let in_pit = driver == "Sainz" && (pit_window.0..=pit_window.1).contains(&step);
                if in_pit {
                    x = 10.0;
                    y = 5.0;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let lap = 1 + (travelled / circuit) as u32;
                let speed = if in_pit { 0 } else { 210 };

                let blank = config.blank_timestamp_rate > 0.0
                    && rng.gen_bool(config.blank_timestamp_rate.min(1.0));
                if blank {
                    blank_timestamps += 1;
                    let _ = writeln!(
                        telemetry,
                        ",{driver},{lap},{x:.4},{y:.4},{speed},{in_pit}"
                    );
                } else {
                    let _ = writeln!(
                        telemetry,
                        "{time:.3},{driver},{lap},{x:.4},{y:.4},{speed},{in_pit}"
                    );
                }
                telemetry_rows += 1;
            }
        }

        let mut grid = String::from("Driver,DriverName,Team,GridPosition\n");
        for (i, (driver, name, team, _, _)) in FIELD.iter().enumerate() {
            let _ = writeln!(grid, "{driver},{name},{team},{}", i + 1);
        }

        let pits = String::from(
            "SessionTime,Driver,Lap,PitTimeIn,PitTimeOut,StopDuration\n15.0,Sainz,2,15.0,20.0,5.0\n",
        );

        let events = String::from(
            "SessionTime,Lap,Type,Message\n\
             0.0,0,Start,GREEN FLAG\n\
             5.0,1,Driver,Hamilton leads\n\
             15.0,2,PitStop,Sainz pits\n\
             20.0,2,PitStop,Sainz out\n\
             30.0,3,Race,GREEN FLAG\n\
             50.0,5,End,END\n",
        );

        let mut standings = String::from("SessionTime,Position,Driver,GapAhead,Interval\n");
        let orders: [(f64, [&str; 4]); 5] = [
            (0.0, ["Hamilton", "Verstappen", "Norris", "Sainz"]),
            (10.0, ["Hamilton", "Verstappen", "Norris", "Sainz"]),
            (15.0, ["Hamilton", "Verstappen", "Norris", "Sainz"]),
            (25.0, ["Hamilton", "Verstappen", "Sainz", "Norris"]),
            (50.0, ["Hamilton", "Verstappen", "Sainz", "Norris"]),
        ];
        for (time, order) in orders {
            for (i, driver) in order.iter().enumerate() {
                let rank = i + 1;
                #[allow(clippy::cast_precision_loss)]
                let gap = if rank == 1 { 0.0 } else { rank as f64 * 0.5 };
                let interval = if rank == 1 { 0.0 } else { 0.5 };
                let _ = writeln!(standings, "{time:.1},{rank},{driver},{gap:.1},{interval:.1}");
            }
        }

        let mut track = String::from("X,Y\n");
        for (x, y) in &waypoints {
            let _ = writeln!(track, "{x:.4},{y:.4}");
        }

        Self {
            telemetry,
            events,
            grid,
            pits,
            standings,
            track,
            telemetry_rows,
            blank_timestamps,
        }
    }

    /// Writes the tables into a directory using the conventional names.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for (name, contents) in [
            (TELEMETRY_FILE, &self.telemetry),
            (EVENTS_FILE, &self.events),
            (GRID_FILE, &self.grid),
            (PITS_FILE, &self.pits),
            (STANDINGS_FILE, &self.standings),
            (TRACK_FILE, &self.track),
        ] {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|e| {
                Error::io(format!("failed to write '{}': {e}", path.display()))
            })?;
        }
        Ok(())
    }
}

/// An oval of 81 waypoints: two straights joined by semicircles, closed on
/// the first point.
fn oval_waypoints() -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(81);
    for i in 0..20 {
        let t = f64::from(i) / 20.0;
        points.push((t * 100.0, 0.0));
    }
    for i in 0..20 {
        let angle = f64::from(i) / 20.0 * PI;
        points.push((100.0 + 30.0 * angle.sin(), 30.0 * (1.0 - angle.cos())));
    }
    for i in 0..20 {
        let t = f64::from(i) / 20.0;
        points.push((100.0 - t * 100.0, 60.0));
    }
    for i in 0..20 {
        let angle = f64::from(i) / 20.0 * PI;
        points.push((-30.0 * angle.sin(), 60.0 - 30.0 * (1.0 - angle.cos())));
    }
    points.push(points[0]);
    points
}
