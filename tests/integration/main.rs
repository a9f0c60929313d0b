//! Integration tests: cross-layer scenarios
//!
//! Tests that load a race directory from disk, build its timeline, and
//! replay it frame by frame.

mod properties;
mod replay;

use racereel_foundation::RaceProfile;
use racereel_loader::{RaceSource, SampleConfig, SampleRace};

/// Writes a generated race to a temporary directory and loads it back.
pub fn load_sample(config: &SampleConfig) -> (tempfile::TempDir, RaceSource) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    SampleRace::generate(config).write_to(dir.path()).unwrap();
    let source = RaceSource::load_dir(dir.path(), &RaceProfile::car()).unwrap();
    (dir, source)
}
