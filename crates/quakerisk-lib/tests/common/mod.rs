//! Common test utilities and fixture helpers.
//!
//! The fixture dataset under `docs/fixtures` models two Tokyo-area
//! earthquakes inside the default window, one older Los Angeles event, an
//! event without magnitude and an offshore event.

use std::path::PathBuf;

use quakerisk_lib::{Dataset, DatasetPaths};

/// Epoch millis of the newest fixture earthquake (2018-09-14T10:00:00Z).
#[allow(dead_code)]
pub const LATEST_QUAKE_MILLIS: i64 = 1_536_919_200_000;

#[allow(dead_code)]
pub const HANEDA: i64 = 2359;
#[allow(dead_code)]
pub const NARITA: i64 = 2279;
#[allow(dead_code)]
pub const LOS_ANGELES: i64 = 3484;
#[allow(dead_code)]
pub const FRANKFURT: i64 = 340;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the full fixture dataset.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    Dataset::load(&DatasetPaths::in_dir(&fixtures_dir())).expect("fixture dataset loads")
}
