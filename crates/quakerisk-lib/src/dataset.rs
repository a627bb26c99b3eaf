use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::loaders::{load_airlines, load_airports, load_earthquakes, load_routes};
use crate::records::{AirlineLookup, AirportId, AirportRecord, EarthquakeRecord, RouteRecord};

/// Default filename for the route table.
pub const ROUTES_FILENAME: &str = "routes.csv";
/// Default filename for the airport table.
pub const AIRPORTS_FILENAME: &str = "airports.csv";
/// Default filename for the airline table.
pub const AIRLINES_FILENAME: &str = "airlines.csv";
/// Default filename for the earthquake feed.
pub const EARTHQUAKES_FILENAME: &str = "earthquakes.geojson";

/// Locations of the four input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub routes: PathBuf,
    pub airports: PathBuf,
    pub airlines: PathBuf,
    pub earthquakes: PathBuf,
}

impl DatasetPaths {
    /// Paths using the default filenames inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            routes: dir.join(ROUTES_FILENAME),
            airports: dir.join(AIRPORTS_FILENAME),
            airlines: dir.join(AIRLINES_FILENAME),
            earthquakes: dir.join(EARTHQUAKES_FILENAME),
        }
    }
}

/// All parsed inputs of an analysis.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub routes: Vec<RouteRecord>,
    pub airports: Vec<AirportRecord>,
    pub airlines: AirlineLookup,
    pub earthquakes: Vec<EarthquakeRecord>,
}

impl Dataset {
    /// Load every input file.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let dataset = Self {
            routes: load_routes(&paths.routes)?,
            airports: load_airports(&paths.airports)?,
            airlines: load_airlines(&paths.airlines)?,
            earthquakes: load_earthquakes(&paths.earthquakes)?,
        };
        info!(
            routes = dataset.routes.len(),
            airports = dataset.airports.len(),
            airlines = dataset.airlines.len(),
            earthquakes = dataset.earthquakes.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// First airport record with the given id.
    pub fn airport(&self, id: AirportId) -> Option<&AirportRecord> {
        self.airports.iter().find(|airport| airport.id == id)
    }
}
