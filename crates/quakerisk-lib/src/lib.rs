//! Quakerisk library entry points.
//!
//! This crate turns flight-route, airport, airline and earthquake records into
//! an airport adjacency index, the set of airports inside recent earthquake
//! impact areas, and a per-airline exposure report. Higher-level consumers
//! (the CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod adjacency;
pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod exposure;
pub mod geometry;
pub mod impact;
pub mod loaders;
pub mod records;
pub mod window;

pub use adjacency::{build_adjacency_index, AdjacencyIndex};
pub use analysis::{Assessment, RiskAnalysis, Snapshot};
pub use config::AnalysisConfig;
pub use dataset::{Dataset, DatasetPaths};
pub use error::{Error, Result};
pub use exposure::{build_exposure_report, ExposureEntry, ExposureReport};
pub use geo::Point;
pub use geometry::{distance_km, GeoDisc, EARTH_RADIUS_KM};
pub use impact::{
    impact_areas, resolve_affected_airports, AffectedAirport, FixedMultiplierBuffer, ImpactArea,
    ImpactModel, ImpactModelKind, MagnitudeScaledCircle,
};
pub use loaders::{
    load_airlines, load_airports, load_earthquakes, load_routes, read_airlines, read_airports,
    read_earthquakes, read_routes,
};
pub use records::{
    AirlineId, AirlineInfo, AirlineLookup, AirportId, AirportRecord, EarthquakeRecord,
    RouteRecord,
};
pub use window::{filter_earthquakes, latest_timestamp, TimeWindow};
