//! Parse boundary: CSV and GeoJSON inputs to named-field records.
//!
//! Structural problems (unreadable file, missing required column) are
//! errors. Individual malformed rows are discarded and counted, matching how
//! the upstream feeds are consumed: an id that is not an integer or a
//! coordinate that is not a finite longitude in `[-180, 180]` or latitude in
//! `[-90, 90]` drops that row only.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use geojson::{Feature, FeatureCollection, GeoJson, Value as GeoJsonValue};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{is_valid_longitude, is_valid_latitude};
use crate::records::{AirlineInfo, AirlineLookup, AirportRecord, EarthquakeRecord, RouteRecord};

/// Maps canonical field names to column positions using normalized header
/// synonyms.
struct ColumnIndex {
    columns: BTreeMap<&'static str, usize>,
}

impl ColumnIndex {
    fn resolve(
        source_name: &'static str,
        headers: &StringRecord,
        fields: &[(&'static str, &[&str])],
        required: &[&'static str],
    ) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut columns = BTreeMap::new();
        for (canon, alts) in fields {
            if let Some(position) = alts
                .iter()
                .find_map(|alt| normalized.iter().position(|h| h == &normalize_header(alt)))
            {
                columns.insert(*canon, position);
            }
        }

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|field| !columns.contains_key(field))
            .collect();
        if !missing.is_empty() {
            return Err(Error::DataValidation {
                source_name,
                message: format!(
                    "missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        Ok(Self { columns })
    }

    fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.columns
            .get(field)
            .and_then(|&i| record.get(i))
            .map(str::trim)
    }

    fn parse_id(&self, record: &StringRecord, field: &str) -> Option<i64> {
        self.get(record, field)?.parse::<i64>().ok()
    }

    fn parse_coordinate(
        &self,
        record: &StringRecord,
        field: &str,
        valid: fn(f64) -> bool,
    ) -> Option<f64> {
        self.get(record, field)?
            .parse::<f64>()
            .ok()
            .filter(|&value| valid(value))
    }

    fn text(&self, record: &StringRecord, field: &str) -> String {
        self.get(record, field).unwrap_or_default().to_string()
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::Fields)
        .flexible(true)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::File::open(path)?)
}

/// Load route records from a CSV file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteRecord>> {
    read_routes(open(path)?)
}

/// Parse route records from CSV with `airline_id`, `src_airport_id` and
/// `dest_airport_id` columns.
pub fn read_routes<R: Read>(reader: R) -> Result<Vec<RouteRecord>> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let columns = ColumnIndex::resolve(
        "route",
        &headers,
        &[
            ("airline", &["airline_id", "airlineid"]),
            (
                "source",
                &["src_airport_id", "source_airport_id", "sourceairportid"],
            ),
            (
                "destination",
                &[
                    "dest_airport_id",
                    "destination_airport_id",
                    "destinationairportid",
                ],
            ),
        ],
        &["airline", "source", "destination"],
    )?;

    let mut routes = Vec::new();
    let mut discarded = 0usize;
    for record in csv.records() {
        let record = record?;
        let parsed = (
            columns.parse_id(&record, "airline"),
            columns.parse_id(&record, "source"),
            columns.parse_id(&record, "destination"),
        );
        match parsed {
            (Some(airline), Some(source), Some(destination)) => {
                routes.push(RouteRecord::new(airline, source, destination));
            }
            _ => discarded += 1,
        }
    }

    debug!(routes = routes.len(), discarded, "loaded route data");
    Ok(routes)
}

/// Load airport records from a CSV file.
pub fn load_airports(path: &Path) -> Result<Vec<AirportRecord>> {
    read_airports(open(path)?)
}

/// Parse airport records from CSV with `airport_id`, `lng` and `lat` columns
/// plus optional `airport_name` and `airport_city`.
pub fn read_airports<R: Read>(reader: R) -> Result<Vec<AirportRecord>> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let columns = ColumnIndex::resolve(
        "airport",
        &headers,
        &[
            ("id", &["airport_id", "airportid", "id"]),
            ("name", &["airport_name", "name"]),
            ("city", &["airport_city", "city"]),
            ("longitude", &["lng", "lon", "longitude"]),
            ("latitude", &["lat", "latitude"]),
        ],
        &["id", "longitude", "latitude"],
    )?;

    let mut airports = Vec::new();
    let mut discarded = 0usize;
    for record in csv.records() {
        let record = record?;
        let id = columns.parse_id(&record, "id");
        let longitude = columns.parse_coordinate(&record, "longitude", is_valid_longitude);
        let latitude = columns.parse_coordinate(&record, "latitude", is_valid_latitude);
        let (Some(id), Some(longitude), Some(latitude)) = (id, longitude, latitude) else {
            discarded += 1;
            continue;
        };
        airports.push(
            AirportRecord::new(id, longitude, latitude)
                .with_names(columns.text(&record, "name"), columns.text(&record, "city")),
        );
    }

    debug!(airports = airports.len(), discarded, "loaded airport data");
    Ok(airports)
}

/// Load the airline lookup from a CSV file.
pub fn load_airlines(path: &Path) -> Result<AirlineLookup> {
    read_airlines(open(path)?)
}

/// Parse the airline lookup from CSV with `airline_id`, `name` and `alias`
/// columns. A repeated airline id replaces the earlier row.
pub fn read_airlines<R: Read>(reader: R) -> Result<AirlineLookup> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let columns = ColumnIndex::resolve(
        "airline",
        &headers,
        &[
            ("id", &["airline_id", "airlineid", "id"]),
            ("name", &["name", "airline_name"]),
            ("alias", &["alias"]),
        ],
        &["id", "name"],
    )?;

    let mut lookup = AirlineLookup::new();
    let mut discarded = 0usize;
    for record in csv.records() {
        let record = record?;
        let Some(id) = columns.parse_id(&record, "id") else {
            discarded += 1;
            continue;
        };
        lookup.insert(
            id,
            AirlineInfo::new(columns.text(&record, "name"), columns.text(&record, "alias")),
        );
    }

    debug!(airlines = lookup.len(), discarded, "loaded airline data");
    Ok(lookup)
}

/// Longitude and latitude of a point geometry, if both are in range.
fn point_position(feature: &Feature) -> Option<(f64, f64)> {
    let GeoJsonValue::Point(position) = &feature.geometry.as_ref()?.value else {
        return None;
    };
    let longitude = *position.first()?;
    let latitude = *position.get(1)?;
    (is_valid_longitude(longitude) && is_valid_latitude(latitude)).then_some((longitude, latitude))
}

/// Load earthquake records from a GeoJSON file.
pub fn load_earthquakes(path: &Path) -> Result<Vec<EarthquakeRecord>> {
    read_earthquakes(open(path)?)
}

/// Parse earthquake records from a GeoJSON feature collection in the USGS
/// summary feed shape. Features without an in-range point geometry are
/// discarded.
pub fn read_earthquakes<R: Read>(mut reader: R) -> Result<Vec<EarthquakeRecord>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let geojson: GeoJson = content.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut earthquakes = Vec::with_capacity(collection.features.len());
    let mut discarded = 0usize;
    for feature in &collection.features {
        let Some((longitude, latitude)) = point_position(feature) else {
            discarded += 1;
            continue;
        };
        earthquakes.push(EarthquakeRecord {
            longitude,
            latitude,
            magnitude: feature.property("mag").and_then(|v| v.as_f64()),
            title: feature
                .property("title")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            timestamp_millis: feature.property("time").and_then(|v| v.as_i64()),
        });
    }

    debug!(
        earthquakes = earthquakes.len(),
        discarded, "loaded earthquake feed"
    );
    Ok(earthquakes)
}
