//! Named-field record types shared by the loaders and the analysis pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use geo::Point;

/// Numeric identifier for an airline.
pub type AirlineId = i64;

/// Numeric identifier for an airport.
pub type AirportId = i64;

/// Null marker used by the OpenFlights data dumps for empty fields.
const NULL_MARKER: &str = "\\N";

/// A single scheduled route operated by one airline between two airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteRecord {
    pub airline_id: AirlineId,
    pub source_airport_id: AirportId,
    pub destination_airport_id: AirportId,
}

impl RouteRecord {
    pub fn new(
        airline_id: AirlineId,
        source_airport_id: AirportId,
        destination_airport_id: AirportId,
    ) -> Self {
        Self {
            airline_id,
            source_airport_id,
            destination_airport_id,
        }
    }
}

/// Airport location and descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub id: AirportId,
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
    pub city: String,
}

impl AirportRecord {
    pub fn new(id: AirportId, longitude: f64, latitude: f64) -> Self {
        Self {
            id,
            longitude,
            latitude,
            name: String::new(),
            city: String::new(),
        }
    }

    /// Attach the display name and city.
    pub fn with_names(mut self, name: impl Into<String>, city: impl Into<String>) -> Self {
        self.name = name.into();
        self.city = city.into();
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A seismic event from the earthquake feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    pub longitude: f64,
    pub latitude: f64,
    /// Feed magnitude; `None` when the feed omits it.
    pub magnitude: Option<f64>,
    pub title: String,
    /// Event time in milliseconds since the Unix epoch.
    pub timestamp_millis: Option<i64>,
}

impl EarthquakeRecord {
    pub fn new(longitude: f64, latitude: f64, magnitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            magnitude: Some(magnitude),
            title: String::new(),
            timestamp_millis: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn at_millis(mut self, timestamp_millis: i64) -> Self {
        self.timestamp_millis = Some(timestamp_millis);
        self
    }

    pub fn epicentre(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// Descriptive fields for an airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineInfo {
    pub name: String,
    pub alias: String,
}

impl AirlineInfo {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }

    /// Descriptor used whenever an airline id is missing from the lookup.
    pub fn unknown() -> Self {
        Self::new("Unknown", "-")
    }

    /// Alias suitable for display: empty and null-marker aliases render as `-`.
    pub fn display_alias(&self) -> &str {
        display_alias(&self.alias)
    }
}

pub(crate) fn display_alias(alias: &str) -> &str {
    let alias = alias.trim();
    if alias.is_empty() || alias == NULL_MARKER {
        "-"
    } else {
        alias
    }
}

/// Airline id to descriptor mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirlineLookup {
    airlines: HashMap<AirlineId, AirlineInfo>,
}

impl AirlineLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the descriptor for `id`.
    pub fn insert(&mut self, id: AirlineId, info: AirlineInfo) -> Option<AirlineInfo> {
        self.airlines.insert(id, info)
    }

    pub fn get(&self, id: AirlineId) -> Option<&AirlineInfo> {
        self.airlines.get(&id)
    }

    pub fn len(&self) -> usize {
        self.airlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty()
    }
}

impl FromIterator<(AirlineId, AirlineInfo)> for AirlineLookup {
    fn from_iter<T: IntoIterator<Item = (AirlineId, AirlineInfo)>>(iter: T) -> Self {
        Self {
            airlines: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_alias_hides_null_marker() {
        assert_eq!(AirlineInfo::new("Lufthansa", "LH").display_alias(), "LH");
        assert_eq!(AirlineInfo::new("Private flight", "\\N").display_alias(), "-");
        assert_eq!(AirlineInfo::new("Nameless", "  ").display_alias(), "-");
    }

    #[test]
    fn unknown_descriptor_is_stable() {
        let unknown = AirlineInfo::unknown();
        assert_eq!(unknown.name, "Unknown");
        assert_eq!(unknown.alias, "-");
    }
}
