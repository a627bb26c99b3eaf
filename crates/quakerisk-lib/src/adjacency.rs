//! Airport to airline route tallies.
//!
//! The index answers "how many route endpoints does airline X have at
//! airport Y". It is rebuilt wholesale whenever the route set changes.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::records::{AirlineId, AirportId, RouteRecord};

/// Per-airport route counts keyed by airline.
///
/// Airline tallies are ordered by airline id so iteration is deterministic
/// regardless of the order routes were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    airports: HashMap<AirportId, BTreeMap<AirlineId, u32>>,
}

impl AdjacencyIndex {
    /// Airline tally for one airport, if any route touches it.
    pub fn airlines_at(&self, airport: AirportId) -> Option<&BTreeMap<AirlineId, u32>> {
        self.airports.get(&airport)
    }

    /// Route count for a single airline at an airport (0 when absent).
    pub fn route_count(&self, airport: AirportId, airline: AirlineId) -> u32 {
        self.airports
            .get(&airport)
            .and_then(|tally| tally.get(&airline))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all airline counts at an airport.
    pub fn total_at(&self, airport: AirportId) -> u64 {
        self.airports
            .get(&airport)
            .map(|tally| tally.values().map(|&count| u64::from(count)).sum())
            .unwrap_or(0)
    }

    /// Sum of every count in the index; equals twice the number of routes.
    pub fn total_endpoints(&self) -> u64 {
        self.airports.keys().map(|&id| self.total_at(id)).sum()
    }

    pub fn contains_airport(&self, airport: AirportId) -> bool {
        self.airports.contains_key(&airport)
    }

    /// Number of airports with at least one route.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Iterate airports with their tallies in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (AirportId, &BTreeMap<AirlineId, u32>)> {
        self.airports.iter().map(|(&id, tally)| (id, tally))
    }

    fn increment(&mut self, airport: AirportId, airline: AirlineId) {
        *self
            .airports
            .entry(airport)
            .or_default()
            .entry(airline)
            .or_insert(0) += 1;
    }
}

/// Build the adjacency index from a flat list of routes.
///
/// Each route adds one unit for its airline at the source airport and one at
/// the destination airport.
pub fn build_adjacency_index<'a, I>(routes: I) -> AdjacencyIndex
where
    I: IntoIterator<Item = &'a RouteRecord>,
{
    let mut index = AdjacencyIndex::default();
    let mut route_count = 0usize;
    for route in routes {
        index.increment(route.source_airport_id, route.airline_id);
        index.increment(route.destination_airport_id, route.airline_id);
        route_count += 1;
    }
    debug!(
        routes = route_count,
        airports = index.len(),
        "built airport adjacency index"
    );
    index
}
