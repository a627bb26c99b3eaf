//! Per-airline exposure aggregation.
//!
//! Joins the affected airports against the adjacency index and the airline
//! lookup. Airports absent from the index are skipped; airlines absent from
//! the lookup are reported with [`AirlineInfo::unknown`].

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::adjacency::AdjacencyIndex;
use crate::impact::AffectedAirport;
use crate::records::{self, AirlineId, AirlineInfo, AirlineLookup};

/// Exposure of a single airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposureEntry {
    pub airline_id: AirlineId,
    pub name: String,
    pub alias: String,
    /// Routes touching any affected airport, counted once per endpoint.
    pub affected_route_count: u64,
}

impl ExposureEntry {
    fn new(airline_id: AirlineId, info: AirlineInfo) -> Self {
        Self {
            airline_id,
            name: info.name,
            alias: info.alias,
            affected_route_count: 0,
        }
    }

    /// Alias with empty and `\N` values replaced by `-`.
    pub fn display_alias(&self) -> &str {
        records::display_alias(&self.alias)
    }
}

/// Exposure entries keyed by airline id, kept in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExposureReport {
    entries: Vec<ExposureEntry>,
    #[serde(skip)]
    positions: HashMap<AirlineId, usize>,
}

impl ExposureReport {
    pub fn get(&self, airline: AirlineId) -> Option<&ExposureEntry> {
        self.positions.get(&airline).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order their airlines were first encountered.
    pub fn entries(&self) -> &[ExposureEntry] {
        &self.entries
    }

    /// Sum of `affected_route_count` across all airlines.
    pub fn total_affected_routes(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.affected_route_count)
            .sum()
    }

    /// Entries sorted by `affected_route_count` descending. The sort is
    /// stable: ties keep encounter order.
    pub fn sorted_by_risk(&self) -> Vec<&ExposureEntry> {
        let mut sorted: Vec<&ExposureEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.affected_route_count.cmp(&a.affected_route_count));
        sorted
    }

    fn entry_mut(&mut self, airline: AirlineId, lookup: &AirlineLookup) -> &mut ExposureEntry {
        let index = match self.positions.get(&airline) {
            Some(&index) => index,
            None => {
                let info = lookup
                    .get(airline)
                    .cloned()
                    .unwrap_or_else(AirlineInfo::unknown);
                self.entries.push(ExposureEntry::new(airline, info));
                let index = self.entries.len() - 1;
                self.positions.insert(airline, index);
                index
            }
        };
        &mut self.entries[index]
    }
}

/// Aggregate per-airline route exposure over the affected airports.
pub fn build_exposure_report(
    index: &AdjacencyIndex,
    affected_airports: &[AffectedAirport],
    airlines: &AirlineLookup,
) -> ExposureReport {
    let mut report = ExposureReport::default();
    let mut unindexed = 0usize;

    for airport in affected_airports {
        let Some(tally) = index.airlines_at(airport.airport_id) else {
            unindexed += 1;
            continue;
        };
        for (&airline, &count) in tally {
            report.entry_mut(airline, airlines).affected_route_count += u64::from(count);
        }
    }

    debug!(
        affected_airports = affected_airports.len(),
        unindexed_airports = unindexed,
        airlines = report.len(),
        "built exposure report"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_adjacency_index;
    use crate::records::RouteRecord;

    fn affected(id: i64) -> AffectedAirport {
        AffectedAirport {
            airport_id: id,
            longitude: 0.0,
            latitude: 0.0,
            exposure_count: 1,
        }
    }

    #[test]
    fn missing_airline_uses_unknown_descriptor() {
        let index = build_adjacency_index(&[RouteRecord::new(9, 1, 2)]);
        let report = build_exposure_report(&index, &[affected(1)], &AirlineLookup::new());
        let entry = report.get(9).expect("airline 9 reported");
        assert_eq!(entry.name, "Unknown");
        assert_eq!(entry.alias, "-");
        assert_eq!(entry.affected_route_count, 1);
    }

    #[test]
    fn unindexed_airport_is_skipped() {
        let index = build_adjacency_index(&[RouteRecord::new(9, 1, 2)]);
        let report = build_exposure_report(&index, &[affected(77)], &AirlineLookup::new());
        assert!(report.is_empty());
    }

    #[test]
    fn serializes_as_entry_list() {
        let index = build_adjacency_index(&[RouteRecord::new(3, 1, 2)]);
        let lookup: AirlineLookup = [(3, AirlineInfo::new("Aer Lingus", "EI"))]
            .into_iter()
            .collect();
        let report = build_exposure_report(&index, &[affected(1)], &lookup);
        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json[0]["name"], "Aer Lingus");
        assert_eq!(json[0]["affected_route_count"], 1);
    }
}
