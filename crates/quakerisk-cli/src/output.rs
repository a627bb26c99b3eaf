//! Output views for the analysis subcommands.
//!
//! Views are serializable snapshots of library results, so the text and
//! JSON renderers share one shape.

pub mod text;

use std::collections::BTreeSet;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use quakerisk_lib::{
    AdjacencyIndex, AirlineId, AirlineInfo, AirportId, Assessment, Dataset, TimeWindow,
};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Bounds of the analysed time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowView {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub lookback_hours: i64,
}

impl From<&TimeWindow> for WindowView {
    fn from(window: &TimeWindow) -> Self {
        Self {
            start: window.start(),
            end: window.end(),
            lookback_hours: window.lookback().num_hours(),
        }
    }
}

/// One ranked line of the airline exposure report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineRow {
    pub rank: usize,
    pub airline_id: AirlineId,
    pub name: String,
    pub alias: String,
    pub affected_route_count: u64,
}

/// Airline exposure report for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub model: String,
    pub window: WindowView,
    pub earthquakes: usize,
    pub affected_airports: usize,
    /// Total over every airline, including rows cut by `--limit`.
    pub total_affected_routes: u64,
    pub airlines: Vec<AirlineRow>,
}

impl ReportView {
    pub fn new(model: &str, assessment: &Assessment, limit: Option<usize>) -> Self {
        let airlines = assessment
            .report
            .sorted_by_risk()
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(i, entry)| AirlineRow {
                rank: i + 1,
                airline_id: entry.airline_id,
                name: entry.name.clone(),
                alias: entry.display_alias().to_string(),
                affected_route_count: entry.affected_route_count,
            })
            .collect();

        Self {
            model: model.to_string(),
            window: WindowView::from(&assessment.window),
            earthquakes: assessment.earthquake_count,
            affected_airports: assessment.affected_airports.len(),
            total_affected_routes: assessment.report.total_affected_routes(),
            airlines,
        }
    }
}

/// One affected airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportRow {
    pub airport_id: AirportId,
    pub name: String,
    pub city: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Number of impact areas containing the airport.
    pub exposure_count: u32,
    /// Route endpoints at the airport across all airlines.
    pub route_endpoints: u64,
}

/// Affected airports for one window, in airport input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportsView {
    pub model: String,
    pub window: WindowView,
    pub earthquakes: usize,
    pub airports: Vec<AirportRow>,
}

impl AirportsView {
    pub fn new(
        model: &str,
        assessment: &Assessment,
        dataset: &Dataset,
        index: &AdjacencyIndex,
    ) -> Self {
        let airports = assessment
            .affected_airports
            .iter()
            .map(|affected| {
                let record = dataset.airport(affected.airport_id);
                AirportRow {
                    airport_id: affected.airport_id,
                    name: record.map(|a| a.name.clone()).unwrap_or_default(),
                    city: record.map(|a| a.city.clone()).unwrap_or_default(),
                    longitude: affected.longitude,
                    latitude: affected.latitude,
                    exposure_count: affected.exposure_count,
                    route_endpoints: index.total_at(affected.airport_id),
                }
            })
            .collect();

        Self {
            model: model.to_string(),
            window: WindowView::from(&assessment.window),
            earthquakes: assessment.earthquake_count,
            airports,
        }
    }
}

/// Size of the adjacency index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSummaryView {
    pub airports: usize,
    pub airlines: usize,
    pub route_endpoints: u64,
}

impl IndexSummaryView {
    pub fn new(index: &AdjacencyIndex) -> Self {
        let airlines: BTreeSet<AirlineId> = index
            .iter()
            .flat_map(|(_, tally)| tally.keys().copied())
            .collect();
        Self {
            airports: index.len(),
            airlines: airlines.len(),
            route_endpoints: index.total_endpoints(),
        }
    }
}

/// Route count of one airline at one airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineTallyRow {
    pub airline_id: AirlineId,
    pub name: String,
    pub alias: String,
    pub route_count: u32,
}

/// Per-airline tally of one airport, in ascending airline id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportTallyView {
    pub airport_id: AirportId,
    pub name: Option<String>,
    pub total_routes: u64,
    pub airlines: Vec<AirlineTallyRow>,
}

impl AirportTallyView {
    pub fn new(airport_id: AirportId, dataset: &Dataset, index: &AdjacencyIndex) -> Self {
        let airlines = index
            .airlines_at(airport_id)
            .map(|tally| {
                tally
                    .iter()
                    .map(|(&airline_id, &route_count)| {
                        let info = dataset
                            .airlines
                            .get(airline_id)
                            .cloned()
                            .unwrap_or_else(AirlineInfo::unknown);
                        AirlineTallyRow {
                            airline_id,
                            alias: info.display_alias().to_string(),
                            name: info.name,
                            route_count,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            airport_id,
            name: dataset.airport(airport_id).map(|a| a.name.clone()),
            total_routes: index.total_at(airport_id),
            airlines,
        }
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}
