//! Analysis orchestration: window filter, impact resolution and exposure
//! aggregation over a loaded [`Dataset`].
//!
//! The adjacency index only depends on routes and is rebuilt when routes are
//! replaced. Everything downstream is recomputed per window. The last
//! computed inputs are kept as a [`Snapshot`] so callers driven by frequent
//! window changes can skip identical recomputations.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::adjacency::{build_adjacency_index, AdjacencyIndex};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::exposure::{build_exposure_report, ExposureReport};
use crate::impact::{resolve_affected_airports, AffectedAirport, ImpactModel};
use crate::records::{EarthquakeRecord, RouteRecord};
use crate::window::{filter_earthquakes, latest_timestamp, TimeWindow};

/// Inputs that produced the most recent assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub window: TimeWindow,
    pub feed_revision: u64,
}

/// Result of analysing one time window.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub window: TimeWindow,
    /// Earthquakes inside the window.
    pub earthquake_count: usize,
    pub affected_airports: Vec<AffectedAirport>,
    pub report: ExposureReport,
}

/// Owns the dataset, the adjacency index and the configured impact model.
pub struct RiskAnalysis {
    dataset: Dataset,
    index: AdjacencyIndex,
    config: AnalysisConfig,
    model: Box<dyn ImpactModel>,
    feed_revision: u64,
    snapshot: Option<Snapshot>,
}

impl RiskAnalysis {
    /// Validate the configuration and build the adjacency index.
    pub fn new(dataset: Dataset, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let index = build_adjacency_index(&dataset.routes);
        let model = config.impact_model();
        Ok(Self {
            dataset,
            index,
            config,
            model,
            feed_revision: 0,
            snapshot: None,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn ImpactModel {
        self.model.as_ref()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Replace the route set and rebuild the adjacency index.
    pub fn replace_routes(&mut self, routes: Vec<RouteRecord>) {
        self.index = build_adjacency_index(&routes);
        self.dataset.routes = routes;
        self.snapshot = None;
    }

    /// Replace the earthquake feed; the next assessment always recomputes.
    pub fn replace_earthquakes(&mut self, earthquakes: Vec<EarthquakeRecord>) {
        self.dataset.earthquakes = earthquakes;
        self.feed_revision += 1;
        self.snapshot = None;
    }

    /// Window of the configured lookback ending at the newest earthquake.
    pub fn latest_window(&self) -> Option<TimeWindow> {
        let end = latest_timestamp(&self.dataset.earthquakes)?;
        TimeWindow::new(end, self.config.lookback()).ok()
    }

    /// Window of the configured lookback ending at `end`.
    pub fn window_ending_at(&self, end: DateTime<Utc>) -> Result<TimeWindow> {
        TimeWindow::new(end, self.config.lookback())
    }

    /// Run the pipeline for `window`.
    pub fn assess(&self, window: &TimeWindow) -> Assessment {
        let earthquakes = filter_earthquakes(window, &self.dataset.earthquakes);
        let affected_airports =
            resolve_affected_airports(&earthquakes, &self.dataset.airports, self.model());
        let report = build_exposure_report(&self.index, &affected_airports, &self.dataset.airlines);

        info!(
            window = %window,
            model = self.model.name(),
            earthquakes = earthquakes.len(),
            affected_airports = affected_airports.len(),
            airlines = report.len(),
            "assessed exposure"
        );

        Assessment {
            window: *window,
            earthquake_count: earthquakes.len(),
            affected_airports,
            report,
        }
    }

    /// Run the pipeline unless `window` and the feed match the last snapshot.
    pub fn assess_if_changed(&mut self, window: &TimeWindow) -> Option<Assessment> {
        let candidate = Snapshot {
            window: *window,
            feed_revision: self.feed_revision,
        };
        if self.snapshot == Some(candidate) {
            return None;
        }
        let assessment = self.assess(window);
        self.snapshot = Some(candidate);
        Some(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::AirportRecord;

    fn is_send_sync<T: Send + Sync>() {}

    #[test]
    fn analysis_is_thread_safe() {
        is_send_sync::<RiskAnalysis>();
    }

    #[test]
    fn unchanged_inputs_are_not_recomputed() {
        let dataset = Dataset {
            routes: vec![RouteRecord::new(1, 10, 20)],
            airports: vec![AirportRecord::new(10, 0.0, 0.0)],
            earthquakes: vec![EarthquakeRecord::new(0.0, 0.0, 5.0).at_millis(1_000)],
            ..Dataset::default()
        };
        let mut analysis = RiskAnalysis::new(dataset, AnalysisConfig::default()).expect("valid");
        let window = analysis.latest_window().expect("feed has timestamps");

        let first = analysis.assess_if_changed(&window).expect("first run computes");
        assert_eq!(first.affected_airports.len(), 1);
        assert!(analysis.assess_if_changed(&window).is_none());

        analysis.replace_earthquakes(Vec::new());
        let after = analysis
            .assess_if_changed(&window)
            .expect("new feed recomputes");
        assert!(after.affected_airports.is_empty());
        assert!(after.report.is_empty());
    }
}
