//! Subcommand handlers and the option plumbing they share.
//!
//! `main.rs` parses arguments and dispatches; each handler loads the dataset,
//! runs the analysis and renders one view.

pub mod airports;
pub mod index;
pub mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tracing::warn;

use quakerisk_cli::output::{write_json, OutputFormat};
use quakerisk_cli::terminal::ColorPalette;
use quakerisk_lib::{AnalysisConfig, Dataset, DatasetPaths, ImpactModelKind, RiskAnalysis, TimeWindow};

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Directory holding routes.csv, airports.csv, airlines.csv and
    /// earthquakes.geojson (defaults to the current directory).
    #[arg(long, global = true, env = "QUAKERISK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the route table path.
    #[arg(long, global = true)]
    pub routes: Option<PathBuf>,

    /// Override the airport table path.
    #[arg(long, global = true)]
    pub airports: Option<PathBuf>,

    /// Override the airline table path.
    #[arg(long, global = true)]
    pub airlines: Option<PathBuf>,

    /// Override the earthquake feed path.
    #[arg(long, global = true)]
    pub earthquakes: Option<PathBuf>,

    /// Impact model: magnitude-scaled or fixed-multiplier.
    #[arg(long, global = true)]
    pub model: Option<ImpactModelKind>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// JSON analysis configuration; command-line flags take precedence.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Time window selection shared by the analysis subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// End of the window as RFC 3339 (defaults to the newest earthquake).
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// Width of the window in hours.
    #[arg(long)]
    pub lookback_hours: Option<i64>,
}

impl GlobalOptions {
    /// Resolve the four input paths, applying per-file overrides.
    pub fn dataset_paths(&self) -> DatasetPaths {
        let dir = self.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut paths = DatasetPaths::in_dir(&dir);
        if let Some(path) = &self.routes {
            paths.routes = path.clone();
        }
        if let Some(path) = &self.airports {
            paths.airports = path.clone();
        }
        if let Some(path) = &self.airlines {
            paths.airlines = path.clone();
        }
        if let Some(path) = &self.earthquakes {
            paths.earthquakes = path.clone();
        }
        paths
    }

    /// Build the analysis configuration from `--config` and flag overrides.
    pub fn analysis_config(&self, lookback_hours: Option<i64>) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_path(path)
                .with_context(|| format!("failed to read configuration {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(hours) = lookback_hours {
            config = config.with_lookback_hours(hours);
        }
        Ok(config)
    }

    /// Load the dataset and prepare the analysis.
    pub fn load_analysis(&self, lookback_hours: Option<i64>) -> Result<RiskAnalysis> {
        let config = self.analysis_config(lookback_hours)?;
        let paths = self.dataset_paths();
        let dataset = Dataset::load(&paths).context("failed to load input data")?;
        RiskAnalysis::new(dataset, config).context("invalid analysis configuration")
    }
}

/// Resolve the window to analyse.
///
/// Without `--at` the window ends at the newest earthquake; a feed without
/// timestamps falls back to the current time.
pub fn resolve_window(analysis: &RiskAnalysis, at: Option<DateTime<Utc>>) -> Result<TimeWindow> {
    if let Some(end) = at {
        return analysis
            .window_ending_at(end)
            .context("invalid time window");
    }
    if let Some(window) = analysis.latest_window() {
        return Ok(window);
    }
    warn!("earthquake feed has no timestamps; window ends now");
    analysis
        .window_ending_at(Utc::now())
        .context("invalid time window")
}

/// Write a view to stdout in the selected format.
pub fn emit<T, F>(format: OutputFormat, view: &T, render_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut io::StdoutLock<'static>, &T, &ColorPalette) -> io::Result<()>,
{
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut stdout, view),
        OutputFormat::Text => render_text(&mut stdout, view, &ColorPalette::detect()),
    }
    .context("failed to write output")?;
    stdout.flush().context("failed to flush output")
}
