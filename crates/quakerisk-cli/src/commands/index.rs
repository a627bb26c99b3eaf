//! Adjacency index inspection.

use anyhow::Result;
use clap::Args;

use quakerisk_cli::output::{text, AirportTallyView, IndexSummaryView};
use quakerisk_lib::AirportId;

use super::{emit, GlobalOptions};

/// Arguments for the index subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Show the per-airline tally of one airport instead of the summary.
    #[arg(long)]
    pub airport: Option<AirportId>,
}

/// Handle the index subcommand.
pub fn handle_index(options: &GlobalOptions, args: &IndexArgs) -> Result<()> {
    let analysis = options.load_analysis(None)?;
    match args.airport {
        Some(airport_id) => {
            let view = AirportTallyView::new(airport_id, analysis.dataset(), analysis.index());
            emit(options.format, &view, text::render_airport_tally)
        }
        None => {
            let view = IndexSummaryView::new(analysis.index());
            emit(options.format, &view, text::render_index_summary)
        }
    }
}
