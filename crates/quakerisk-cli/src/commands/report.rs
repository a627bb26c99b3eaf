//! Airline exposure report.

use anyhow::Result;
use clap::Args;

use quakerisk_cli::output::{text, ReportView};

use super::{emit, resolve_window, GlobalOptions, WindowArgs};

/// Arguments for the report subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Show only the N most exposed airlines.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Handle the report subcommand.
pub fn handle_report(options: &GlobalOptions, args: &ReportArgs) -> Result<()> {
    let analysis = options.load_analysis(args.window.lookback_hours)?;
    let window = resolve_window(&analysis, args.window.at)?;
    let assessment = analysis.assess(&window);
    let view = ReportView::new(analysis.model().name(), &assessment, args.limit);
    emit(options.format, &view, text::render_report)
}
