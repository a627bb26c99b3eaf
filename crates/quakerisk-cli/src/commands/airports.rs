//! Affected airport listing.

use anyhow::Result;

use quakerisk_cli::output::{text, AirportsView};

use super::{emit, resolve_window, GlobalOptions, WindowArgs};

/// Handle the airports subcommand.
pub fn handle_airports(options: &GlobalOptions, args: &WindowArgs) -> Result<()> {
    let analysis = options.load_analysis(args.lookback_hours)?;
    let window = resolve_window(&analysis, args.at)?;
    let assessment = analysis.assess(&window);
    let view = AirportsView::new(
        analysis.model().name(),
        &assessment,
        analysis.dataset(),
        analysis.index(),
    );
    emit(options.format, &view, text::render_airports)
}
