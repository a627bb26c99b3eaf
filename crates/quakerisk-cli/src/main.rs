mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::airports::handle_airports;
use commands::index::{handle_index, IndexArgs};
use commands::report::{handle_report, ReportArgs};
use commands::{GlobalOptions, WindowArgs};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Earthquake exposure analysis for airline route networks"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank airlines by the number of routes touching affected airports.
    Report(ReportArgs),
    /// List airports inside at least one earthquake impact area.
    Airports(WindowArgs),
    /// Summarize the airport/airline adjacency index.
    Index(IndexArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Report(args) => handle_report(&cli.global, args),
        Command::Airports(args) => handle_airports(&cli.global, args),
        Command::Index(args) => handle_index(&cli.global, args),
    }
}

/// Install the tracing subscriber on stderr so stdout stays machine-readable.
///
/// `RUST_LOG` selects the filter (default `info`); `LOG_FORMAT=json` switches
/// to JSON lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let _ = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}
