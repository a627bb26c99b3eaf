//! Plain-text table renderers.

use std::io::{self, Write};

use crate::output::{AirportTallyView, AirportsView, IndexSummaryView, ReportView, WindowView};
use crate::terminal::{group_thousands, ColorPalette};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn write_header<W: Write>(
    out: &mut W,
    p: &ColorPalette,
    model: &str,
    window: &WindowView,
    earthquakes: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Window:{} {} .. {} ({}h)",
        p.accent,
        p.reset,
        window.start.format(TIME_FORMAT),
        window.end.format(TIME_FORMAT),
        window.lookback_hours
    )?;
    writeln!(
        out,
        "{}Model:{} {}   {}Earthquakes:{} {}",
        p.accent, p.reset, model, p.accent, p.reset, earthquakes
    )
}

/// Render the ranked airline exposure table.
pub fn render_report<W: Write>(out: &mut W, view: &ReportView, p: &ColorPalette) -> io::Result<()> {
    write_header(out, p, &view.model, &view.window, view.earthquakes)?;
    writeln!(
        out,
        "Affected airports: {}   Affected routes: {}",
        view.affected_airports,
        group_thousands(view.total_affected_routes)
    )?;
    writeln!(out)?;

    if view.airlines.is_empty() {
        writeln!(out, "No airline routes touch an affected airport.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{}{:>4}  {:>8}  {:<32} {:<8} {:>8}{}",
        p.heading, "Rank", "Airline", "Name", "Alias", "Routes", p.reset
    )?;
    let max = view
        .airlines
        .iter()
        .map(|row| row.affected_route_count)
        .max()
        .unwrap_or(0);
    for row in &view.airlines {
        writeln!(
            out,
            "{:>4}  {}{:>8}{}  {:<32} {:<8} {}{:>8}{}",
            row.rank,
            p.muted,
            row.airline_id,
            p.reset,
            row.name,
            row.alias,
            p.exposure(row.affected_route_count, max),
            group_thousands(row.affected_route_count),
            p.reset
        )?;
    }
    Ok(())
}

/// Render the affected airport table.
pub fn render_airports<W: Write>(
    out: &mut W,
    view: &AirportsView,
    p: &ColorPalette,
) -> io::Result<()> {
    write_header(out, p, &view.model, &view.window, view.earthquakes)?;
    writeln!(out)?;

    if view.airports.is_empty() {
        writeln!(out, "No airports inside an impact area.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{}{:>8}  {:<36} {:<16} {:>11} {:>10} {:>6} {:>7}{}",
        p.heading, "Airport", "Name", "City", "Longitude", "Latitude", "Hits", "Routes", p.reset
    )?;
    let max = view
        .airports
        .iter()
        .map(|row| u64::from(row.exposure_count))
        .max()
        .unwrap_or(0);
    for row in &view.airports {
        writeln!(
            out,
            "{}{:>8}{}  {:<36} {:<16} {:>11.4} {:>10.4} {}{:>6}{} {:>7}",
            p.muted,
            row.airport_id,
            p.reset,
            row.name,
            row.city,
            row.longitude,
            row.latitude,
            p.exposure(u64::from(row.exposure_count), max),
            row.exposure_count,
            p.reset,
            group_thousands(row.route_endpoints)
        )?;
    }
    Ok(())
}

/// Render the adjacency index summary.
pub fn render_index_summary<W: Write>(
    out: &mut W,
    view: &IndexSummaryView,
    p: &ColorPalette,
) -> io::Result<()> {
    writeln!(out, "{}Adjacency index{}", p.heading, p.reset)?;
    writeln!(out, "  Airports:        {}", group_thousands(view.airports as u64))?;
    writeln!(out, "  Airlines:        {}", group_thousands(view.airlines as u64))?;
    writeln!(
        out,
        "  Route endpoints: {}",
        group_thousands(view.route_endpoints)
    )
}

/// Render the per-airline tally of one airport.
pub fn render_airport_tally<W: Write>(
    out: &mut W,
    view: &AirportTallyView,
    p: &ColorPalette,
) -> io::Result<()> {
    let name = view.name.as_deref().unwrap_or("<unknown>");
    writeln!(
        out,
        "{}{}{} {}({}){} - {} routes",
        p.heading,
        name,
        p.reset,
        p.muted,
        view.airport_id,
        p.reset,
        group_thousands(view.total_routes)
    )?;
    if view.airlines.is_empty() {
        writeln!(out, "No routes touch this airport.")?;
        return Ok(());
    }
    for row in &view.airlines {
        writeln!(
            out,
            "  {}{:>8}{}  {:<32} {:<8} {:>6}",
            p.muted, row.airline_id, p.reset, row.name, row.alias, row.route_count
        )?;
    }
    Ok(())
}
