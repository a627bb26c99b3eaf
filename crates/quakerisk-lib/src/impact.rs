//! Earthquake impact areas and the airport spatial join.
//!
//! An impact model turns an earthquake's magnitude into a radius; the area is
//! then a [`GeoDisc`] around the epicentre. Two models are provided:
//!
//! - [`MagnitudeScaledCircle`] (default): `10 ^ (magnitude / 2.76 - 0.55)` km,
//!   64 vertices.
//! - [`FixedMultiplierBuffer`] (legacy): `magnitude * 50` km, 32 vertices.
//!
//! Containment is boundary-inclusive. Earthquakes with a missing, non-positive
//! or non-finite magnitude produce no impact area and match nothing.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use geo::Point;

use crate::geometry::{is_valid_position, GeoDisc};
use crate::records::{AirportId, AirportRecord, EarthquakeRecord};

/// Vertex count for magnitude-scaled circles.
pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Vertex count for the legacy buffered disc.
pub const DEFAULT_BUFFER_STEPS: usize = 32;

/// Kilometres of radius per unit of magnitude in the legacy model.
pub const DEFAULT_KM_PER_MAGNITUDE: f64 = 50.0;

/// Strategy mapping an earthquake to the region it endangers.
pub trait ImpactModel: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Impact radius in kilometres for a positive, finite magnitude.
    fn radius_km(&self, magnitude: f64) -> f64;

    /// Number of polygon vertices used to approximate the disc.
    fn steps(&self) -> usize;

    /// Impact area for one earthquake, or `None` when it is degenerate.
    fn impact_area(&self, quake: &EarthquakeRecord) -> Option<ImpactArea> {
        let magnitude = quake.magnitude.filter(|m| m.is_finite() && *m > 0.0)?;
        let radius_km = self.radius_km(magnitude);
        let disc = GeoDisc::new(quake.epicentre(), radius_km, self.steps())?;
        Some(ImpactArea { disc })
    }
}

/// Magnitude-scaled geodesic circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeScaledCircle {
    pub steps: usize,
}

impl Default for MagnitudeScaledCircle {
    fn default() -> Self {
        Self {
            steps: DEFAULT_CIRCLE_STEPS,
        }
    }
}

impl ImpactModel for MagnitudeScaledCircle {
    fn name(&self) -> &'static str {
        "magnitude-scaled"
    }

    fn radius_km(&self, magnitude: f64) -> f64 {
        10f64.powf(magnitude / 2.76 - 0.55)
    }

    fn steps(&self) -> usize {
        self.steps
    }
}

/// Legacy buffer with a radius proportional to magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMultiplierBuffer {
    pub km_per_magnitude: f64,
    pub steps: usize,
}

impl Default for FixedMultiplierBuffer {
    fn default() -> Self {
        Self {
            km_per_magnitude: DEFAULT_KM_PER_MAGNITUDE,
            steps: DEFAULT_BUFFER_STEPS,
        }
    }
}

impl ImpactModel for FixedMultiplierBuffer {
    fn name(&self) -> &'static str {
        "fixed-multiplier"
    }

    fn radius_km(&self, magnitude: f64) -> f64 {
        magnitude * self.km_per_magnitude
    }

    fn steps(&self) -> usize {
        self.steps
    }
}

/// Selector for the built-in impact models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactModelKind {
    #[default]
    MagnitudeScaled,
    FixedMultiplier,
}

impl fmt::Display for ImpactModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ImpactModelKind::MagnitudeScaled => "magnitude-scaled",
            ImpactModelKind::FixedMultiplier => "fixed-multiplier",
        };
        f.write_str(value)
    }
}

impl FromStr for ImpactModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "magnitude-scaled" | "a" => Ok(ImpactModelKind::MagnitudeScaled),
            "fixed-multiplier" | "b" => Ok(ImpactModelKind::FixedMultiplier),
            other => Err(format!(
                "unknown impact model '{other}'; expected magnitude-scaled or fixed-multiplier"
            )),
        }
    }
}

/// Computed impact region of one earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactArea {
    pub disc: GeoDisc,
}

impl ImpactArea {
    pub fn epicentre(&self) -> Point {
        self.disc.center()
    }

    pub fn radius_km(&self) -> f64 {
        self.disc.radius_km()
    }

    /// Whether `point` lies inside the area (boundary included), including
    /// across the antimeridian.
    pub fn contains(&self, point: &Point) -> bool {
        self.disc.contains(point)
    }
}

/// Airport with at least one earthquake whose impact area contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedAirport {
    pub airport_id: AirportId,
    pub longitude: f64,
    pub latitude: f64,
    pub exposure_count: u32,
}

/// Impact areas for all non-degenerate earthquakes, in input order.
pub fn impact_areas<M>(earthquakes: &[EarthquakeRecord], model: &M) -> Vec<ImpactArea>
where
    M: ImpactModel + ?Sized,
{
    earthquakes
        .iter()
        .filter_map(|quake| model.impact_area(quake))
        .collect()
}

/// Determine which airports fall inside at least one earthquake impact area.
///
/// Every (airport, earthquake) containment adds one to that airport's
/// exposure count. Airports without any hit are omitted. Output follows the
/// order airports first appear in `airports`; a repeated airport id keeps its
/// first occurrence and later duplicates are ignored.
pub fn resolve_affected_airports<M>(
    earthquakes: &[EarthquakeRecord],
    airports: &[AirportRecord],
    model: &M,
) -> Vec<AffectedAirport>
where
    M: ImpactModel + ?Sized,
{
    let areas = impact_areas(earthquakes, model);
    debug!(
        model = model.name(),
        earthquakes = earthquakes.len(),
        areas = areas.len(),
        airports = airports.len(),
        "resolving affected airports"
    );
    if areas.is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<AirportId> = HashSet::with_capacity(airports.len());
    let mut affected = Vec::new();
    for airport in airports {
        if !seen.insert(airport.id) {
            warn!(
                airport_id = airport.id,
                "duplicate airport id; keeping first occurrence"
            );
            continue;
        }

        let position = airport.position();
        if !is_valid_position(&position) {
            continue;
        }

        let exposure_count = areas.iter().filter(|area| area.contains(&position)).count() as u32;
        if exposure_count > 0 {
            affected.push(AffectedAirport {
                airport_id: airport.id,
                longitude: airport.longitude,
                latitude: airport.latitude,
                exposure_count,
            });
        }
    }
    affected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_five_radius_matches_formula() {
        let radius = MagnitudeScaledCircle::default().radius_km(5.0);
        // 10 ^ (5 / 2.76 - 0.55) = 10 ^ 1.2616
        assert!((radius - 18.26).abs() < 0.05, "got {radius}");
    }

    #[test]
    fn fixed_multiplier_radius_is_linear() {
        let model = FixedMultiplierBuffer::default();
        assert_eq!(model.radius_km(4.0), 200.0);
    }

    #[test]
    fn degenerate_magnitudes_have_no_area() {
        let model = MagnitudeScaledCircle::default();
        for magnitude in [0.0, -1.2, f64::NAN, f64::INFINITY] {
            let quake = EarthquakeRecord::new(10.0, 10.0, magnitude);
            assert!(model.impact_area(&quake).is_none(), "magnitude {magnitude}");
        }
        let mut missing = EarthquakeRecord::new(10.0, 10.0, 5.0);
        missing.magnitude = None;
        assert!(model.impact_area(&missing).is_none());
    }

    #[test]
    fn out_of_range_coordinates_never_match() {
        let model = MagnitudeScaledCircle::default();
        let quakes = vec![
            EarthquakeRecord::new(0.0, 0.0, 5.0),
            EarthquakeRecord::new(1e20, 0.0, 7.0),
        ];
        let airports = vec![
            AirportRecord::new(1, 1e20, 0.0),
            AirportRecord::new(2, 0.0, 95.0),
            AirportRecord::new(3, 0.0, 0.0),
        ];
        assert_eq!(impact_areas(&quakes, &model).len(), 1);
        let affected = resolve_affected_airports(&quakes, &airports, &model);
        assert_eq!(affected.len(), 1);
        assert_eq!(affected[0].airport_id, 3);
    }

    #[test]
    fn model_kind_parses_aliases() {
        assert_eq!(
            "fixed_multiplier".parse::<ImpactModelKind>(),
            Ok(ImpactModelKind::FixedMultiplier)
        );
        assert_eq!(
            "Magnitude-Scaled".parse::<ImpactModelKind>(),
            Ok(ImpactModelKind::MagnitudeScaled)
        );
        assert!("richter".parse::<ImpactModelKind>().is_err());
    }
}
