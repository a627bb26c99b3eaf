//! Geodesic impact discs on top of the `geo` crate.
//!
//! Coordinates are WGS84 degrees held in [`geo::Point`] (`x` is longitude,
//! `y` is latitude). Distances and disc vertices use the haversine metric on
//! a sphere of mean earth radius.
//!
//! A disc is a polygon in planar longitude/latitude space whose ring stays
//! continuous around the centre longitude, so discs crossing the antimeridian
//! do not wrap. Points are shifted into the same frame before testing. A disc
//! reaching over a pole has no such ring; containment then uses the
//! great-circle distance to the centre instead.

use geo::{BoundingRect, Coord, Destination, Distance, Haversine, Intersects, LineString, Point};
use geo::{Polygon, Rect};

/// Mean earth radius in kilometres (the radius of the haversine metric).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

const METRES_PER_KM: f64 = 1000.0;

/// Whether `point` is a finite longitude in `[-180, 180]` and latitude in
/// `[-90, 90]`.
pub fn is_valid_position(point: &Point) -> bool {
    is_valid_longitude(point.x()) && is_valid_latitude(point.y())
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}

pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

/// Great-circle distance in kilometres.
pub fn distance_km(from: Point, to: Point) -> f64 {
    Haversine.distance(from, to) / METRES_PER_KM
}

/// Point reached from `origin` after `distance_km` along the initial bearing
/// `bearing_deg` (clockwise from north), with its longitude kept within 180°
/// of the origin's.
pub fn destination(origin: Point, distance_km: f64, bearing_deg: f64) -> Point {
    let target = Haversine.destination(origin, bearing_deg, distance_km * METRES_PER_KM);
    unwrap_longitude(target, origin.x())
}

/// Shift `point` by whole turns of longitude so that it lies within 180° of
/// `reference_longitude`. Points already in range are returned unchanged.
pub fn unwrap_longitude(point: Point, reference_longitude: f64) -> Point {
    let delta = point.x() - reference_longitude;
    if (-180.0..=180.0).contains(&delta) || !delta.is_finite() {
        return point;
    }
    let longitude = (delta + 180.0).rem_euclid(360.0) - 180.0 + reference_longitude;
    Point::new(longitude, point.y())
}

/// Polygon approximation of a geodesic disc.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDisc {
    center: Point,
    radius_km: f64,
    polygon: Polygon,
    bounds: Rect,
    covers_pole: bool,
}

impl GeoDisc {
    /// Disc of `radius_km` around `center` with `steps` vertices at equal
    /// bearings.
    ///
    /// Returns `None` for an invalid centre, a non-positive or non-finite
    /// radius, or fewer than three vertices.
    pub fn new(center: Point, radius_km: f64, steps: usize) -> Option<Self> {
        if !is_valid_position(&center) || !radius_km.is_finite() || radius_km <= 0.0 || steps < 3
        {
            return None;
        }
        let ring: Vec<Coord> = (0..steps)
            .map(|i| {
                let bearing = i as f64 * 360.0 / steps as f64;
                destination(center, radius_km, bearing).0
            })
            .collect();
        let polygon = Polygon::new(LineString::from(ring), Vec::new());
        let bounds = polygon.bounding_rect()?;

        Some(Self {
            center,
            radius_km,
            polygon,
            bounds,
            covers_pole: reaches_pole(center, radius_km),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Ring vertices without the closing repeat of the first one.
    pub fn vertices(&self) -> &[Coord] {
        let coords = &self.polygon.exterior().0;
        &coords[..coords.len().saturating_sub(1)]
    }

    /// Whether the disc reaches over the north or south pole.
    pub fn covers_pole(&self) -> bool {
        self.covers_pole
    }

    /// Boundary-inclusive containment test.
    pub fn contains(&self, point: &Point) -> bool {
        if !point.x().is_finite() || !is_valid_latitude(point.y()) {
            return false;
        }
        if self.covers_pole {
            return distance_km(self.center, *point) <= self.radius_km;
        }
        let local = unwrap_longitude(*point, self.center.x());
        self.bounds.intersects(&local.0) && self.polygon.intersects(&local.0)
    }
}

/// A disc covers a pole when its angular radius reaches the pole's angular
/// distance from the centre.
fn reaches_pole(center: Point, radius_km: f64) -> bool {
    let angular_radius = (radius_km / EARTH_RADIUS_KM).to_degrees();
    angular_radius >= 90.0 - center.y().abs()
}
