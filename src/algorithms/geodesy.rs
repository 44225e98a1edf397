//! Distance and bearing between geodetic points
//!
//! Two earth models are supported. The ellipsoidal model solves the inverse
//! geodesic problem on the WGS84 ellipsoid (Karney's algorithm, via
//! `geo::Geodesic`). The spherical model uses the Haversine formula on a
//! sphere of mean Earth radius.

use std::fmt;

use geo::{Bearing, Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::core::constants::{BEARING_SEGMENT, UNKNOWN_BEARING};
use crate::core::GeoPoint;

/// Earth model used for distance and bearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModel {
    /// WGS84 ellipsoid, sub-meter precision
    #[default]
    Ellipsoidal,
    /// Sphere of mean Earth radius
    Spherical,
}

/// Result of an inverse geodesic computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceAndBearing {
    /// Distance along the surface (meters)
    pub distance_m: f64,
    /// Initial compass bearing at the start point, in [0, 360)
    pub initial_bearing_deg: f64,
}

fn to_point<P: GeoPoint + ?Sized>(p: &P) -> Point<f64> {
    Point::new(p.longitude(), p.latitude())
}

/// Compute distance and initial bearing from `from` to `to`.
///
/// The distance is the same value [`distance_km_with`] reports, so it is
/// exactly symmetric in the endpoints.
pub fn distance_and_bearing<A, B>(from: &A, to: &B, model: DistanceModel) -> DistanceAndBearing
where
    A: GeoPoint + ?Sized,
    B: GeoPoint + ?Sized,
{
    let bearing = match model {
        DistanceModel::Ellipsoidal => Geodesic::bearing(to_point(from), to_point(to)),
        DistanceModel::Spherical => Haversine::bearing(to_point(from), to_point(to)),
    };

    DistanceAndBearing {
        distance_m: distance_m(from, to, model),
        initial_bearing_deg: normalize_degrees(bearing),
    }
}

/// Great-circle distance in kilometers using the default earth model
pub fn distance_km<A, B>(a: &A, b: &B) -> f64
where
    A: GeoPoint + ?Sized,
    B: GeoPoint + ?Sized,
{
    distance_km_with(a, b, DistanceModel::default())
}

/// Great-circle distance in kilometers.
///
/// The endpoints are put in a canonical order first so that
/// `distance_km_with(a, b, m) == distance_km_with(b, a, m)` holds exactly,
/// not just up to floating-point noise.
pub fn distance_km_with<A, B>(a: &A, b: &B, model: DistanceModel) -> f64
where
    A: GeoPoint + ?Sized,
    B: GeoPoint + ?Sized,
{
    distance_m(a, b, model) / 1000.0
}

fn distance_m<A, B>(a: &A, b: &B, model: DistanceModel) -> f64
where
    A: GeoPoint + ?Sized,
    B: GeoPoint + ?Sized,
{
    let first = to_point(a);
    let second = to_point(b);
    if first == second {
        return 0.0;
    }
    let swap = first
        .y()
        .total_cmp(&second.y())
        .then(first.x().total_cmp(&second.x()))
        .is_gt();
    let (origin, destination) = if swap { (second, first) } else { (first, second) };

    match model {
        DistanceModel::Ellipsoidal => Geodesic::distance(origin, destination),
        DistanceModel::Spherical => Haversine::distance(origin, destination),
    }
}

/// Initial compass bearing from `from` to `to` in [0, 360)
pub fn initial_bearing_degrees<A, B>(from: &A, to: &B) -> f64
where
    A: GeoPoint + ?Sized,
    B: GeoPoint + ?Sized,
{
    distance_and_bearing(from, to, DistanceModel::default()).initial_bearing_deg
}

/// Bearing relative to the device heading, truncated to whole degrees in [0, 359].
///
/// Returns [`UNKNOWN_BEARING`] when either input is not finite.
pub fn relative_bearing(absolute_bearing: f64, device_heading: f64) -> i32 {
    if !absolute_bearing.is_finite() || !device_heading.is_finite() {
        return UNKNOWN_BEARING;
    }
    let wrapped = ((absolute_bearing - device_heading) % 360.0 + 360.0) % 360.0;
    wrapped as i32
}

/// One of the eight compass-rose directions, relative to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Ahead,
    AheadRight,
    Right,
    BehindRight,
    Behind,
    BehindLeft,
    Left,
    AheadLeft,
    Unknown,
}

impl Arrow {
    const SECTORS: [Arrow; 8] = [
        Arrow::Ahead,
        Arrow::AheadRight,
        Arrow::Right,
        Arrow::BehindRight,
        Arrow::Behind,
        Arrow::BehindLeft,
        Arrow::Left,
        Arrow::AheadLeft,
    ];

    pub fn symbol(&self) -> char {
        match self {
            Arrow::Ahead => '↑',
            Arrow::AheadRight => '↗',
            Arrow::Right => '→',
            Arrow::BehindRight => '↘',
            Arrow::Behind => '↓',
            Arrow::BehindLeft => '↙',
            Arrow::Left => '←',
            Arrow::AheadLeft => '↖',
            Arrow::Unknown => '?',
        }
    }

    /// Sector index (0 = ahead, clockwise), `None` for [`Arrow::Unknown`]
    pub fn sector(&self) -> Option<usize> {
        Self::SECTORS.iter().position(|arrow| arrow == self)
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Map a relative bearing onto a 45° compass-rose sector.
///
/// Sector `k` covers `k*45 - 22.5 <= bearing < k*45 + 22.5`, wrapping at 360.
/// Anything outside [0, 359] maps to [`Arrow::Unknown`].
pub fn bearing_arrow(relative_bearing: i32) -> Arrow {
    if !(0..360).contains(&relative_bearing) {
        return Arrow::Unknown;
    }
    // Doubled to keep the half-sector boundary in integers.
    let sector = (2 * relative_bearing + BEARING_SEGMENT) / (2 * BEARING_SEGMENT);
    Arrow::SECTORS[(sector % 8) as usize]
}

fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
