//! Display strings for the presentation layer
//!
//! Everything here is a pure function from engine values to text; how the
//! text is laid out on screen is up to the caller.

use serde::{Deserialize, Serialize};

use crate::algorithms::geodesy::bearing_arrow;
use crate::algorithms::trip::TripState;
use crate::core::constants::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::core::PointOfInterest;

/// Shown when an elapsed time cannot be rendered
pub const ELAPSED_PLACEHOLDER: &str = "--";

/// Render an elapsed time as `H:MM:SS`, `Mmin SSs` or `Ss`.
///
/// Components are truncated, not rounded. Negative input renders as
/// [`ELAPSED_PLACEHOLDER`].
pub fn format_elapsed(millis: i64) -> String {
    if millis < 0 {
        return ELAPSED_PLACEHOLDER.to_string();
    }

    let hours = millis / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}min {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Speed with one decimal and at least two integer digits, e.g. `05.4`
pub fn format_speed(kmh: f64) -> String {
    format!("{:04.1}", kmh)
}

/// Whole meters below one kilometer, otherwise kilometers with two decimals
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0}m", meters)
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

pub fn format_distance_km(km: f64) -> String {
    format!("{:.2}km", km)
}

/// Arrow followed by the relative bearing in degrees, e.g. `↗ (45)`
pub fn format_bearing(relative_bearing: i32) -> String {
    format!("{} ({})", bearing_arrow(relative_bearing), relative_bearing)
}

/// Wall-clock time as `HH:MM`
pub fn format_clock_time(hour: u32, min: u32) -> String {
    format!("{:02}:{:02}", hour, min)
}

/// One row of the proximity list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointReadout {
    pub name: String,
    pub distance: String,
    pub bearing: String,
}

impl From<&PointOfInterest> for PointReadout {
    fn from(point: &PointOfInterest) -> Self {
        Self {
            name: point.name.clone(),
            distance: format_distance_km(point.distance_km),
            bearing: format_bearing(point.bearing_degrees),
        }
    }
}

/// The tracker screen: current, maximum and average speed, distance and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripReadout {
    pub speed: String,
    pub distance: String,
    pub time: String,
    pub max_speed: String,
    pub avg_speed: String,
}

impl From<&TripState> for TripReadout {
    fn from(state: &TripState) -> Self {
        Self {
            speed: format_speed(state.current_speed_kmh),
            distance: format_distance(state.distance_meters),
            time: format_elapsed(state.elapsed_millis),
            max_speed: format_speed(state.max_speed_kmh),
            avg_speed: format_speed(state.avg_speed_kmh),
        }
    }
}
