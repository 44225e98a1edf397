//! Core data types for the kinematics engine

use serde::{Deserialize, Serialize};

use crate::core::constants::MPS_TO_KMH;

/// Anything that carries a WGS84 latitude/longitude pair in degrees
pub trait GeoPoint {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

/// Plain geodetic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl GeoPoint for Coordinate {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Single position/velocity sample reported by the location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Fix time (milliseconds since epoch)
    pub timestamp_millis: i64,
    /// Instantaneous speed (m/s)
    #[serde(default)]
    pub speed_mps: f32,
    /// Direction of travel (degrees from north), negative when unknown
    #[serde(default = "unknown_heading")]
    pub heading_degrees: f32,
}

fn unknown_heading() -> f32 {
    -1.0
}

impl PositionFix {
    /// Create a stationary fix with unknown heading
    pub fn new(latitude: f64, longitude: f64, timestamp_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_millis,
            speed_mps: 0.0,
            heading_degrees: unknown_heading(),
        }
    }

    pub fn with_speed(mut self, speed_mps: f32) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    pub fn with_heading(mut self, heading_degrees: f32) -> Self {
        self.heading_degrees = heading_degrees;
        self
    }

    /// Instantaneous speed converted to km/h
    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps as f64 * MPS_TO_KMH
    }

    pub fn has_heading(&self) -> bool {
        self.heading_degrees >= 0.0
    }
}

impl GeoPoint for PositionFix {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Stationary point the device is ranked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Distance from the latest fix (kilometers)
    #[serde(default)]
    pub distance_km: f64,
    /// Bearing relative to the device heading (0-359 degrees)
    #[serde(default)]
    pub bearing_degrees: i32,
}

impl PointOfInterest {
    /// Longitude comes first, as the point lists are written.
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            name: name.into(),
            longitude,
            latitude,
            distance_km: 0.0,
            bearing_degrees: 0,
        }
    }
}

impl GeoPoint for PointOfInterest {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}
