//! Location Kinematics Engine
//!
//! Turns a stream of position fixes into the figures a speed tracker and a
//! proximity list display: great-circle distance and bearing, bearings
//! relative to the device heading, trip distance/time above a motion
//! threshold, and running maximum/average speed.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod provider;
pub mod api;
pub mod logging;

// Re-export commonly used types
pub use self::core::{Coordinate, GeoPoint, PointOfInterest, PositionFix, MIN_UPDATES, SPEED_THRESHOLD_KMH};
pub use algorithms::{
    bearing_arrow, distance_km, initial_bearing_degrees, process_fix, rank_by_proximity, relative_bearing,
    traffic_lights, Arrow, DistanceModel, TripParameters, TripPhase, TripState, TripUpdate,
};
pub use api::{format_elapsed, FixOutputs, KinematicsEngine, PointReadout, TripReadout};
pub use provider::{LocationProvider, ReplayProvider};
pub use utils::{ChimeSettings, ConfigurationManager, EngineConfig, NoteRecord, SettingsStore};
pub use validation::{KinematicsError, Result};
