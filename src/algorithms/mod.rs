//! Kinematics algorithms

pub mod geodesy;
pub mod proximity;
pub mod trip;

pub use geodesy::{
    bearing_arrow, distance_and_bearing, distance_km, distance_km_with, initial_bearing_degrees,
    relative_bearing, Arrow, DistanceAndBearing, DistanceModel,
};
pub use proximity::{rank_by_proximity, rank_by_proximity_with, traffic_lights};
pub use trip::{
    average_speed_kmh, process_fix, FixDisposition, TripParameters, TripPhase, TripState, TripUpdate,
};
