//! Engine surface consumed by hosting applications
//!
//! The engine is driven through a single sequential path; observers and
//! formatting helpers turn its outputs into what the presentation layer shows.

pub mod engine;
pub mod formatting;
pub mod types;

pub use engine::KinematicsEngine;
pub use formatting::{
    format_bearing, format_clock_time, format_distance, format_distance_km, format_elapsed,
    format_speed, PointReadout, TripReadout,
};
pub use types::{CallbackHandle, FixOutputs, UpdateCallback};
