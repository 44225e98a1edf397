//! Physical constants and tracking parameters

/// Conversion factor from meters per second to kilometers per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Speed (km/h) at or below which a fix does not count as motion
pub const SPEED_THRESHOLD_KMH: f64 = 4.0;

/// Fixes discarded after motion starts while location accuracy settles
pub const MIN_UPDATES: u32 = 3;

/// Interval between location updates requested from the provider (milliseconds)
pub const LOCATION_INTERVAL_MS: u64 = 1000;

pub const MILLIS_PER_SECOND: i64 = 1000;
pub const MILLIS_PER_MINUTE: i64 = MILLIS_PER_SECOND * 60;
pub const MILLIS_PER_HOUR: i64 = MILLIS_PER_MINUTE * 60;
pub const MILLIS_PER_DAY: i64 = MILLIS_PER_HOUR * 24;

/// Width of one compass-rose sector (degrees)
pub const BEARING_SEGMENT: i32 = 45;

/// Relative bearing reported when the direction cannot be determined
pub const UNKNOWN_BEARING: i32 = -1;
