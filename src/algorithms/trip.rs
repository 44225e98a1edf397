//! Trip distance/time accumulation
//!
//! The accumulator only counts motion above a speed threshold, and only once
//! a few fixes have been seen, so that the first noisy fixes after the
//! location lock are discarded. Measurement (re)starts at the moment a fast
//! fix arrives with exactly `min_updates` fixes seen.
//!
//! The warm-up counter advances on every fix, fast or slow, and is only
//! cleared by an explicit [`TripState::reset`]. After warm-up a slow period
//! therefore does not restart measurement: the next fast fix accumulates
//! against whatever fix came last.

use serde::{Deserialize, Serialize};

use crate::algorithms::geodesy::{distance_km_with, DistanceModel};
use crate::core::constants::{MILLIS_PER_SECOND, MIN_UPDATES, MPS_TO_KMH, SPEED_THRESHOLD_KMH};
use crate::core::PositionFix;

/// Tunables of the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    /// Speed (km/h) a fix must exceed to count as motion
    pub speed_threshold_kmh: f64,
    /// Fixes seen before measurement starts
    pub min_updates: u32,
    /// Earth model for leg distances
    pub distance_model: DistanceModel,
}

impl Default for TripParameters {
    fn default() -> Self {
        Self {
            speed_threshold_kmh: SPEED_THRESHOLD_KMH,
            min_updates: MIN_UPDATES,
            distance_model: DistanceModel::default(),
        }
    }
}

/// Phase of the accumulator, derived from its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripPhase {
    /// No fix above the threshold since the last reset
    Idle,
    /// Motion seen, still discarding warm-up fixes
    WarmingUp,
    /// Accumulating distance and time
    Tracking,
}

/// What a single fix did to the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixDisposition {
    /// At or below the speed threshold, nothing accumulated
    BelowThreshold,
    /// Fast, but still inside the warm-up window
    WarmingUp,
    /// Distance and time zeroed, measurement starts from this fix
    MeasurementStarted,
    /// Leg distance and time added
    Accumulated,
}

/// Accumulated trip figures
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripState {
    /// Distance travelled since measurement start (meters)
    pub distance_meters: f64,
    /// Time spent moving since measurement start (milliseconds)
    pub elapsed_millis: i64,
    /// Fixes seen since the last reset
    pub updates_seen: u32,
    pub max_speed_kmh: f64,
    pub avg_speed_kmh: f64,
    /// Speed of the most recent fix (km/h)
    pub current_speed_kmh: f64,
    /// Whether any fix exceeded the threshold since the last reset
    #[serde(default)]
    pub motion_seen: bool,
    pub last_fix: Option<PositionFix>,
}

/// Outcome of processing one fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripUpdate {
    pub speed_kmh: f64,
    pub disposition: FixDisposition,
    /// Phase after the fix was applied
    pub phase: TripPhase,
    /// Distance added by this fix (meters)
    pub leg_distance_meters: f64,
    /// Time added by this fix (milliseconds)
    pub leg_elapsed_millis: i64,
}

impl TripState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, params: &TripParameters) -> TripPhase {
        if !self.motion_seen {
            TripPhase::Idle
        } else if self.updates_seen <= params.min_updates {
            TripPhase::WarmingUp
        } else {
            TripPhase::Tracking
        }
    }

    /// Clear the accumulated figures, as on a user reset.
    ///
    /// The last fix is kept, so the next leg after warm-up is measured from it.
    pub fn reset(&mut self) {
        self.distance_meters = 0.0;
        self.elapsed_millis = 0;
        self.updates_seen = 0;
        self.max_speed_kmh = 0.0;
        self.avg_speed_kmh = 0.0;
        self.motion_seen = false;
    }

    /// Apply `fix` in place
    pub fn apply(&mut self, fix: &PositionFix, params: &TripParameters) -> TripUpdate {
        let speed_kmh = fix.speed_kmh();
        let mut disposition = FixDisposition::BelowThreshold;
        let mut leg_distance_meters = 0.0;
        let mut leg_elapsed_millis = 0;

        if speed_kmh > params.speed_threshold_kmh {
            self.motion_seen = true;

            if self.updates_seen == params.min_updates {
                self.distance_meters = 0.0;
                self.elapsed_millis = 0;
                disposition = FixDisposition::MeasurementStarted;
            } else if self.updates_seen > params.min_updates {
                if let Some(last) = self.last_fix {
                    leg_distance_meters = distance_km_with(&last, fix, params.distance_model) * 1000.0;
                    leg_elapsed_millis = fix.timestamp_millis - last.timestamp_millis;
                }
                self.distance_meters += leg_distance_meters;
                self.elapsed_millis += leg_elapsed_millis;
                self.avg_speed_kmh = average_speed_kmh(self.distance_meters, self.elapsed_millis);
                self.max_speed_kmh = self.max_speed_kmh.max(speed_kmh);
                disposition = FixDisposition::Accumulated;
            } else {
                disposition = FixDisposition::WarmingUp;
            }
        }

        self.current_speed_kmh = speed_kmh;
        self.last_fix = Some(*fix);
        self.updates_seen = self.updates_seen.saturating_add(1);

        TripUpdate {
            speed_kmh,
            disposition,
            phase: self.phase(params),
            leg_distance_meters,
            leg_elapsed_millis,
        }
    }
}

/// Transition function: the state after `fix`, plus what the fix did
pub fn process_fix(state: &TripState, fix: &PositionFix, params: &TripParameters) -> (TripState, TripUpdate) {
    let mut next = state.clone();
    let update = next.apply(fix, params);
    (next, update)
}

/// Average speed in km/h; zero when no time has elapsed
pub fn average_speed_kmh(distance_meters: f64, elapsed_millis: i64) -> f64 {
    if elapsed_millis == 0 {
        return 0.0;
    }
    distance_meters / elapsed_millis as f64 * MILLIS_PER_SECOND as f64 * MPS_TO_KMH
}
