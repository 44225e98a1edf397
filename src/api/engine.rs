//! Sequential fix-processing engine
//!
//! The engine owns the trip accumulator and the latest proximity ranking and
//! is driven from a single delivery path: every mutation takes `&mut self`,
//! so fixes and user resets are naturally serialized by the caller.

use std::fmt;

use tracing::{debug, info, warn};

use crate::algorithms::proximity::rank_by_proximity_with;
use crate::algorithms::trip::{FixDisposition, TripParameters, TripPhase, TripState, TripUpdate};
use crate::api::formatting::{PointReadout, TripReadout};
use crate::api::types::{CallbackHandle, FixOutputs, UpdateCallback};
use crate::core::{PointOfInterest, PositionFix};
use crate::provider::LocationProvider;
use crate::utils::config::EngineConfig;
use crate::validation::data::validate_fix;
use crate::validation::error::Result;

pub struct KinematicsEngine {
    config: EngineConfig,
    params: TripParameters,
    trip: TripState,
    /// Latest ranking, nearest first
    points: Vec<PointOfInterest>,
    sequence_counter: u64,
    callback_counter: u32,
    callbacks: Vec<(CallbackHandle, UpdateCallback)>,
}

impl fmt::Debug for KinematicsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KinematicsEngine")
            .field("config", &self.config)
            .field("trip", &self.trip)
            .field("points", &self.points.len())
            .field("sequence_counter", &self.sequence_counter)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl KinematicsEngine {
    /// Create an engine tracking `points`, in their given order until the first fix
    pub fn new(config: EngineConfig, points: Vec<PointOfInterest>) -> Self {
        Self {
            params: config.trip_parameters(),
            config,
            trip: TripState::new(),
            points,
            sequence_counter: 0,
            callback_counter: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn trip(&self) -> &TripState {
        &self.trip
    }

    pub fn phase(&self) -> TripPhase {
        self.trip.phase(&self.params)
    }

    /// Latest proximity ranking, nearest first
    pub fn ranking(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn readout(&self) -> TripReadout {
        TripReadout::from(&self.trip)
    }

    pub fn ranking_readout(&self) -> Vec<PointReadout> {
        self.points.iter().map(PointReadout::from).collect()
    }

    /// Number of fixes accepted so far
    pub fn fixes_processed(&self) -> u64 {
        self.sequence_counter
    }

    /// Feed one fix through the trip accumulator and re-rank the points.
    ///
    /// With `validate_fixes` enabled an invalid fix is rejected and leaves
    /// all state untouched.
    pub fn process_fix(&mut self, fix: &PositionFix) -> Result<FixOutputs> {
        let trip = self.accept(fix)?;
        Ok(self.publish(fix, trip))
    }

    /// Feed a provider batch. Every fix goes through the trip accumulator in
    /// order; the ranking is only recomputed from the last one. Observers are
    /// notified once, with the outputs of the last accepted fix.
    ///
    /// Invalid fixes are skipped. An empty batch yields `Ok(None)`; a batch in
    /// which every fix was rejected yields the last rejection.
    pub fn process_batch(&mut self, fixes: &[PositionFix]) -> Result<Option<FixOutputs>> {
        let mut last = None;
        let mut last_error = None;
        for fix in fixes {
            match self.accept(fix) {
                Ok(trip) => last = Some((*fix, trip)),
                Err(e) => {
                    debug!(error = %e, "skipping fix in batch");
                    last_error = Some(e);
                }
            }
        }
        match (last, last_error) {
            (Some((fix, trip)), _) => Ok(Some(self.publish(&fix, trip))),
            (None, Some(e)) => Err(e),
            (None, None) => Ok(None),
        }
    }

    /// Drain `provider`, returning the number of batches consumed
    pub fn run<P: LocationProvider + ?Sized>(&mut self, provider: &mut P) -> Result<usize> {
        let mut batches = 0;
        while let Some(batch) = provider.next_batch()? {
            if let Err(e) = self.process_batch(&batch) {
                warn!(error = %e, size = batch.len(), "no usable fix in batch");
            }
            batches += 1;
        }
        info!(batches, fixes = self.sequence_counter, "location provider drained");
        Ok(batches)
    }

    /// User-requested trip reset
    pub fn reset_trip(&mut self) {
        self.trip.reset();
        info!("trip reset");
    }

    /// Continue from a previously saved trip state
    pub fn restore_trip(&mut self, state: TripState) {
        debug!(
            distance_m = state.distance_meters,
            updates = state.updates_seen,
            "trip state restored"
        );
        self.trip = state;
    }

    /// Register an observer, called after each processed fix or batch
    pub fn on_update(&mut self, callback: UpdateCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.callbacks.push((handle, callback));
        handle
    }

    pub fn remove_callback(&mut self, handle: CallbackHandle) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(h, _)| *h != handle);
        self.callbacks.len() != before
    }

    fn accept(&mut self, fix: &PositionFix) -> Result<TripUpdate> {
        if self.config.validate_fixes {
            if let Err(e) = validate_fix(fix) {
                warn!(error = %e, timestamp = fix.timestamp_millis, "fix rejected");
                return Err(e);
            }
        }

        let update = self.trip.apply(fix, &self.params);
        self.sequence_counter += 1;

        match update.disposition {
            FixDisposition::MeasurementStarted => info!(
                timestamp = fix.timestamp_millis,
                "trip measurement started"
            ),
            _ => debug!(
                speed_kmh = update.speed_kmh,
                disposition = ?update.disposition,
                distance_m = self.trip.distance_meters,
                "fix processed"
            ),
        }
        Ok(update)
    }

    fn publish(&mut self, fix: &PositionFix, trip: TripUpdate) -> FixOutputs {
        self.points = rank_by_proximity_with(&self.points, fix, self.config.distance_model);

        let outputs = FixOutputs {
            sequence_number: self.sequence_counter,
            fix: *fix,
            trip,
            nearest: self.points.first().cloned(),
        };
        for (_, callback) in &self.callbacks {
            callback(&outputs);
        }
        outputs
    }
}
