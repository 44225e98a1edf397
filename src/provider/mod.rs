//! Location provider boundary
//!
//! Platform location services deliver fixes in batches on a single callback
//! path. A provider here is anything that can be polled for the next batch.

pub mod replay;

pub use replay::{ReplayProvider, TrackFile};

use crate::core::PositionFix;
use crate::validation::error::Result;

/// Source of position fixes
pub trait LocationProvider {
    /// Next batch of fixes, oldest first.
    /// Returns Ok(None) once the provider has stopped delivering.
    fn next_batch(&mut self) -> Result<Option<Vec<PositionFix>>>;

    /// Interval between batches (milliseconds)
    fn interval_ms(&self) -> u64;
}
