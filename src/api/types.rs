//! Values handed from the engine to its observers

use crate::algorithms::trip::TripUpdate;
use crate::core::{PointOfInterest, PositionFix};

/// Everything derived from one processed fix
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutputs {
    /// Running count of fixes accepted by the engine
    pub sequence_number: u64,
    pub fix: PositionFix,
    pub trip: TripUpdate,
    /// Closest point after re-ranking, if any points are tracked
    pub nearest: Option<PointOfInterest>,
}

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub(crate) fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Observer invoked after each processed fix
pub type UpdateCallback = Box<dyn Fn(&FixOutputs) + Send>;
