//! Replays a recorded track as if it came from a live provider

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::LOCATION_INTERVAL_MS;
use crate::core::PositionFix;
use crate::provider::LocationProvider;
use crate::validation::error::{KinematicsError, Result};

/// On-disk track: `{"fixes": [{"latitude": .., "longitude": .., "timestamp_millis": ..}, ..]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackFile {
    pub fixes: Vec<PositionFix>,
}

impl TrackFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| KinematicsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let track: TrackFile = serde_json::from_str(&content)?;
        debug!(path = %path.display(), fixes = track.fixes.len(), "loaded track");
        Ok(track)
    }
}

/// Provider that hands out a recorded track in fixed-size batches
#[derive(Debug)]
pub struct ReplayProvider {
    pending: VecDeque<PositionFix>,
    batch_size: usize,
    interval_ms: u64,
    batches_delivered: u32,
}

impl ReplayProvider {
    pub fn new(fixes: Vec<PositionFix>) -> Self {
        Self {
            pending: fixes.into(),
            batch_size: 1,
            interval_ms: LOCATION_INTERVAL_MS,
            batches_delivered: 0,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(TrackFile::load(path)?.fixes))
    }

    /// Deliver up to `batch_size` fixes per poll (at least one)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn batches_delivered(&self) -> u32 {
        self.batches_delivered
    }
}

impl LocationProvider for ReplayProvider {
    fn next_batch(&mut self) -> Result<Option<Vec<PositionFix>>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let take = self.batch_size.min(self.pending.len());
        let batch: Vec<PositionFix> = self.pending.drain(..take).collect();
        self.batches_delivered += 1;
        Ok(Some(batch))
    }

    fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
