//! Core identifiers and states for plan playback.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a started plan instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub u64);

impl PlanId {
    /// Generate a new unique plan ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback state of a started plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanState {
    /// Plan is advancing on the shared clock.
    Running,
    /// Plan reached its total span and the slots settled.
    Finished,
    /// Plan was replaced or reset before completing.
    Cancelled,
}
