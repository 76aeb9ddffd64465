//! Boundary errors for the timer display.

use std::time::Duration;

/// Errors raised at the timer's input boundaries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// A requested time exceeds what the display can show.
    #[error("time {}s out of range, display is capped at {}s", requested.as_secs(), max.as_secs())]
    TimeOutOfRange { requested: Duration, max: Duration },

    /// A clock string could not be parsed.
    #[error("invalid clock string: {0:?}")]
    InvalidClock(String),
}
