//! One-second countdown steps on an accumulated clock.
//!
//! The countdown is decoupled from any scheduler: the host feeds it
//! elapsed wall time at whatever cadence it has, and whole-second steps
//! come out. Zero is displayed; the step that would go below zero stops
//! the countdown instead.

use std::time::Duration;

use crate::error::TimerError;
use crate::view::MAX_TIME;

const SECOND: Duration = Duration::from_secs(1);

/// Counts down from a starting time in one-second steps.
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: Duration,
    accumulated: Duration,
    running: bool,
}

impl Countdown {
    /// Create a stopped countdown at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down from `from`.
    ///
    /// Resets any previously accumulated fraction of a second. Starting
    /// points beyond one hour are rejected, matching the display cap.
    pub fn start(&mut self, from: Duration) -> Result<(), TimerError> {
        if from > MAX_TIME {
            return Err(TimerError::TimeOutOfRange {
                requested: from,
                max: MAX_TIME,
            });
        }

        self.remaining = from;
        self.accumulated = Duration::ZERO;
        self.running = true;
        log::info!("countdown started from {}s", from.as_secs());
        Ok(())
    }

    /// Feed elapsed wall time.
    ///
    /// Returns the new remaining time whenever one or more whole seconds
    /// were crossed, `None` otherwise. Crossing below zero stops the
    /// countdown; the returned zero is still meant to be displayed.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Duration> {
        if !self.running {
            return None;
        }

        self.accumulated += elapsed;

        let mut stepped = false;
        while self.running && self.accumulated >= SECOND {
            self.accumulated -= SECOND;
            match self.remaining.checked_sub(SECOND) {
                Some(rest) => {
                    self.remaining = rest;
                    stepped = true;
                }
                None => {
                    self.running = false;
                    log::info!("countdown finished");
                }
            }
        }

        stepped.then_some(self.remaining)
    }

    /// Remaining time.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whether the countdown is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop without resetting the remaining time.
    pub fn stop(&mut self) {
        self.running = false;
    }
}
