//! Four-position MM:SS display built from digit players.
//!
//! The view owns one [`DigitPlayer`] per digit of the minutes and
//! seconds groups, separated by a colon. All four share a roll duration;
//! each position adds its own start delay so a time change ripples left
//! to right. Positions whose digit did not change never roll.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use digitroll_anim::{DigitPlayer, PlayerEvent, TimingEnvelope};

use crate::error::TimerError;

/// Longest time the display can show.
pub const MAX_TIME: Duration = Duration::from_secs(60 * 60);

/// Separator glyph between the minute and second groups.
pub const SEPARATOR: char = ':';

/// Identity of one digit position, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitPosition {
    MinutesTens,
    MinutesOnes,
    SecondsTens,
    SecondsOnes,
}

impl DigitPosition {
    /// All positions in display order.
    pub const ALL: [DigitPosition; 4] = [
        Self::MinutesTens,
        Self::MinutesOnes,
        Self::SecondsTens,
        Self::SecondsOnes,
    ];

    /// Delay before this position starts rolling, in milliseconds.
    pub fn stagger_ms(&self) -> f32 {
        match self {
            Self::MinutesTens => 0.0,
            Self::MinutesOnes => 80.0,
            Self::SecondsTens => 160.0,
            Self::SecondsOnes => 240.0,
        }
    }

    /// Index in display order.
    pub fn index(&self) -> usize {
        match self {
            Self::MinutesTens => 0,
            Self::MinutesOnes => 1,
            Self::SecondsTens => 2,
            Self::SecondsOnes => 3,
        }
    }
}

/// Digits for a clock time, in display order.
///
/// Minutes and seconds are decomposed separately, so a full hour reads
/// 60:00 rather than wrapping.
fn clock_digits(time: Duration) -> [u8; 4] {
    let total = time.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    [
        (minutes / 10) as u8,
        (minutes % 10) as u8,
        (seconds / 10) as u8,
        (seconds % 10) as u8,
    ]
}

/// The MM:SS display: four digit positions around a separator.
#[derive(Debug)]
pub struct TimerView {
    positions: [DigitPlayer; 4],
    time: Duration,
}

impl TimerView {
    /// Create a display showing 00:00 with the default roll duration.
    pub fn new() -> Self {
        Self::with_duration_ms(600.0)
    }

    /// Create a display with a specific roll duration.
    pub fn with_duration_ms(duration_ms: f32) -> Self {
        let positions = DigitPosition::ALL.map(|position| {
            DigitPlayer::new(0)
                .with_envelope(TimingEnvelope::new(duration_ms).delay_ms(position.stagger_ms()))
        });
        Self {
            positions,
            time: Duration::ZERO,
        }
    }

    /// Show a new time.
    ///
    /// Positions whose digit changed start their staggered rolls; the
    /// rest are untouched. Times beyond one hour are rejected before any
    /// digit moves.
    pub fn set_time(&mut self, time: Duration) -> Result<(), TimerError> {
        if time > MAX_TIME {
            return Err(TimerError::TimeOutOfRange {
                requested: time,
                max: MAX_TIME,
            });
        }

        self.time = time;
        for (player, digit) in self.positions.iter_mut().zip(clock_digits(time)) {
            player.set_digit(digit);
        }
        Ok(())
    }

    /// Advance every position on the shared clock.
    pub fn tick(&mut self, delta_ms: f32) {
        for player in &mut self.positions {
            player.tick(delta_ms);
        }
    }

    /// Change the roll duration for every position, keeping the stagger.
    ///
    /// As with any envelope change, running rolls are cancelled and the
    /// positions reset statically.
    pub fn set_duration_ms(&mut self, duration_ms: f32) {
        for (position, player) in DigitPosition::ALL.into_iter().zip(&mut self.positions) {
            player.set_envelope(TimingEnvelope::new(duration_ms).delay_ms(position.stagger_ms()));
        }
    }

    /// Record the measured digit height for every position.
    pub fn set_content_height(&mut self, height: f32) {
        for player in &mut self.positions {
            player.set_content_height(height);
        }
    }

    /// Time the display is showing or rolling toward.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Iterate positions in display order.
    pub fn positions(&self) -> impl Iterator<Item = (DigitPosition, &DigitPlayer)> {
        DigitPosition::ALL.into_iter().zip(self.positions.iter())
    }

    /// Access one position's player.
    pub fn position(&self, position: DigitPosition) -> &DigitPlayer {
        &self.positions[position.index()]
    }

    /// Whether any position is mid-roll.
    pub fn is_animating(&self) -> bool {
        self.positions.iter().any(|p| p.is_running())
    }

    /// The display text, "MM:SS", from the digits each position shows or
    /// rolls toward.
    pub fn display_text(&self) -> String {
        let d: Vec<u8> = self.positions.iter().map(|p| p.digit()).collect();
        format!("{}{}{}{}{}", d[0], d[1], SEPARATOR, d[2], d[3])
    }

    /// Drain pending events from every position, in display order.
    pub fn drain_events(&mut self) -> Vec<(DigitPosition, PlayerEvent)> {
        let mut events = Vec::new();
        for (position, player) in DigitPosition::ALL.into_iter().zip(&mut self.positions) {
            for event in player.drain_events() {
                events.push((position, event));
            }
        }
        events
    }
}

impl Default for TimerView {
    fn default() -> Self {
        Self::new()
    }
}
