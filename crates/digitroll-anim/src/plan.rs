//! Roll-over transition planning.
//!
//! [`plan_roll`] is the pure core of the crate: given the old digit, the
//! new digit, the timing envelope, and the measured content height, it
//! either produces a [`TransitionPlan`] describing all eight keyframe
//! tracks of the roll, or `None` when the change cannot animate and the
//! position must render statically.
//!
//! Planning never touches playback state, so the same inputs always
//! produce the same plan.

use serde::{Deserialize, Serialize};

use crate::easing::{Easing, EasingMode};
use crate::track::{Channel, Keyframe, KeyframeTrack};

/// Smallest duration that can still animate, in milliseconds.
pub const MIN_ANIMATABLE_DURATION_MS: f32 = 0.001;

/// Timing envelope for a roll-over: how long the roll runs and how long
/// the position waits before starting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingEnvelope {
    /// Duration of the roll in milliseconds. `None` leaves the span
    /// undefined, which disables animation for this position.
    pub duration_ms: Option<f32>,
    /// Delay before the roll starts in milliseconds.
    pub delay_ms: f32,
}

impl Default for TimingEnvelope {
    fn default() -> Self {
        Self {
            duration_ms: Some(600.0),
            delay_ms: 0.0,
        }
    }
}

impl TimingEnvelope {
    /// Envelope with the given duration and no delay.
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            delay_ms: 0.0,
        }
    }

    /// Set the duration.
    pub fn duration_ms(mut self, duration: f32) -> Self {
        self.duration_ms = Some(duration);
        self
    }

    /// Clear the duration, leaving the span undefined.
    pub fn without_duration(mut self) -> Self {
        self.duration_ms = None;
        self
    }

    /// Set the delay.
    pub fn delay_ms(mut self, delay: f32) -> Self {
        self.delay_ms = delay;
        self
    }

    /// Total span of a plan built from this envelope (delay plus
    /// duration, zero when the duration is undefined).
    pub fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms.unwrap_or(0.0)
    }

    /// Whether the duration is defined and long enough to animate.
    pub fn is_animatable(&self) -> bool {
        matches!(self.duration_ms, Some(d) if d > MIN_ANIMATABLE_DURATION_MS)
    }
}

/// The four tracks driving one visual slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTracks {
    pub opacity: KeyframeTrack,
    pub scale_x: KeyframeTrack,
    pub scale_y: KeyframeTrack,
    pub translate_y: KeyframeTrack,
}

impl SlotTracks {
    /// Iterate the tracks in channel order.
    pub fn tracks(&self) -> impl Iterator<Item = &KeyframeTrack> {
        [
            &self.opacity,
            &self.scale_x,
            &self.scale_y,
            &self.translate_y,
        ]
        .into_iter()
    }
}

/// A fully planned digit roll-over.
///
/// Keyframe offsets inside the tracks are fractions of `total_ms`, which
/// covers both the delay and the roll itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// Digit rolling away.
    pub old_digit: u8,
    /// Digit rolling in.
    pub new_digit: u8,
    /// Total span in milliseconds (delay plus duration).
    pub total_ms: f32,
    /// Tracks for the slot showing the old digit.
    pub outgoing: SlotTracks,
    /// Tracks for the slot showing the new digit.
    pub incoming: SlotTracks,
}

impl TransitionPlan {
    /// Iterate all eight tracks, outgoing slot first.
    pub fn tracks(&self) -> impl Iterator<Item = &KeyframeTrack> {
        self.outgoing.tracks().chain(self.incoming.tracks())
    }
}

/// Plan a roll-over from `old_digit` to `new_digit`.
///
/// Returns `None` when the change cannot animate:
/// - the digits are equal, or either is outside 0-9
/// - the envelope has no defined duration, or it is too short to ramp
/// - `content_height` is not positive
///
/// The caller renders statically in that case, with only the new digit
/// visible.
///
/// An eligible plan spans `delay + duration`. The outgoing digit fades
/// out over the first fifth of the roll while shrinking toward half size
/// and drifting up by half the content height. The incoming digit waits
/// at half size below the baseline, fades in from 15% of the roll, and
/// springs up to rest with an elastic settle.
pub fn plan_roll(
    old_digit: u8,
    new_digit: u8,
    envelope: TimingEnvelope,
    content_height: f32,
) -> Option<TransitionPlan> {
    if old_digit == new_digit || old_digit > 9 || new_digit > 9 {
        return None;
    }
    if !envelope.is_animatable() || content_height <= 0.0 {
        return None;
    }

    let duration = envelope.duration_ms?;
    let delay = envelope.delay_ms.max(0.0);
    let total = delay + duration;

    // Map a fraction of the roll to a fraction of the whole span
    let at = |fraction: f32| (delay + duration * fraction) / total;
    let start = at(0.0);

    let half_height = content_height / 2.0;
    let entrance = Easing::exponential(4.5, EasingMode::Out);
    let settle = Easing::elastic(1, 4.5, EasingMode::Out);

    let outgoing = SlotTracks {
        opacity: KeyframeTrack::new(Channel::Opacity)
            .keyframe(Keyframe::hold(0.0, 1.0))
            .keyframe(Keyframe::hold(start, 1.0))
            .keyframe(Keyframe::linear(at(0.20), 0.0)),
        scale_x: KeyframeTrack::new(Channel::ScaleX)
            .keyframe(Keyframe::hold(0.0, 1.0))
            .keyframe(Keyframe::hold(start, 1.0))
            .keyframe(Keyframe::linear(at(0.35), 0.5)),
        scale_y: KeyframeTrack::new(Channel::ScaleY)
            .keyframe(Keyframe::hold(0.0, 1.0))
            .keyframe(Keyframe::hold(start, 1.0))
            .keyframe(Keyframe::linear(at(0.40), 0.5)),
        translate_y: KeyframeTrack::new(Channel::TranslateY)
            .keyframe(Keyframe::hold(0.0, 0.0))
            .keyframe(Keyframe::hold(start, 0.0))
            .keyframe(Keyframe::linear(at(0.40), -half_height)),
    };

    let incoming = SlotTracks {
        opacity: KeyframeTrack::new(Channel::Opacity)
            .keyframe(Keyframe::hold(0.0, 0.0))
            .keyframe(Keyframe::hold(start, 0.0))
            .keyframe(Keyframe::hold(at(0.15), 0.0))
            .keyframe(Keyframe::eased(at(1.0), 1.0, entrance)),
        scale_x: KeyframeTrack::new(Channel::ScaleX)
            .keyframe(Keyframe::hold(0.0, 0.5))
            .keyframe(Keyframe::hold(start, 0.5))
            .keyframe(Keyframe::eased(at(1.0), 1.0, entrance)),
        scale_y: KeyframeTrack::new(Channel::ScaleY)
            .keyframe(Keyframe::hold(0.0, 0.5))
            .keyframe(Keyframe::hold(start, 0.5))
            .keyframe(Keyframe::eased(at(1.0), 1.0, entrance)),
        translate_y: KeyframeTrack::new(Channel::TranslateY)
            .keyframe(Keyframe::hold(0.0, half_height))
            .keyframe(Keyframe::hold(start, half_height))
            .keyframe(Keyframe::hold(at(0.05), half_height))
            .keyframe(Keyframe::eased(at(1.0), 0.0, settle)),
    };

    Some(TransitionPlan {
        old_digit,
        new_digit,
        total_ms: total,
        outgoing,
        incoming,
    })
}
