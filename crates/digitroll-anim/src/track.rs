//! Keyframe tracks for per-channel roll choreography.
//!
//! A track drives one visual channel of one slot. Keyframe offsets are
//! fractions of the plan's total span. Between two keyframes the value
//! is produced per the *later* keyframe's interpolation:
//! - `Hold` keeps the earlier value and jumps exactly at the keyframe
//! - `Linear` ramps at a constant rate, arriving at the keyframe
//! - `Eased` ramps through an easing curve, arriving at the keyframe
//!
//! Before the first keyframe the first value applies; after the last
//! keyframe the last value holds.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Visual channel a track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Slot opacity, 0.0 (hidden) to 1.0 (opaque).
    Opacity,
    /// Horizontal scale about the slot center.
    ScaleX,
    /// Vertical scale about the slot center.
    ScaleY,
    /// Vertical offset in layout units, positive downward.
    TranslateY,
}

/// How a keyframe's value is approached from the previous keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interpolation {
    /// Keep the previous value, jump at this keyframe's offset.
    Hold,
    /// Constant-rate ramp arriving at this keyframe.
    #[default]
    Linear,
    /// Eased ramp arriving at this keyframe.
    Eased { easing: Easing },
}

/// A single keyframe on a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the plan timeline (0.0 to 1.0).
    pub offset: f32,
    /// Channel value at this keyframe.
    pub value: f32,
    /// How the value is approached from the previous keyframe.
    pub interpolation: Interpolation,
}

impl Keyframe {
    /// Create a keyframe at the given offset.
    pub fn new(offset: f32, value: f32, interpolation: Interpolation) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            value,
            interpolation,
        }
    }

    /// Keyframe that keeps the previous value until `offset`, then jumps.
    pub fn hold(offset: f32, value: f32) -> Self {
        Self::new(offset, value, Interpolation::Hold)
    }

    /// Keyframe reached by a constant-rate ramp.
    pub fn linear(offset: f32, value: f32) -> Self {
        Self::new(offset, value, Interpolation::Linear)
    }

    /// Keyframe reached by an eased ramp.
    pub fn eased(offset: f32, value: f32, easing: Easing) -> Self {
        Self::new(offset, value, Interpolation::Eased { easing })
    }
}

/// Keyframe sequence driving one channel of one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyframeTrack {
    /// Channel this track drives.
    pub channel: Channel,
    /// Keyframes sorted by offset.
    pub keyframes: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Create an empty track for a channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            keyframes: Vec::new(),
        }
    }

    /// Add a keyframe, keeping the list sorted by offset.
    pub fn keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self.keyframes.sort_by(|a, b| {
            a.offset
                .partial_cmp(&b.offset)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    /// Sample the track at an offset in the plan timeline.
    ///
    /// The offset is clamped to 0.0-1.0. An empty track samples to 0.0.
    pub fn sample(&self, offset: f32) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };

        let offset = offset.clamp(0.0, 1.0);
        if offset < first.offset {
            return first.value;
        }

        let mut from = first;
        for to in &self.keyframes {
            if to.offset <= offset {
                from = to;
                continue;
            }
            return interpolate_between(from, to, offset);
        }

        // Past the last keyframe the final value holds
        from.value
    }
}

/// Value between two keyframes, per the later keyframe's interpolation.
///
/// Only called with `from.offset <= offset < to.offset`, so a `Hold`
/// keyframe has not jumped yet.
fn interpolate_between(from: &Keyframe, to: &Keyframe, offset: f32) -> f32 {
    let range = to.offset - from.offset;
    let local = if range > 0.0 {
        (offset - from.offset) / range
    } else {
        0.0
    };

    match to.interpolation {
        Interpolation::Hold => from.value,
        Interpolation::Linear => lerp(from.value, to.value, local),
        Interpolation::Eased { easing } => lerp(from.value, to.value, easing.evaluate(local)),
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
