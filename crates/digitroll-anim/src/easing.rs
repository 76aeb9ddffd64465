//! Easing curves for roll-over timing.
//!
//! This module implements the two curve families the roll choreography
//! uses:
//! - Exponential (accelerating or decelerating approach)
//! - Elastic (spring-like settle with overshoot)
//!
//! Each curve is defined by its ease-in core and transformed by an
//! [`EasingMode`] into the in, out, or in-out shape.
//!
//! # Usage
//!
//! ```
//! use digitroll_anim::easing::{Easing, EasingMode};
//!
//! let entrance = Easing::Exponential { exponent: 4.5, mode: EasingMode::Out };
//! let progress = entrance.evaluate(0.5); // Get eased progress at 50%
//! ```

use serde::{Deserialize, Serialize};

/// Which end of the curve carries the acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    /// Accelerate from rest (the core curve applied directly).
    In,
    /// Decelerate to rest (the core curve mirrored end to end).
    #[default]
    Out,
    /// Accelerate through the first half, decelerate through the second.
    InOut,
}

impl EasingMode {
    /// Apply this mode to an ease-in core curve.
    fn apply(self, t: f32, core: impl Fn(f32) -> f32) -> f32 {
        match self {
            Self::In => core(t),
            Self::Out => 1.0 - core(1.0 - t),
            Self::InOut => {
                if t < 0.5 {
                    core(t * 2.0) * 0.5
                } else {
                    1.0 - core((1.0 - t) * 2.0) * 0.5
                }
            }
        }
    }
}

/// Easing curve for keyframe interpolation.
///
/// Curves map a linear progress value (0.0 to 1.0) to an eased output
/// value. Elastic curves overshoot their endpoints on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Exponential curve, core `(e^(kt) - 1) / (e^k - 1)`.
    /// Degenerates to linear when the exponent is zero.
    Exponential { exponent: f32, mode: EasingMode },

    /// Spring-like oscillation under an exponentially growing envelope.
    /// `oscillations` is the number of full swings before settling;
    /// `springiness` controls how sharply the envelope grows.
    Elastic {
        oscillations: u32,
        springiness: f32,
        mode: EasingMode,
    },
}

impl Easing {
    /// Evaluate the curve at the given progress.
    ///
    /// # Arguments
    /// * `t` - Progress value from 0.0 to 1.0
    ///
    /// # Returns
    /// Eased progress value (outside 0.0-1.0 while an elastic curve
    /// overshoots)
    pub fn evaluate(&self, t: f32) -> f32 {
        // Clamp input to valid range
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Exponential { exponent, mode } => {
                mode.apply(t, |t| exponential_core(*exponent, t))
            }
            Self::Elastic {
                oscillations,
                springiness,
                mode,
            } => mode.apply(t, |t| elastic_core(*oscillations, *springiness, t)),
        }
    }

    /// Create an exponential curve.
    pub fn exponential(exponent: f32, mode: EasingMode) -> Self {
        Self::Exponential { exponent, mode }
    }

    /// Create an elastic curve.
    pub fn elastic(oscillations: u32, springiness: f32, mode: EasingMode) -> Self {
        Self::Elastic {
            oscillations,
            springiness,
            mode,
        }
    }
}

/// Exponential ease-in core: `(e^(kt) - 1) / (e^k - 1)`.
fn exponential_core(exponent: f32, t: f32) -> f32 {
    if exponent.abs() < f32::EPSILON {
        return t;
    }
    ((exponent * t).exp() - 1.0) / (exponent.exp() - 1.0)
}

/// Elastic ease-in core: an exponential envelope modulating a sine wave
/// that completes `oscillations` full swings plus a quarter turn.
fn elastic_core(oscillations: u32, springiness: f32, t: f32) -> f32 {
    let springiness = springiness.max(0.0);
    let envelope = if springiness < f32::EPSILON {
        t
    } else {
        ((springiness * t).exp() - 1.0) / (springiness.exp() - 1.0)
    };

    let cycles = std::f32::consts::TAU * oscillations as f32 + std::f32::consts::FRAC_PI_2;
    envelope * (cycles * t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_exponential_in() {
        let ease = Easing::exponential(4.5, EasingMode::In);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // Ease-in starts slow: well below the diagonal at the midpoint
        let mid = ease.evaluate(0.5);
        assert!(approx_eq(mid, 0.0953), "exponential in midpoint, got {}", mid);
    }

    #[test]
    fn test_exponential_out() {
        let ease = Easing::exponential(4.5, EasingMode::Out);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        // Ease-out is the mirrored curve: fast start, slow settle
        let mid = ease.evaluate(0.5);
        assert!(approx_eq(mid, 0.9047), "exponential out midpoint, got {}", mid);

        // Monotonically increasing
        let early = ease.evaluate(0.25);
        let late = ease.evaluate(0.75);
        assert!(early < mid && mid < late);
    }

    #[test]
    fn test_exponential_zero_exponent_is_linear() {
        let ease = Easing::exponential(0.0, EasingMode::In);
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(0.75), 0.75));

        let ease = Easing::exponential(0.0, EasingMode::Out);
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
    }

    #[test]
    fn test_in_out_symmetry() {
        let ease = Easing::exponential(4.5, EasingMode::InOut);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        let early = ease.evaluate(0.25);
        let late = ease.evaluate(0.75);
        assert!(approx_eq(early + late, 1.0));
    }

    #[test]
    fn test_elastic_out_boundaries() {
        let ease = Easing::elastic(1, 4.5, EasingMode::Out);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_elastic_out_overshoots() {
        let ease = Easing::elastic(1, 4.5, EasingMode::Out);

        // The spring swings past the target before settling back
        let peak = ease.evaluate(0.4);
        assert!(peak > 1.0, "elastic out should overshoot, got {}", peak);
        assert!(peak < 1.3, "overshoot should stay moderate, got {}", peak);
    }

    #[test]
    fn test_elastic_zero_springiness() {
        // Without the exponential envelope the sine still swings
        let ease = Easing::elastic(1, 0.0, EasingMode::In);
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_clamping() {
        let ease = Easing::exponential(4.5, EasingMode::Out);

        // Values outside 0-1 should be clamped
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(EasingMode::default(), EasingMode::Out);
    }
}
