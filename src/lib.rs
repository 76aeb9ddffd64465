//! Digit roll-over animation for timer displays.
//!
//! Facade over the digitroll crates:
//! - [`anim`]: the pure roll planner, the tick-driven player, and the
//!   keyframe data model
//! - [`timer`]: the four-position MM:SS view and the countdown driver
//! - [`config`]: file and environment configuration

pub use digitroll_anim as anim;
pub use digitroll_config as config;
pub use digitroll_timer as timer;

pub use digitroll_anim::{plan_roll, DigitPlayer, TimingEnvelope, TransitionPlan};
pub use digitroll_timer::{Countdown, TimerView};
