//! Digit roll-over animation engine.
//!
//! This crate provides:
//! - **Planner**: Pure construction of keyframe plans for digit roll-overs
//! - **Player**: Tick-driven playback onto the two visual slots of a digit
//! - **Tracks**: Per-channel keyframe sequences with hold, linear, and
//!   eased interpolation
//! - **Events**: Lifecycle events polled after each tick
//!
//! # Architecture
//!
//! ```text
//! plan_roll(old, new, envelope, height) -> Option<TransitionPlan>
//!   └── 8 keyframe tracks (opacity / scale_x / scale_y / translate_y
//!       for the outgoing and the incoming slot)
//!
//! DigitPlayer
//!   ├── outgoing VisualSlot (old digit rolling away)
//!   ├── incoming VisualSlot (new digit rolling in)
//!   └── EventQueue (started / completed / cancelled)
//! ```
//!
//! The player never paints. After each `tick` the host reads the slots
//! and renders them however it likes.

pub mod easing;
pub mod events;
pub mod plan;
pub mod player;
pub mod track;
pub mod types;

pub use easing::{Easing, EasingMode};
pub use events::{EventQueue, PlayerEvent};
pub use plan::{plan_roll, SlotTracks, TimingEnvelope, TransitionPlan, MIN_ANIMATABLE_DURATION_MS};
pub use player::{ActivePlan, DigitPlayer, VisualSlot};
pub use track::{Channel, Interpolation, Keyframe, KeyframeTrack};
pub use types::{PlanId, PlanState};
