//! Two-group MM:SS timer display driven by digit roll-overs.
//!
//! This crate composes four [`digitroll_anim::DigitPlayer`] positions
//! into a clock face:
//! - **View**: digit decomposition, staggered starts, shared tick
//! - **Countdown**: one-second steps accumulated from wall time
//! - **Clock**: "MM:SS" parsing and formatting at the text boundary
//!
//! The view validates its input (at most one hour) and otherwise leaves
//! rendering to the host, which reads each position's slots after every
//! tick.

pub mod clock;
pub mod countdown;
pub mod error;
pub mod view;

pub use clock::{format_clock, parse_clock};
pub use countdown::Countdown;
pub use error::TimerError;
pub use view::{DigitPosition, TimerView, MAX_TIME, SEPARATOR};
