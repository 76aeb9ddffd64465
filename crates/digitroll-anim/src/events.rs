//! Player lifecycle events.
//!
//! Every started plan emits `Started`, then exactly one of `Completed`
//! (it reached its span) or `Cancelled` (it was replaced or reset).
//! Events accumulate in a queue and are polled after each tick.
//!
//! # Usage
//!
//! ```ignore
//! let mut player = DigitPlayer::new(0).with_content_height(20.0);
//!
//! player.set_digit(7);
//! player.tick(16.7);
//!
//! for event in player.drain_events() {
//!     if event.is_completed() {
//!         println!("settled on {}", event.new_digit());
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::PlanId;

/// Event emitted when a plan changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// A plan started for a digit change.
    Started {
        /// The plan instance ID.
        plan: PlanId,
        /// Digit that was showing when the plan started.
        old_digit: u8,
        /// Digit the plan rolls in.
        new_digit: u8,
    },
    /// A plan reached its full span and the position settled.
    Completed {
        /// The plan instance ID.
        plan: PlanId,
        /// Digit that was showing when the plan started.
        old_digit: u8,
        /// Digit the position settled on.
        new_digit: u8,
    },
    /// A plan was cancelled before completing.
    Cancelled {
        /// The plan instance ID.
        plan: PlanId,
        /// Digit that was showing when the plan started.
        old_digit: u8,
        /// Digit the plan was rolling toward.
        new_digit: u8,
    },
}

impl PlayerEvent {
    /// Get the plan ID for this event.
    pub fn plan_id(&self) -> PlanId {
        match self {
            Self::Started { plan, .. }
            | Self::Completed { plan, .. }
            | Self::Cancelled { plan, .. } => *plan,
        }
    }

    /// Digit that was showing when the plan started.
    pub fn old_digit(&self) -> u8 {
        match self {
            Self::Started { old_digit, .. }
            | Self::Completed { old_digit, .. }
            | Self::Cancelled { old_digit, .. } => *old_digit,
        }
    }

    /// Digit the plan rolls toward.
    pub fn new_digit(&self) -> u8 {
        match self {
            Self::Started { new_digit, .. }
            | Self::Completed { new_digit, .. }
            | Self::Cancelled { new_digit, .. } => *new_digit,
        }
    }

    /// Check if this is a "started" event.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }

    /// Check if this is a "completed" event.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Check if this is a "cancelled" event.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Queue for collecting player events during ticks.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<PlayerEvent>,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the queue.
    pub fn push(&mut self, event: PlayerEvent) {
        self.events.push_back(event);
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Pop the next event from the queue.
    pub fn pop(&mut self) -> Option<PlayerEvent> {
        self.events.pop_front()
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = PlayerEvent> + '_ {
        self.events.drain(..)
    }

    /// Peek at the next event without removing it.
    pub fn peek(&self) -> Option<&PlayerEvent> {
        self.events.front()
    }

    /// Clear all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let event = PlayerEvent::Started {
            plan: PlanId(1),
            old_digit: 3,
            new_digit: 4,
        };

        assert_eq!(event.plan_id(), PlanId(1));
        assert_eq!(event.old_digit(), 3);
        assert_eq!(event.new_digit(), 4);
    }

    #[test]
    fn test_event_predicates() {
        let started = PlayerEvent::Started {
            plan: PlanId(1),
            old_digit: 0,
            new_digit: 1,
        };
        assert!(started.is_started());
        assert!(!started.is_completed());
        assert!(!started.is_cancelled());

        let completed = PlayerEvent::Completed {
            plan: PlanId(1),
            old_digit: 0,
            new_digit: 1,
        };
        assert!(!completed.is_started());
        assert!(completed.is_completed());
        assert!(!completed.is_cancelled());

        let cancelled = PlayerEvent::Cancelled {
            plan: PlanId(1),
            old_digit: 0,
            new_digit: 1,
        };
        assert!(!cancelled.is_started());
        assert!(!cancelled.is_completed());
        assert!(cancelled.is_cancelled());
    }

    #[test]
    fn test_event_queue_operations() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);

        queue.push(PlayerEvent::Started {
            plan: PlanId(1),
            old_digit: 3,
            new_digit: 4,
        });
        queue.push(PlayerEvent::Completed {
            plan: PlanId(1),
            old_digit: 3,
            new_digit: 4,
        });

        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 2);

        // Events come out in the order they were pushed
        let event = queue.pop().unwrap();
        assert!(event.is_started());
        assert_eq!(queue.len(), 1);

        let event = queue.pop().unwrap();
        assert!(event.is_completed());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_event_queue_drain() {
        let mut queue = EventQueue::new();

        queue.push(PlayerEvent::Started {
            plan: PlanId(1),
            old_digit: 0,
            new_digit: 9,
        });
        queue.push(PlayerEvent::Cancelled {
            plan: PlanId(1),
            old_digit: 0,
            new_digit: 9,
        });

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_queue_peek() {
        let mut queue = EventQueue::new();
        assert!(queue.peek().is_none());

        queue.push(PlayerEvent::Started {
            plan: PlanId(7),
            old_digit: 1,
            new_digit: 2,
        });

        assert_eq!(queue.peek().map(|e| e.plan_id()), Some(PlanId(7)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = PlayerEvent::Completed {
            plan: PlanId(42),
            old_digit: 5,
            new_digit: 6,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("completed"));
        assert!(json.contains("42"));

        let parsed: PlayerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
