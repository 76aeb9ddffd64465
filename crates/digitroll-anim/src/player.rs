//! Tick-driven playback of roll-over plans.
//!
//! [`DigitPlayer`] owns the two visual slots of one digit position. When
//! the digit changes it asks the planner for a plan, advances the active
//! plan on the shared clock, and writes sampled track values into the
//! slots. Painting is the host's job: after each tick it reads the slots
//! and renders them however it likes.
//!
//! At most one plan runs per player. A newer digit change cancels the
//! running plan atomically, so a stale completion can never overwrite
//! the newer state.

use serde::{Deserialize, Serialize};

use crate::events::{EventQueue, PlayerEvent};
use crate::plan::{plan_roll, TimingEnvelope, TransitionPlan};
use crate::types::{PlanId, PlanState};

/// Renderable state of one visual slot.
///
/// A slot is a digit glyph with an opacity, a center-anchored scale, and
/// a vertical offset. Identity values mean the slot is at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSlot {
    /// Digit glyph this slot shows.
    pub digit: u8,
    /// Opacity, 0.0 to 1.0.
    pub opacity: f32,
    /// Horizontal scale about the slot center.
    pub scale_x: f32,
    /// Vertical scale about the slot center.
    pub scale_y: f32,
    /// Vertical offset in layout units, positive downward.
    pub translate_y: f32,
}

impl VisualSlot {
    /// Slot at rest, fully visible.
    pub fn visible(digit: u8) -> Self {
        Self {
            digit,
            opacity: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translate_y: 0.0,
        }
    }

    /// Hidden slot, transforms at rest.
    pub fn hidden(digit: u8) -> Self {
        Self {
            opacity: 0.0,
            ..Self::visible(digit)
        }
    }
}

/// A plan currently advancing on the clock.
#[derive(Debug, Clone)]
pub struct ActivePlan {
    /// Unique identifier for this playback instance.
    pub id: PlanId,
    /// The plan being played.
    pub plan: TransitionPlan,
    /// Elapsed time since the plan started, in milliseconds.
    pub elapsed_ms: f32,
    /// Current playback state.
    pub state: PlanState,
}

impl ActivePlan {
    /// Start playing a plan from its beginning.
    pub fn new(plan: TransitionPlan) -> Self {
        Self {
            id: PlanId::new(),
            plan,
            elapsed_ms: 0.0,
            state: PlanState::Running,
        }
    }

    /// Current position in the plan timeline (0.0 to 1.0).
    pub fn offset(&self) -> f32 {
        if self.plan.total_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.plan.total_ms).clamp(0.0, 1.0)
    }

    /// Advance time. Returns `true` while the plan is still running.
    pub fn advance(&mut self, delta_ms: f32) -> bool {
        if self.state != PlanState::Running {
            return false;
        }

        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= self.plan.total_ms {
            self.state = PlanState::Finished;
            return false;
        }
        true
    }

    /// Mark the plan cancelled.
    pub fn cancel(&mut self) {
        self.state = PlanState::Cancelled;
    }
}

/// Plays roll-over plans for a single digit position.
///
/// All mutation goes through `&mut self` on the owning thread; the
/// player holds no locks and spawns nothing.
#[derive(Debug)]
pub struct DigitPlayer {
    digit: u8,
    envelope: TimingEnvelope,
    content_height: f32,
    outgoing: VisualSlot,
    incoming: VisualSlot,
    active: Option<ActivePlan>,
    events: EventQueue,
}

impl DigitPlayer {
    /// Create a player resting on `digit` with the default envelope.
    ///
    /// No content height is set yet, so changes render statically until
    /// the host provides one.
    pub fn new(digit: u8) -> Self {
        Self {
            digit,
            envelope: TimingEnvelope::default(),
            content_height: 0.0,
            outgoing: VisualSlot::hidden(digit),
            incoming: VisualSlot::visible(digit),
            active: None,
            events: EventQueue::new(),
        }
    }

    /// Set the measured content height used by future plans.
    pub fn with_content_height(mut self, height: f32) -> Self {
        self.content_height = height;
        self
    }

    /// Set the timing envelope used by future plans.
    pub fn with_envelope(mut self, envelope: TimingEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    /// Change the displayed digit.
    ///
    /// A no-op when the digit is unchanged. Otherwise any running plan
    /// is cancelled and, when the change is eligible, a fresh roll
    /// starts; ineligible changes settle the slots statically on the new
    /// digit.
    pub fn set_digit(&mut self, digit: u8) {
        if digit == self.digit {
            return;
        }

        let old = self.digit;
        let plan = plan_roll(old, digit, self.envelope, self.content_height);
        self.apply(plan, old, digit);
    }

    /// Replace whatever is running with `plan`.
    ///
    /// `None` settles the slots statically on `new_digit`. A previous
    /// plan is cancelled first, and its completion never surfaces.
    pub fn apply(&mut self, plan: Option<TransitionPlan>, old_digit: u8, new_digit: u8) {
        self.cancel_active();
        self.digit = new_digit;

        match plan {
            Some(plan) => {
                let active = ActivePlan::new(plan);
                log::debug!(
                    "plan {:?} started: {} -> {} over {}ms",
                    active.id,
                    old_digit,
                    new_digit,
                    active.plan.total_ms
                );

                self.outgoing = VisualSlot::visible(old_digit);
                self.incoming = VisualSlot::hidden(new_digit);
                self.sample_slots(&active);

                self.events.push(PlayerEvent::Started {
                    plan: active.id,
                    old_digit,
                    new_digit,
                });
                self.active = Some(active);
            }
            None => self.settle(new_digit),
        }
    }

    /// Advance the active plan and refresh the slots.
    ///
    /// The owner calls this once per frame for every position with the
    /// same delta, which is what keeps staggered positions in step.
    pub fn tick(&mut self, delta_ms: f32) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        let running = active.advance(delta_ms);
        self.sample_slots(&active);

        if running {
            self.active = Some(active);
            return;
        }

        // Final sampled values stay; only the glyphs snap to the settled
        // digit.
        self.outgoing.digit = active.plan.new_digit;
        self.incoming.digit = active.plan.new_digit;

        log::debug!("plan {:?} completed on {}", active.id, active.plan.new_digit);
        self.events.push(PlayerEvent::Completed {
            plan: active.id,
            old_digit: active.plan.old_digit,
            new_digit: active.plan.new_digit,
        });
    }

    /// Replace the timing envelope.
    ///
    /// Any running plan is cancelled and the position resets to its
    /// static state on the current digit, without animating. The new
    /// envelope applies from the next digit change.
    pub fn set_envelope(&mut self, envelope: TimingEnvelope) {
        self.envelope = envelope;
        self.cancel_active();
        self.settle(self.digit);
    }

    /// Record the measured content height. Takes effect on the next plan;
    /// a running plan keeps the height it was built with.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }

    /// Digit this position is showing or rolling toward.
    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// Timing envelope used for future plans.
    pub fn envelope(&self) -> TimingEnvelope {
        self.envelope
    }

    /// Content height used by future plans.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Slot carrying the digit that rolls away.
    pub fn outgoing(&self) -> &VisualSlot {
        &self.outgoing
    }

    /// Slot carrying the digit that rolls in, or rests on it.
    pub fn incoming(&self) -> &VisualSlot {
        &self.incoming
    }

    /// Both slots in paint order (outgoing below, incoming above).
    pub fn slots(&self) -> [&VisualSlot; 2] {
        [&self.outgoing, &self.incoming]
    }

    /// Whether a plan is currently running.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// The running plan, if any.
    pub fn active_plan(&self) -> Option<&ActivePlan> {
        self.active.as_ref()
    }

    /// ID of the running plan, if any.
    pub fn active_plan_id(&self) -> Option<PlanId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Current offset of the running plan (0.0 to 1.0).
    pub fn progress(&self) -> Option<f32> {
        self.active.as_ref().map(|a| a.offset())
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.events.drain().collect()
    }

    /// Pop the next pending event.
    pub fn pop_event(&mut self) -> Option<PlayerEvent> {
        self.events.pop()
    }

    /// Check if any events are pending.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn cancel_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.cancel();
            log::debug!("plan {:?} cancelled", active.id);
            self.events.push(PlayerEvent::Cancelled {
                plan: active.id,
                old_digit: active.plan.old_digit,
                new_digit: active.plan.new_digit,
            });
        }
    }

    /// Static rest state: only the incoming slot visible, both glyphs on
    /// the digit, transforms reset.
    fn settle(&mut self, digit: u8) {
        self.outgoing = VisualSlot::hidden(digit);
        self.incoming = VisualSlot::visible(digit);
    }

    fn sample_slots(&mut self, active: &ActivePlan) {
        let offset = active.offset();
        let plan = &active.plan;

        self.outgoing.opacity = plan.outgoing.opacity.sample(offset);
        self.outgoing.scale_x = plan.outgoing.scale_x.sample(offset);
        self.outgoing.scale_y = plan.outgoing.scale_y.sample(offset);
        self.outgoing.translate_y = plan.outgoing.translate_y.sample(offset);

        self.incoming.opacity = plan.incoming.opacity.sample(offset);
        self.incoming.scale_x = plan.incoming.scale_x.sample(offset);
        self.incoming.scale_y = plan.incoming.scale_y.sample(offset);
        self.incoming.translate_y = plan.incoming.translate_y.sample(offset);
    }
}

static_assertions::assert_impl_all!(DigitPlayer: Send);

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn player() -> DigitPlayer {
        DigitPlayer::new(5).with_content_height(20.0)
    }

    #[test]
    fn test_initial_state() {
        let player = DigitPlayer::new(5);

        assert_eq!(player.digit(), 5);
        assert!(!player.is_running());
        assert_eq!(player.incoming(), &VisualSlot::visible(5));
        assert_eq!(player.outgoing(), &VisualSlot::hidden(5));
        assert!(!player.has_pending_events());
    }

    #[test]
    fn test_set_digit_starts_plan() {
        let mut player = player();
        player.set_digit(7);

        assert!(player.is_running());
        assert_eq!(player.digit(), 7);

        // Seeded at offset zero: old digit fully visible, new digit
        // hidden at half size below the baseline
        assert_eq!(player.outgoing().digit, 5);
        assert!(approx_eq(player.outgoing().opacity, 1.0));
        assert_eq!(player.incoming().digit, 7);
        assert!(approx_eq(player.incoming().opacity, 0.0));
        assert!(approx_eq(player.incoming().scale_x, 0.5));
        assert!(approx_eq(player.incoming().translate_y, 10.0));

        let events = player.drain_events();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_started());
        assert_eq!(events[0].old_digit(), 5);
        assert_eq!(events[0].new_digit(), 7);
    }

    #[test]
    fn test_same_digit_is_noop() {
        let mut player = player();
        player.set_digit(5);

        assert!(!player.is_running());
        assert!(!player.has_pending_events());
        assert_eq!(player.incoming(), &VisualSlot::visible(5));
    }

    #[test]
    fn test_repeated_target_keeps_running_plan() {
        let mut player = player();
        player.set_digit(7);
        let id = player.active_plan_id().unwrap();
        player.drain_events();

        // Same target again: the running roll is not restarted
        player.set_digit(7);
        assert_eq!(player.active_plan_id(), Some(id));
        assert!(!player.has_pending_events());
    }

    #[test]
    fn test_static_fallback_without_height() {
        let mut player = DigitPlayer::new(1);
        player.set_digit(2);

        assert!(!player.is_running());
        assert_eq!(player.digit(), 2);
        assert_eq!(player.incoming(), &VisualSlot::visible(2));
        assert_eq!(player.outgoing(), &VisualSlot::hidden(2));
        assert!(!player.has_pending_events());
    }

    #[test]
    fn test_static_fallback_without_duration() {
        let mut player =
            DigitPlayer::new(1).with_envelope(TimingEnvelope::default().without_duration());
        player.set_digit(2);

        assert!(!player.is_running());
        assert_eq!(player.incoming(), &VisualSlot::visible(2));
    }

    #[test]
    fn test_tick_advances_slots() {
        let mut player = player();
        player.set_digit(7);
        player.tick(300.0);

        assert!(player.is_running());
        assert!(approx_eq(player.progress().unwrap(), 0.5));

        // Halfway through: the exit ramps already finished
        assert!(approx_eq(player.outgoing().opacity, 0.0));
        assert!(approx_eq(player.outgoing().scale_x, 0.5));
        assert!(approx_eq(player.outgoing().translate_y, -10.0));

        // The entrance is past its midpoint but not settled
        let incoming = player.incoming();
        assert!(incoming.opacity > 0.5 && incoming.opacity < 1.0);
        assert!(incoming.scale_x > 0.5 && incoming.scale_x < 1.001);
    }

    #[test]
    fn test_completion_settles() {
        let mut player = player();
        player.set_digit(7);
        player.tick(700.0);

        assert!(!player.is_running());

        // Both glyphs on the new digit, incoming at rest, outgoing gone
        assert_eq!(player.outgoing().digit, 7);
        assert_eq!(player.incoming().digit, 7);
        assert!(approx_eq(player.outgoing().opacity, 0.0));
        assert!(approx_eq(player.incoming().opacity, 1.0));
        assert!(approx_eq(player.incoming().scale_x, 1.0));
        assert!(approx_eq(player.incoming().scale_y, 1.0));
        assert!(approx_eq(player.incoming().translate_y, 0.0));

        let events = player.drain_events();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_started());
        assert!(events[1].is_completed());
        assert_eq!(events[0].plan_id(), events[1].plan_id());
    }

    #[test]
    fn test_exact_span_completes() {
        let mut player = player();
        player.set_digit(7);
        player.tick(600.0);

        assert!(!player.is_running());
        assert!(approx_eq(player.incoming().opacity, 1.0));
    }

    #[test]
    fn test_replacement_cancels_running_plan() {
        let mut player = player();
        player.set_digit(7);
        let first = player.active_plan_id().unwrap();

        player.tick(100.0);
        player.set_digit(9);
        let second = player.active_plan_id().unwrap();
        assert_ne!(first, second);

        // The new roll goes 7 -> 9
        assert_eq!(player.outgoing().digit, 7);
        assert_eq!(player.incoming().digit, 9);

        // Run far past both spans: only the second plan completes
        player.tick(10_000.0);
        let events = player.drain_events();
        assert_eq!(events.len(), 4);
        assert!(events[0].is_started());
        assert!(events[1].is_cancelled());
        assert_eq!(events[1].plan_id(), first);
        assert!(events[2].is_started());
        assert!(events[3].is_completed());
        assert_eq!(events[3].plan_id(), second);

        assert_eq!(player.incoming().digit, 9);
        assert!(approx_eq(player.incoming().opacity, 1.0));
    }

    #[test]
    fn test_envelope_change_resets_without_animating() {
        let mut player = player();
        player.set_digit(7);
        player.tick(100.0);

        player.set_envelope(TimingEnvelope::new(300.0));

        assert!(!player.is_running());
        assert_eq!(player.incoming(), &VisualSlot::visible(7));
        assert_eq!(player.outgoing(), &VisualSlot::hidden(7));

        let events = player.drain_events();
        assert_eq!(events.len(), 2);
        assert!(events[1].is_cancelled());

        // The new envelope drives the next change
        player.set_digit(8);
        assert!(approx_eq(player.active_plan().unwrap().plan.total_ms, 300.0));
    }

    #[test]
    fn test_envelope_change_while_settled_stays_settled() {
        let mut player = player();
        player.set_envelope(TimingEnvelope::new(300.0));

        assert!(!player.is_running());
        assert!(!player.has_pending_events());
        assert_eq!(player.incoming(), &VisualSlot::visible(5));
    }

    #[test]
    fn test_content_height_applies_to_next_plan() {
        let mut player = player();
        player.set_digit(7);

        // The running plan keeps the 20-unit height
        player.set_content_height(40.0);
        assert!(approx_eq(player.incoming().translate_y, 10.0));

        player.tick(700.0);
        player.drain_events();

        // The next plan starts from the new height
        player.set_digit(8);
        assert!(approx_eq(player.incoming().translate_y, 20.0));
    }

    #[test]
    fn test_delayed_plan_holds_through_delay() {
        let mut player = DigitPlayer::new(0)
            .with_content_height(20.0)
            .with_envelope(TimingEnvelope::new(600.0).delay_ms(240.0));
        player.set_digit(1);

        // 120ms in: still inside the delay, nothing has moved
        player.tick(120.0);
        assert!(approx_eq(player.outgoing().opacity, 1.0));
        assert!(approx_eq(player.incoming().opacity, 0.0));

        // The whole span is delay + duration
        player.tick(840.0 - 120.0);
        assert!(!player.is_running());
        assert!(approx_eq(player.incoming().opacity, 1.0));
    }

    #[test]
    fn test_pop_event() {
        let mut player = player();
        player.set_digit(6);

        assert!(player.has_pending_events());
        let event = player.pop_event().unwrap();
        assert!(event.is_started());
        assert!(player.pop_event().is_none());
    }
}
