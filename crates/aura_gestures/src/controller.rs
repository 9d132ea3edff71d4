//! Continuous drag-to-commit controller
//!
//! [`SnapController`] turns a stream of drag samples into a live value and,
//! when the drag ends, a committed outcome plus a settle animation. Everything
//! that differs between widgets lives in the [`SnapPolicy`].
//!
//! ```text
//! Idle ──begin──▶ Dragging ──end/cancel──▶ Settling ──settled──▶ Idle
//!  ▲  ╲                                      │   ╲
//!  │   ╰──tap/animate_to──▶──────────────────╯    ╰──terminal──▶ Committed
//!  ╰── a new gesture pre-empts a settle ──────╯
//! ```
//!
//! Settle completion is observed on [`SnapController::tick`]. A pending
//! settle is tagged with the generation that started it and is `take()`n
//! when it completes, so each settle reports at most once and a superseded
//! settle never reports at all.

use std::fmt;

use aura_animation::{AnimatedValue, Motion, SharedScheduler};
use aura_core::events::event_types::{DRAG_END, DRAG_START, GESTURE_CANCEL, TAP};
use aura_core::StateMachine;

use crate::policy::{CommitDecision, Release, SnapPolicy};
use crate::session::DragSession;
use crate::state::{controller_events, ControllerState};

/// How a finished settle ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleEvent<O> {
    /// A gesture or tap commit finished animating
    Committed(O),
    /// A cancelled session returned to its origin
    Reverted,
    /// An imperative reposition finished
    Repositioned,
}

#[derive(Debug, Clone, Copy)]
struct PendingSettle<O> {
    generation: u64,
    kind: SettleEvent<O>,
}

type CommitCallback<O> = Box<dyn FnMut(O) + Send>;

pub struct SnapController<P: SnapPolicy> {
    policy: P,
    fsm: StateMachine<ControllerState>,
    extent: f32,
    value: AnimatedValue,
    session: Option<DragSession>,
    committed: Option<P::Outcome>,
    settle: Option<PendingSettle<P::Outcome>>,
    generation: u64,
    on_commit: Option<CommitCallback<P::Outcome>>,
}

impl<P: SnapPolicy> SnapController<P> {
    /// Controller without a scheduler: settles complete on the next tick
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            fsm: StateMachine::new(ControllerState::Idle),
            extent: 0.0,
            value: AnimatedValue::new(0.0),
            session: None,
            committed: None,
            settle: None,
            generation: 0,
            on_commit: None,
        }
    }

    pub fn with_scheduler(policy: P, scheduler: &SharedScheduler) -> Self {
        let mut controller = Self::new(policy);
        controller.value.set_scheduler(scheduler);
        controller
    }

    /// Set the resting value before any interaction
    pub fn with_value(mut self, value: f32) -> Self {
        self.value.set(value);
        self
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.set_extent(extent);
        self
    }

    /// Called when a commit settle finishes
    pub fn on_commit<F>(&mut self, callback: F)
    where
        F: FnMut(P::Outcome) + Send + 'static,
    {
        self.on_commit = Some(Box::new(callback));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn state(&self) -> ControllerState {
        self.fsm.current_state()
    }

    pub fn state_machine(&self) -> &StateMachine<ControllerState> {
        &self.fsm
    }

    /// Live, render-ready value
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    /// Where the value is heading
    pub fn target(&self) -> f32 {
        self.value.target()
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn committed(&self) -> Option<P::Outcome> {
        self.committed
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dragging(&self) -> bool {
        self.state().is_dragging()
    }

    pub fn is_settling(&self) -> bool {
        self.fsm.is_in(ControllerState::Settling)
    }

    /// True once a terminal outcome was decided, even while it is still
    /// animating in
    pub fn is_locked(&self) -> bool {
        if self.state().is_terminal() {
            return true;
        }
        match &self.settle {
            Some(PendingSettle {
                kind: SettleEvent::Committed(outcome),
                ..
            }) => self.policy.is_terminal(outcome),
            _ => false,
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Record a layout measurement. A running session keeps the extent it
    /// started with.
    pub fn set_extent(&mut self, extent: f32) {
        if !extent.is_finite() || extent < 0.0 {
            tracing::debug!(extent, "ignoring invalid extent");
            return;
        }
        self.extent = extent;
    }

    fn extent_ready(&self, extent: f32) -> bool {
        !self.policy.requires_extent() || (extent.is_finite() && extent > 0.0)
    }

    // =========================================================================
    // Gesture lifecycle
    // =========================================================================

    /// Start a session along `axis_extent`, applying input to
    /// `initial_progress`.
    ///
    /// Returns `false` (and stays put) when the extent is not measured yet or
    /// the controller is locked. Pre-empts any running settle from the
    /// current animated value; the session's origin is then the settle's
    /// target, so a cancel lands on a legal resting value.
    pub fn begin(&mut self, axis_extent: f32, initial_progress: f32) -> bool {
        if self.is_locked() {
            tracing::trace!("begin refused: controller is committed");
            return false;
        }
        if !self.extent_ready(axis_extent) {
            tracing::trace!(axis_extent, "begin refused: extent not measured");
            return false;
        }
        let axis_extent = if axis_extent.is_finite() {
            axis_extent.max(0.0)
        } else {
            0.0
        };

        let origin = if self.settle.is_some() {
            self.value.target()
        } else {
            self.value.get()
        };
        self.value.stop();
        self.settle = None;
        self.generation += 1;

        let base = if initial_progress.is_finite() {
            initial_progress
        } else {
            self.value.get()
        };
        let mut session = DragSession::new(axis_extent, origin, base, self.generation);
        let policy = &self.policy;
        let progress = session.apply(policy.identity_input(), |b, i, e| policy.project(b, i, e));
        self.value.set(progress);
        self.session = Some(session);
        self.fsm.send(DRAG_START);

        tracing::trace!(generation = self.generation, base, "drag session started");
        true
    }

    /// Apply the cumulative input since `begin`. Non-finite samples are
    /// ignored.
    pub fn update(&mut self, input: f32) {
        if !self.is_dragging() || !input.is_finite() {
            return;
        }
        let policy = &self.policy;
        if let Some(session) = self.session.as_mut() {
            let progress = session.apply(input, |b, i, e| policy.project(b, i, e));
            self.value.set(progress);
        }
    }

    /// Finish the session with its final sample and release velocity.
    ///
    /// The decision is recorded as the committed outcome and the settle
    /// animation starts toward its target.
    pub fn end(&mut self, final_input: f32, velocity: f32) -> Option<CommitDecision<P::Outcome>> {
        if !self.is_dragging() {
            return None;
        }
        self.update(final_input);

        let session = self.session.as_mut()?;
        session.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let release = Release {
            value: session.clamped_progress,
            raw: session.base + session.raw_offset,
            velocity: session.velocity,
            extent: session.axis_extent,
        };

        let decision = self.policy.decide(&release);
        tracing::debug!(
            generation = self.generation,
            value = release.value,
            velocity = release.velocity,
            outcome = ?decision.outcome,
            target = decision.target,
            "gesture released"
        );

        self.fsm.send(DRAG_END);
        self.start_settle(decision.target, decision.motion, SettleEvent::Committed(decision.outcome));
        self.committed = Some(decision.outcome);
        Some(decision)
    }

    /// Abort a dragging session and animate back to where it started. The
    /// cancelled session never commits.
    pub fn cancel(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let Some(session) = self.session else {
            return false;
        };
        self.fsm.send(GESTURE_CANCEL);
        let motion = self.policy.revert_motion();
        self.start_settle(session.origin, motion, SettleEvent::Reverted);
        tracing::trace!(generation = self.generation, "drag session cancelled");
        true
    }

    /// Discrete commit at `position`, for policies with tap support
    pub fn tap(&mut self, position: f32) -> Option<CommitDecision<P::Outcome>> {
        if self.is_locked() || self.is_dragging() || !position.is_finite() {
            return None;
        }
        if !self.extent_ready(self.extent) {
            return None;
        }
        let decision = self.policy.tap(position, self.extent)?;

        self.value.stop();
        self.session = None;
        self.generation += 1;
        self.fsm.send(TAP);
        self.start_settle(decision.target, decision.motion, SettleEvent::Committed(decision.outcome));
        self.committed = Some(decision.outcome);
        Some(decision)
    }

    // =========================================================================
    // Imperative positioning
    // =========================================================================

    /// Animate to `target` outside of a gesture. With an `outcome`, the
    /// settle commits it like a released gesture would.
    ///
    /// Refused while dragging or locked.
    pub fn animate_to(
        &mut self,
        target: f32,
        outcome: Option<P::Outcome>,
        motion: impl Into<Motion>,
    ) -> bool {
        if self.is_locked() || self.is_dragging() || !target.is_finite() {
            return false;
        }
        self.session = None;
        self.generation += 1;
        self.fsm.send(controller_events::ANIMATE);
        let kind = match outcome {
            Some(outcome) => {
                self.committed = Some(outcome);
                SettleEvent::Committed(outcome)
            }
            None => SettleEvent::Repositioned,
        };
        self.start_settle(target, motion.into(), kind);
        true
    }

    /// Move to `value` immediately, recording `outcome` without firing the
    /// commit callback
    pub fn jump_to(&mut self, value: f32, outcome: Option<P::Outcome>) -> bool {
        if self.is_locked() || self.is_dragging() || !value.is_finite() {
            return false;
        }
        self.session = None;
        self.settle = None;
        self.generation += 1;
        self.value.set(value);
        if let Some(outcome) = outcome {
            self.committed = Some(outcome);
        }
        let state = match outcome {
            Some(outcome) if self.policy.is_terminal(&outcome) => ControllerState::Committed,
            _ => ControllerState::Idle,
        };
        self.fsm.reset(state);
        true
    }

    fn start_settle(&mut self, target: f32, motion: Motion, kind: SettleEvent<P::Outcome>) {
        self.value.animate_to(target, motion);
        self.settle = Some(PendingSettle {
            generation: self.generation,
            kind,
        });
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Pull the animated value and report a finished settle, once.
    ///
    /// Call after the scheduler has been ticked for the frame.
    pub fn tick(&mut self) -> Option<SettleEvent<P::Outcome>> {
        let finished = self.value.update() || !self.value.is_animating();
        if !finished || !self.is_settling() {
            return None;
        }
        let pending = self.settle.take()?;
        if pending.generation != self.generation {
            tracing::trace!(
                stale = pending.generation,
                current = self.generation,
                "discarding stale settle"
            );
            return None;
        }

        match pending.kind {
            SettleEvent::Committed(outcome) => {
                let event = if self.policy.is_terminal(&outcome) {
                    controller_events::SETTLED_TERMINAL
                } else {
                    controller_events::SETTLED
                };
                self.fsm.send(event);
                self.session = None;
                if let Some(callback) = self.on_commit.as_mut() {
                    callback(outcome);
                }
            }
            SettleEvent::Reverted | SettleEvent::Repositioned => {
                self.fsm.send(controller_events::SETTLED);
                self.session = None;
            }
        }
        Some(pending.kind)
    }
}

impl<P: SnapPolicy> fmt::Debug for SnapController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapController")
            .field("state", &self.state())
            .field("value", &self.value.get())
            .field("extent", &self.extent)
            .field("committed", &self.committed)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use aura_animation::AnimationScheduler;

    use super::*;
    use crate::policy::{
        PinchPolicy, RatingPolicy, SheetSnap, SnapPointsConfig, SnapPointsPolicy, SwipeOutcome,
        ThresholdPolicy,
    };

    fn run_frames<P: SnapPolicy>(
        scheduler: &SharedScheduler,
        controller: &mut SnapController<P>,
        frames: usize,
    ) -> Vec<SettleEvent<P::Outcome>> {
        let mut events = Vec::new();
        for _ in 0..frames {
            scheduler.lock().tick_dt(1.0 / 60.0);
            if let Some(event) = controller.tick() {
                events.push(event);
            }
        }
        events
    }

    #[test]
    fn test_begin_requires_extent() {
        let mut controller = SnapController::new(ThresholdPolicy::default());
        assert!(!controller.begin(0.0, 0.0));
        assert!(!controller.begin(f32::NAN, 0.0));
        assert_eq!(controller.state(), ControllerState::Idle);

        // Pinch has no extent to wait for
        let mut zoom = SnapController::new(PinchPolicy::default()).with_value(1.0);
        assert!(zoom.begin(0.0, 1.0));
    }

    #[test]
    fn test_swipe_confirm_is_terminal() {
        let scheduler = AnimationScheduler::shared();
        let mut controller = SnapController::with_scheduler(ThresholdPolicy::default(), &scheduler);
        let completed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&completed);
        controller.on_commit(move |outcome| sink.lock().unwrap().push(outcome));

        assert!(controller.begin(300.0, 0.0));
        controller.update(150.0);
        assert_eq!(controller.value(), 150.0);
        let decision = controller.end(240.0, 0.0).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Confirmed);

        // Locked while the confirm animates in
        assert!(controller.is_locked());
        assert!(!controller.begin(300.0, 0.0));

        let events = run_frames(&scheduler, &mut controller, 180);
        assert_eq!(events, vec![SettleEvent::Committed(SwipeOutcome::Confirmed)]);
        assert_eq!(controller.state(), ControllerState::Committed);
        assert_eq!(controller.value(), 300.0);
        assert_eq!(*completed.lock().unwrap(), vec![SwipeOutcome::Confirmed]);
    }

    #[test]
    fn test_cancel_reverts_without_commit() {
        let scheduler = AnimationScheduler::shared();
        let mut controller = SnapController::with_scheduler(ThresholdPolicy::default(), &scheduler);
        let commits = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&commits);
        controller.on_commit(move |_| *sink.lock().unwrap() += 1);

        controller.begin(300.0, 0.0);
        controller.update(280.0);
        assert!(controller.cancel());
        assert!(!controller.cancel());

        let events = run_frames(&scheduler, &mut controller, 180);
        assert_eq!(events, vec![SettleEvent::Reverted]);
        assert_eq!(controller.value(), 0.0);
        assert_eq!(controller.committed(), None);
        assert_eq!(*commits.lock().unwrap(), 0);
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_new_gesture_preempts_settle() {
        let scheduler = AnimationScheduler::shared();
        let policy = SnapPointsPolicy::new(SnapPointsConfig::default().with_snap_points(&[0.4, 0.9]));
        let mut controller = SnapController::with_scheduler(policy, &scheduler).with_value(480.0);

        controller.begin(800.0, controller.value());
        controller.end(-350.0, 0.0);
        run_frames(&scheduler, &mut controller, 5);
        let mid_flight = controller.value();
        assert!(mid_flight < 480.0 && mid_flight > 80.0);

        // Grab the sheet mid-settle: the session starts where it is
        assert!(controller.begin(800.0, controller.value()));
        assert_eq!(controller.session().map(|s| s.base), Some(mid_flight));
        assert!(run_frames(&scheduler, &mut controller, 30).is_empty());
        assert_eq!(controller.value(), mid_flight);

        controller.end(0.0, 600.0);
        let events = run_frames(&scheduler, &mut controller, 900);
        assert_eq!(events, vec![SettleEvent::Committed(SheetSnap::Closed)]);
        assert!((controller.value() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn test_tap_commits_without_session() {
        let mut controller = SnapController::new(RatingPolicy::default()).with_extent(300.0);
        let decision = controller.tap(165.0).unwrap();
        assert_eq!(decision.outcome, 3.0);
        assert!(controller.session().is_none());

        assert_eq!(controller.tick(), Some(SettleEvent::Committed(3.0)));
        assert_eq!(controller.tick(), None);
        assert_eq!(controller.value(), 180.0);
    }

    #[test]
    fn test_tap_unsupported_by_policy() {
        let mut controller = SnapController::new(ThresholdPolicy::default()).with_extent(300.0);
        assert!(controller.tap(100.0).is_none());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_non_finite_samples_ignored() {
        let mut controller = SnapController::new(ThresholdPolicy::default());
        controller.begin(300.0, 0.0);
        controller.update(100.0);
        controller.update(f32::NAN);
        controller.update(f32::INFINITY);
        assert_eq!(controller.value(), 100.0);

        let decision = controller.end(f32::NAN, f32::NAN).unwrap();
        assert_eq!(decision.outcome, SwipeOutcome::Pending);
        assert_eq!(controller.session().map(|s| s.velocity), Some(0.0));
    }

    #[test]
    fn test_imperative_positioning() {
        let scheduler = AnimationScheduler::shared();
        let mut controller =
            SnapController::with_scheduler(SnapPointsPolicy::default(), &scheduler).with_value(800.0);

        assert!(controller.animate_to(600.0, Some(SheetSnap::Point(0)), Motion::timing(300)));
        let events = run_frames(&scheduler, &mut controller, 30);
        assert_eq!(events, vec![SettleEvent::Committed(SheetSnap::Point(0))]);
        assert_eq!(controller.value(), 600.0);

        assert!(controller.jump_to(200.0, None));
        assert_eq!(controller.value(), 200.0);
        assert_eq!(controller.committed(), Some(SheetSnap::Point(0)));

        controller.begin(800.0, 200.0);
        assert!(!controller.animate_to(0.0, None, Motion::timing(100)));
        assert!(!controller.jump_to(0.0, None));
    }

    #[test]
    fn test_set_extent_rejects_garbage() {
        let mut controller = SnapController::new(ThresholdPolicy::default());
        controller.set_extent(250.0);
        controller.set_extent(-1.0);
        controller.set_extent(f32::NAN);
        assert_eq!(controller.extent(), 250.0);
    }
}
