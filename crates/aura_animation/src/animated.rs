//! A scalar that can be set directly or animated through the scheduler
//!
//! This is the render-facing value a widget exposes: gesture code writes it,
//! the paint path reads `get()` every frame. Only the owner writes, so no
//! locking is needed beyond the scheduler's own mutex.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::scheduler::{AnimationId, AnimationScheduler, Motion, SharedScheduler};

#[derive(Debug)]
pub struct AnimatedValue {
    value: f32,
    target: f32,
    animation: Option<AnimationId>,
    /// Weak so a widget never keeps a torn-down scheduler alive
    scheduler: Weak<Mutex<AnimationScheduler>>,
}

impl AnimatedValue {
    /// A value with no scheduler. Animations complete instantly.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            animation: None,
            scheduler: Weak::new(),
        }
    }

    pub fn with_scheduler(value: f32, scheduler: &SharedScheduler) -> Self {
        Self {
            scheduler: Arc::downgrade(scheduler),
            ..Self::new(value)
        }
    }

    pub fn set_scheduler(&mut self, scheduler: &SharedScheduler) {
        self.stop();
        self.scheduler = Arc::downgrade(scheduler);
    }

    /// Current value
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Where the value is heading (equals `get()` when idle)
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Jump to `value`, dropping any running animation
    pub fn set(&mut self, value: f32) {
        self.stop();
        self.value = value;
        self.target = value;
    }

    /// Animate from the current value toward `target`.
    ///
    /// An animation already in flight is replaced; its velocity carries
    /// over so the motion stays continuous. Without a live scheduler the
    /// value jumps straight to `target`.
    pub fn animate_to(&mut self, target: f32, motion: impl Into<Motion>) {
        let motion = motion.into();
        self.target = target;

        let Some(scheduler) = self.scheduler.upgrade() else {
            self.animation = None;
            self.value = target;
            return;
        };
        let mut scheduler = scheduler.lock();

        let velocity = match self.animation.take() {
            Some(previous) => {
                let velocity = scheduler.sample(previous).map_or(0.0, |s| s.velocity);
                scheduler.remove(previous);
                velocity
            }
            None => 0.0,
        };

        self.animation = Some(scheduler.animate(self.value, target, velocity, motion));
    }

    /// Cancel the running animation, freezing the value where it is
    pub fn stop(&mut self) {
        if let Some(id) = self.animation.take() {
            if let Some(scheduler) = self.scheduler.upgrade() {
                scheduler.lock().remove(id);
            }
        }
        self.target = self.value;
    }

    /// Pull the latest value from the scheduler.
    ///
    /// Returns `true` exactly once, on the update where the running
    /// animation finishes. The finished animation is removed.
    pub fn update(&mut self) -> bool {
        let Some(id) = self.animation else {
            return false;
        };
        let Some(scheduler) = self.scheduler.upgrade() else {
            // Scheduler went away mid-flight: land on the target
            self.animation = None;
            self.value = self.target;
            return true;
        };
        let mut scheduler = scheduler.lock();

        match scheduler.sample(id) {
            Some(sample) if sample.finished => {
                scheduler.remove(id);
                self.animation = None;
                self.value = self.target;
                true
            }
            Some(sample) => {
                self.value = sample.value;
                false
            }
            None => {
                // Removed behind our back; treat as interrupted, not finished
                tracing::debug!("animated value lost its animation handle");
                self.animation = None;
                self.target = self.value;
                false
            }
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    fn settle(scheduler: &SharedScheduler, value: &mut AnimatedValue) -> usize {
        let mut finished = 0;
        for _ in 0..240 {
            scheduler.lock().tick_dt(1.0 / 60.0);
            if value.update() {
                finished += 1;
            }
        }
        finished
    }

    #[test]
    fn test_without_scheduler_jumps() {
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(10.0, SpringConfig::default());
        assert_eq!(value.get(), 10.0);
        assert!(!value.is_animating());
        assert!(!value.update());
    }

    #[test]
    fn test_finish_reported_once() {
        let scheduler = AnimationScheduler::shared();
        let mut value = AnimatedValue::with_scheduler(0.0, &scheduler);
        value.animate_to(50.0, SpringConfig::stiff());

        assert_eq!(settle(&scheduler, &mut value), 1);
        assert_eq!(value.get(), 50.0);
        assert_eq!(scheduler.lock().spring_count(), 0);
    }

    #[test]
    fn test_retarget_replaces_animation() {
        let scheduler = AnimationScheduler::shared();
        let mut value = AnimatedValue::with_scheduler(0.0, &scheduler);
        value.animate_to(100.0, SpringConfig::snappy());
        scheduler.lock().tick_dt(1.0 / 60.0);
        value.update();
        value.animate_to(-20.0, SpringConfig::snappy());

        assert_eq!(scheduler.lock().spring_count(), 1);
        assert_eq!(settle(&scheduler, &mut value), 1);
        assert_eq!(value.get(), -20.0);
    }

    #[test]
    fn test_stop_freezes_and_never_finishes() {
        let scheduler = AnimationScheduler::shared();
        let mut value = AnimatedValue::with_scheduler(0.0, &scheduler);
        value.animate_to(100.0, SpringConfig::gentle());
        scheduler.lock().tick_dt(1.0 / 60.0);
        value.update();
        let frozen = value.get();

        value.stop();
        assert_eq!(settle(&scheduler, &mut value), 0);
        assert_eq!(value.get(), frozen);
        assert_eq!(value.target(), frozen);
    }
}
