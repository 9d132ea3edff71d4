//! Animation scheduler
//!
//! Owns every in-flight spring and tween and steps them each frame.
//! Handles are generational: once an animation is removed its id never
//! resolves again, so a controller that cancels a settle can't observe
//! (or be notified by) the stale animation later.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};
use crate::tween::Tween;

new_key_type! {
    pub struct SpringId;
    pub struct TweenId;
}

/// Scheduler shared between the frame driver and controllers
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

/// How a value should travel to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Spring(SpringConfig),
    Timing { duration_ms: u32, easing: Easing },
}

impl Motion {
    pub fn timing(duration_ms: u32) -> Self {
        Motion::Timing {
            duration_ms,
            easing: Easing::STANDARD,
        }
    }
}

impl From<SpringConfig> for Motion {
    fn from(config: SpringConfig) -> Self {
        Motion::Spring(config)
    }
}

/// Handle to a scheduled animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    Spring(SpringId),
    Tween(TweenId),
}

/// Snapshot of an animation read by its owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSample {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    pub finished: bool,
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    tweens: SlotMap<TweenId, Tween>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            tweens: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    /// Create a scheduler wrapped for sharing with controllers
    pub fn shared() -> SharedScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        self.springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Mutate a spring in place, returning whether it still exists
    pub fn with_spring_mut<F: FnOnce(&mut Spring)>(&mut self, id: SpringId, f: F) -> bool {
        match self.springs.get_mut(id) {
            Some(spring) => {
                f(spring);
                true
            }
            None => false,
        }
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    /// Start animating from `from` toward `to`
    pub fn animate(&mut self, from: f32, to: f32, velocity: f32, motion: Motion) -> AnimationId {
        match motion {
            Motion::Spring(config) => {
                let mut spring = Spring::new(config, from);
                spring.set_target(to);
                spring.set_velocity(velocity);
                AnimationId::Spring(self.add_spring(spring))
            }
            Motion::Timing {
                duration_ms,
                easing,
            } => AnimationId::Tween(self.add_tween(Tween::new(from, to, duration_ms, easing))),
        }
    }

    /// Read an animation's current state, or None if it was removed
    pub fn sample(&self, id: AnimationId) -> Option<AnimationSample> {
        match id {
            AnimationId::Spring(id) => self.springs.get(id).map(|s| AnimationSample {
                value: s.value(),
                velocity: s.velocity(),
                target: s.target(),
                finished: s.is_settled(),
            }),
            AnimationId::Tween(id) => self.tweens.get(id).map(|t| AnimationSample {
                value: t.value(),
                velocity: t.velocity(),
                target: t.target(),
                finished: t.is_finished(),
            }),
        }
    }

    /// Remove an animation. Returns false if it was already gone.
    pub fn remove(&mut self, id: AnimationId) -> bool {
        match id {
            AnimationId::Spring(id) => self.springs.remove(id).is_some(),
            AnimationId::Tween(id) => self.tweens.remove(id).is_some(),
        }
    }

    /// Tick all animations using wall-clock time since the last tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.tick_dt(dt);
    }

    /// Tick all animations by a fixed `dt` (seconds)
    pub fn tick_dt(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
            || self.tweens.iter().any(|(_, t)| !t.is_finished())
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Get the number of tweens in the scheduler
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
