//! Fixed-duration animations

use crate::easing::Easing;

/// Animates a scalar from `from` to `to` over a fixed duration
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    elapsed_ms: f32,
    easing: Easing,
    value: f32,
    velocity: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        let mut tween = Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
            value: from,
            velocity: 0.0,
        };
        // A zero-length tween is complete on creation
        if duration_ms == 0 {
            tween.value = to;
        }
        tween
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Approximate velocity over the last step (units/second)
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Normalized progress in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_finished() || !dt.is_finite() || dt <= 0.0 {
            if self.is_finished() {
                self.value = self.to;
                self.velocity = 0.0;
            }
            return;
        }
        let previous = self.value;
        self.elapsed_ms += dt * 1000.0;
        let eased = self.easing.apply(self.progress());
        self.value = self.from + (self.to - self.from) * eased;
        self.velocity = (self.value - previous) / dt;
        if self.is_finished() {
            self.value = self.to;
        }
    }
}
