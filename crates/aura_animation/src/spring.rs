//! Spring physics
//!
//! Damped harmonic oscillator integrated with fourth-order Runge-Kutta.
//! Large frame deltas are split into fixed sub-steps so a dropped frame
//! cannot blow the integration up.

use aura_core::error::{ensure_positive, ConfigError};
use serde::{Deserialize, Serialize};

/// Largest integration step in seconds (120 Hz)
const MAX_STEP: f32 = 1.0 / 120.0;

/// Displacement below which a spring may be considered at rest
const REST_DISPLACEMENT: f32 = 0.01;

/// Speed (units/second) below which a spring may be considered at rest
const REST_SPEED: f32 = 2.0;

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast, critically damped. No visible overshoot.
    pub const fn stiff() -> Self {
        Self::new(400.0, 40.0, 1.0)
    }

    /// Quick with a hint of overshoot
    pub const fn snappy() -> Self {
        Self::new(350.0, 25.0, 1.0)
    }

    /// Soft and slow
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible bounce
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Reject non-positive or non-finite parameters
    pub fn validate(&self) -> aura_core::Result<()> {
        for (name, value) in [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
        ] {
            ensure_positive(name, value)
                .map_err(|_| ConfigError::InvalidSpring { name, value })?;
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    /// Matches the default spring of the platform animation engine the
    /// widgets were tuned against.
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

/// A single animated scalar driven by a spring
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring. Current velocity is kept so interrupted
    /// animations stay continuous.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Inject a velocity (e.g. from a gesture release)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Jump to a value and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_SPEED
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_at_rest_is_settled() {
        let spring = Spring::new(SpringConfig::default(), 5.0);
        assert!(spring.is_settled());
        assert_eq!(spring.target(), 5.0);
    }

    #[test]
    fn test_spring_converges_and_snaps() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.is_settled());

        run(&mut spring, 2.0);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(1.0);

        let mut peak = 0.0f32;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(100.0);
        spring.step(1.0 / 60.0);
        let v = spring.velocity();
        assert!(v > 0.0);

        spring.set_target(-100.0);
        assert_eq!(spring.velocity(), v);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::new(3000.0, 110.0, 1.0), 0.0);
        spring.set_target(10.0);
        spring.step(0.5);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 10.0).abs() < 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(SpringConfig::default().validate().is_ok());
        assert_eq!(
            SpringConfig::new(100.0, 0.0, 1.0).validate(),
            Err(ConfigError::InvalidSpring {
                name: "damping",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_damping_ratio() {
        let config = SpringConfig::new(100.0, 20.0, 1.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-6);
    }
}
