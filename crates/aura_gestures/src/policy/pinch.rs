//! Pinch-to-zoom: multiplicative scale, clamped only at release

use aura_animation::{Motion, SpringConfig};
use serde::{Deserialize, Serialize};

use super::{CommitDecision, Release, SnapPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinchConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Spring used to pull an out-of-bounds scale back in
    pub spring: SpringConfig,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 3.0,
            spring: SpringConfig::default(),
        }
    }
}

impl PinchConfig {
    pub fn with_bounds(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn validate(&self) -> aura_core::Result<()> {
        aura_core::error::ensure_positive("min_scale", self.min_scale)?;
        aura_core::error::ensure_positive("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(aura_core::ConfigError::InvertedBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        self.spring.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PinchPolicy {
    config: PinchConfig,
}

impl PinchPolicy {
    pub fn new(config: PinchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    /// Clamp into the configured bounds. Inverted bounds resolve to `min`.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.min(self.config.max_scale).max(self.config.min_scale)
    }
}

impl SnapPolicy for PinchPolicy {
    type Outcome = f32;

    /// Scale is a ratio, so there is no extent to wait for
    fn requires_extent(&self) -> bool {
        false
    }

    fn identity_input(&self) -> f32 {
        1.0
    }

    /// `input` is the cumulative pinch factor; the live scale is not clamped
    fn project(&self, base: f32, input: f32, _extent: f32) -> f32 {
        base * input.max(0.0)
    }

    fn decide(&self, release: &Release) -> CommitDecision<f32> {
        let scale = self.clamp_scale(release.value);
        CommitDecision::new(scale, scale, self.config.spring)
    }

    fn revert_motion(&self) -> Motion {
        Motion::Spring(self.config.spring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(value: f32) -> Release {
        Release {
            value,
            raw: value,
            velocity: 0.0,
            extent: 0.0,
        }
    }

    #[test]
    fn test_multiplicative_projection() {
        let policy = PinchPolicy::default();
        assert_eq!(policy.project(2.0, 1.5, 0.0), 3.0);
        // Unclamped while pinching
        assert_eq!(policy.project(1.0, 5.0, 0.0), 5.0);
        assert_eq!(policy.project(1.0, 0.5, 0.0), 0.5);
    }

    #[test]
    fn test_release_clamps_to_bounds() {
        let policy = PinchPolicy::default();
        assert_eq!(policy.decide(&release(5.0)).target, 3.0);
        assert_eq!(policy.decide(&release(0.4)).target, 1.0);

        let inside = policy.decide(&release(2.2));
        assert_eq!(inside.outcome, 2.2);
        assert_eq!(inside.target, 2.2);
    }

    #[test]
    fn test_validate() {
        assert!(PinchConfig::default().validate().is_ok());
        assert_eq!(
            PinchConfig::default().with_bounds(3.0, 1.0).validate(),
            Err(aura_core::ConfigError::InvertedBounds { min: 3.0, max: 1.0 })
        );
    }
}
