//! Swipe-to-confirm: commit once the thumb travels far enough

use aura_animation::{Motion, SpringConfig};
use aura_core::error::ensure_in_range;
use serde::{Deserialize, Serialize};

use super::{CommitDecision, Release, SnapPolicy, BOUNDARY_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeOutcome {
    #[default]
    Pending,
    Confirmed,
}

/// Threshold policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Fraction of the travel extent that confirms (default: 0.70)
    pub threshold: f32,
    /// Spring used to run the thumb to the end on confirm
    pub confirm_spring: SpringConfig,
    /// Spring used to return the thumb to the start
    pub return_spring: SpringConfig,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: 0.70,
            confirm_spring: SpringConfig::new(250.0, 30.0, 1.0),
            return_spring: SpringConfig::new(300.0, 25.0, 0.8),
        }
    }
}

impl ThresholdConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> aura_core::Result<()> {
        ensure_in_range("threshold", self.threshold, f32::EPSILON, 1.0)?;
        self.confirm_spring.validate()?;
        self.return_spring.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThresholdPolicy {
    config: ThresholdConfig,
}

impl ThresholdPolicy {
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }
}

impl SnapPolicy for ThresholdPolicy {
    type Outcome = SwipeOutcome;

    fn project(&self, base: f32, input: f32, extent: f32) -> f32 {
        (base + input).clamp(0.0, extent.max(0.0))
    }

    fn decide(&self, release: &Release) -> CommitDecision<SwipeOutcome> {
        let threshold = release.extent * self.config.threshold;
        if release.value >= threshold - BOUNDARY_EPSILON {
            CommitDecision::new(
                SwipeOutcome::Confirmed,
                release.extent,
                self.config.confirm_spring,
            )
        } else {
            CommitDecision::new(SwipeOutcome::Pending, 0.0, self.config.return_spring)
        }
    }

    fn is_terminal(&self, outcome: &SwipeOutcome) -> bool {
        *outcome == SwipeOutcome::Confirmed
    }

    fn revert_motion(&self) -> Motion {
        Motion::Spring(self.config.return_spring)
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
            extent: 300.0,
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let policy = ThresholdPolicy::default();

        let confirmed = policy.decide(&release(210.0));
        assert_eq!(confirmed.outcome, SwipeOutcome::Confirmed);
        assert_eq!(confirmed.target, 300.0);

        let pending = policy.decide(&release(209.0));
        assert_eq!(pending.outcome, SwipeOutcome::Pending);
        assert_eq!(pending.target, 0.0);
    }

    #[test]
    fn test_projection_clamps() {
        let policy = ThresholdPolicy::default();
        assert_eq!(policy.project(0.0, -40.0, 300.0), 0.0);
        assert_eq!(policy.project(0.0, 900.0, 300.0), 300.0);
        assert_eq!(policy.project(0.0, 120.0, 300.0), 120.0);
    }

    #[test]
    fn test_confirm_is_terminal() {
        let policy = ThresholdPolicy::default();
        assert!(policy.is_terminal(&SwipeOutcome::Confirmed));
        assert!(!policy.is_terminal(&SwipeOutcome::Pending));
    }

    #[test]
    fn test_validate() {
        assert!(ThresholdConfig::default().validate().is_ok());
        assert!(ThresholdConfig::default().with_threshold(0.0).validate().is_err());
        assert!(ThresholdConfig::default().with_threshold(1.2).validate().is_err());
    }
}
