//! Unsnapped position along a track (before/after divider)

use aura_animation::{Motion, SpringConfig};

use super::{CommitDecision, Release, SnapPolicy};

#[derive(Debug, Clone, Copy, Default)]
pub struct FreePolicy;

impl SnapPolicy for FreePolicy {
    type Outcome = f32;

    fn project(&self, base: f32, input: f32, extent: f32) -> f32 {
        (base + input).clamp(0.0, extent.max(0.0))
    }

    /// Commits wherever the finger let go
    fn decide(&self, release: &Release) -> CommitDecision<f32> {
        CommitDecision::new(release.value, release.value, SpringConfig::stiff())
    }

    fn revert_motion(&self) -> Motion {
        Motion::Spring(SpringConfig::stiff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_in_place() {
        let release = Release {
            value: 123.0,
            raw: 123.0,
            velocity: 900.0,
            extent: 400.0,
        };
        let decision = FreePolicy.decide(&release);
        assert_eq!(decision.outcome, 123.0);
        assert_eq!(decision.target, 123.0);
        assert_eq!(FreePolicy.project(200.0, 500.0, 400.0), 400.0);
    }
}
