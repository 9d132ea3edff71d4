//! Commit policies
//!
//! A policy is the only part of a drag controller that differs between
//! widgets. Both of its hooks are pure: `project` maps (session base,
//! cumulative input) to the live value, and `decide` maps the release
//! sample to a commit and a settle target.

mod free;
mod pinch;
mod rating;
mod snap_points;
mod threshold;

use std::fmt::Debug;

use aura_animation::{Motion, SpringConfig};

pub use free::FreePolicy;
pub use pinch::{PinchConfig, PinchPolicy};
pub use rating::{RatingConfig, RatingPolicy};
pub use snap_points::{SheetSnap, SnapPointsConfig, SnapPointsPolicy};
pub use threshold::{SwipeOutcome, ThresholdConfig, ThresholdPolicy};

/// Tolerance for comparisons against literal thresholds, so that a release
/// exactly on a boundary is not lost to float rounding.
pub(crate) const BOUNDARY_EPSILON: f32 = 1e-3;

/// The final sample of a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Projected value at release
    pub value: f32,
    /// Unprojected `base + input`
    pub raw: f32,
    /// Signed release velocity along the axis (units/second)
    pub velocity: f32,
    pub extent: f32,
}

/// Outcome of a completed gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitDecision<O> {
    pub outcome: O,
    /// Where the settle animation goes
    pub target: f32,
    pub motion: Motion,
}

impl<O> CommitDecision<O> {
    pub fn new(outcome: O, target: f32, motion: impl Into<Motion>) -> Self {
        Self {
            outcome,
            target,
            motion: motion.into(),
        }
    }
}

/// Strategy plugged into a [`SnapController`](crate::SnapController)
pub trait SnapPolicy {
    /// The committed state this policy produces
    type Outcome: Copy + PartialEq + Debug + Send + 'static;

    /// Whether gestures must wait for a measured, non-zero extent
    fn requires_extent(&self) -> bool {
        true
    }

    /// Input that leaves the base unchanged (a zero offset, or a unit factor)
    fn identity_input(&self) -> f32 {
        0.0
    }

    /// Live value for a session started at `base` with cumulative `input`
    fn project(&self, base: f32, input: f32, extent: f32) -> f32;

    /// Commit decision for a released gesture
    fn decide(&self, release: &Release) -> CommitDecision<Self::Outcome>;

    /// Commit decision for a discrete tap at `position`. Policies without
    /// tap support return `None`.
    fn tap(&self, _position: f32, _extent: f32) -> Option<CommitDecision<Self::Outcome>> {
        None
    }

    /// Terminal outcomes stop the controller from accepting gestures
    fn is_terminal(&self, _outcome: &Self::Outcome) -> bool {
        false
    }

    /// Motion used when a cancelled session animates back to its origin
    fn revert_motion(&self) -> Motion {
        Motion::Spring(SpringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_spring() {
        let decision = CommitDecision::new(1u8, 10.0, SpringConfig::stiff());
        assert_eq!(decision.motion, Motion::Spring(SpringConfig::stiff()));
        assert_eq!(decision.target, 10.0);
    }
}
