//! Star rating: drag for half units, tap for whole units

use aura_animation::{Motion, SpringConfig};
use serde::{Deserialize, Serialize};

use super::{CommitDecision, Release, SnapPolicy};

/// Keeps exact boundaries (a half on drag, a whole unit on tap) from
/// rounding up
const TIE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub max_rating: u32,
    pub spring: SpringConfig,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_rating: 5,
            spring: SpringConfig::snappy(),
        }
    }
}

impl RatingConfig {
    pub fn with_max_rating(mut self, max_rating: u32) -> Self {
        self.max_rating = max_rating;
        self
    }

    pub fn validate(&self) -> aura_core::Result<()> {
        self.spring.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RatingPolicy {
    config: RatingConfig,
}

impl RatingPolicy {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    /// Unit count, treating zero as one
    pub fn max_rating(&self) -> f32 {
        self.config.max_rating.max(1) as f32
    }

    /// Continuous rating at `position` along the track
    fn raw_rating(&self, position: f32, extent: f32) -> f32 {
        if extent <= 0.0 {
            return 0.0;
        }
        (position / extent).clamp(0.0, 1.0) * self.max_rating()
    }

    /// Half-unit rating shown while dragging. A rating exactly between two
    /// halves resolves to the lower one.
    pub fn live_rating(&self, position: f32, extent: f32) -> f32 {
        let halves = (self.raw_rating(position, extent) * 2.0 - 0.5 - TIE_EPSILON).ceil();
        (halves / 2.0).clamp(0.0, self.max_rating())
    }

    /// Whole-unit rating for a tap: any part of a star selects it
    pub fn tap_rating(&self, position: f32, extent: f32) -> f32 {
        (self.raw_rating(position, extent) - TIE_EPSILON)
            .ceil()
            .clamp(0.0, self.max_rating())
    }

    /// Track position that displays `rating`
    pub fn position_for(&self, rating: f32, extent: f32) -> f32 {
        (rating / self.max_rating() * extent).clamp(0.0, extent.max(0.0))
    }
}

impl SnapPolicy for RatingPolicy {
    type Outcome = f32;

    fn project(&self, base: f32, input: f32, extent: f32) -> f32 {
        (base + input).clamp(0.0, extent.max(0.0))
    }

    fn decide(&self, release: &Release) -> CommitDecision<f32> {
        let rating = self.live_rating(release.value, release.extent);
        CommitDecision::new(
            rating,
            self.position_for(rating, release.extent),
            self.config.spring,
        )
    }

    fn tap(&self, position: f32, extent: f32) -> Option<CommitDecision<f32>> {
        let rating = self.tap_rating(position, extent);
        Some(CommitDecision::new(
            rating,
            self.position_for(rating, extent),
            self.config.spring,
        ))
    }

    fn revert_motion(&self) -> Motion {
        Motion::Spring(self.config.spring)
    }
}
