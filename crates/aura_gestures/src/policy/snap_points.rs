//! Bottom sheet snapping
//!
//! Positions are the sheet's top edge measured from the top of the screen,
//! so a larger value means a more closed sheet and `extent` is fully closed.
//! A snap fraction `f` is the visible share of the screen: `extent * (1 - f)`.
//!
//! On release the close checks look at the rendered (damped) position, while
//! the nearest snap point is picked from the raw finger position.

use aura_animation::{Motion, SpringConfig};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::{CommitDecision, Release, SnapPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSnap {
    Closed,
    /// Index into the configured snap points
    Point(usize),
}

impl SheetSnap {
    pub fn is_open(&self) -> bool {
        matches!(self, SheetSnap::Point(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapPointsConfig {
    /// Visible fractions of the screen, e.g. `[0.25, 0.5]`
    pub snap_points: SmallVec<[f32; 4]>,
    /// Closing-direction release speed that always closes (units/second)
    pub close_velocity: f32,
    /// Fraction of travel beyond which a release closes
    pub close_threshold: f32,
    /// Share of input applied when dragging past the most-open point
    pub resistance: f32,
    pub spring: SpringConfig,
}

impl Default for SnapPointsConfig {
    fn default() -> Self {
        Self {
            snap_points: smallvec![0.25, 0.5],
            close_velocity: 400.0,
            close_threshold: 0.80,
            resistance: 0.15,
            spring: SpringConfig::new(100.0, 50.0, 1.0),
        }
    }
}

impl SnapPointsConfig {
    pub fn with_snap_points(mut self, points: &[f32]) -> Self {
        self.snap_points = points.iter().copied().collect();
        self
    }

    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    pub fn validate(&self) -> aura_core::Result<()> {
        for (index, &value) in self.snap_points.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(aura_core::ConfigError::InvalidSnapPoint { index, value });
            }
        }
        aura_core::error::ensure_positive("close_velocity", self.close_velocity)?;
        aura_core::error::ensure_in_range("close_threshold", self.close_threshold, 0.0, 1.0)?;
        aura_core::error::ensure_in_range("resistance", self.resistance, 0.0, 1.0)?;
        self.spring.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapPointsPolicy {
    config: SnapPointsConfig,
}

impl SnapPointsPolicy {
    pub fn new(config: SnapPointsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapPointsConfig {
        &self.config
    }

    /// Number of snap points, counting the implicit fully-open point used
    /// when none are configured
    pub fn point_count(&self) -> usize {
        self.config.snap_points.len().max(1)
    }

    /// Pixel positions of the snap points, in configuration order
    pub fn positions(&self, extent: f32) -> SmallVec<[f32; 4]> {
        if self.config.snap_points.is_empty() {
            return smallvec![0.0];
        }
        self.config
            .snap_points
            .iter()
            .map(|fraction| extent * (1.0 - fraction))
            .collect()
    }

    /// Position of a snap outcome. Out-of-range indices clamp to the last point.
    pub fn position_of(&self, snap: SheetSnap, extent: f32) -> f32 {
        match snap {
            SheetSnap::Closed => extent,
            SheetSnap::Point(index) => {
                let positions = self.positions(extent);
                let index = index.min(positions.len() - 1);
                positions[index]
            }
        }
    }

    /// The snap point nearest to `position`. Ties keep the earlier point.
    pub fn nearest(&self, position: f32, extent: f32) -> (usize, f32) {
        let mut best = (0, f32::INFINITY, extent);
        for (index, &point) in self.positions(extent).iter().enumerate() {
            let distance = (point - position).abs();
            if distance < best.1 {
                best = (index, distance, point);
            }
        }
        (best.0, best.2)
    }

    fn most_open(&self, extent: f32) -> f32 {
        self.positions(extent)
            .iter()
            .copied()
            .fold(extent, f32::min)
    }
}

impl SnapPolicy for SnapPointsPolicy {
    type Outcome = SheetSnap;

    fn project(&self, base: f32, input: f32, extent: f32) -> f32 {
        let extent = extent.max(0.0);
        let raw = base + input;
        let boundary = self.most_open(extent);
        let damped = if raw < boundary {
            // Rubber band: only a fraction of the overshoot is applied
            boundary - (boundary - raw) * self.config.resistance
        } else {
            raw
        };
        damped.clamp(0.0, extent)
    }

    fn decide(&self, release: &Release) -> CommitDecision<SheetSnap> {
        let extent = release.extent;
        let closed = CommitDecision::new(SheetSnap::Closed, extent, self.config.spring);

        if release.velocity > self.config.close_velocity {
            tracing::trace!(velocity = release.velocity, "sheet flung closed");
            return closed;
        }
        if release.value > extent * self.config.close_threshold {
            return closed;
        }

        let (index, target) = self.nearest(release.raw, extent);
        CommitDecision::new(SheetSnap::Point(index), target, self.config.spring)
    }

    fn revert_motion(&self) -> Motion {
        Motion::Spring(self.config.spring)
    }
}
