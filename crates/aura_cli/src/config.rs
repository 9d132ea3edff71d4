//! aura.toml handling

use anyhow::{Context, Result};
use aura_core::error::{ensure_in_range, ensure_positive};
use aura_gestures::PinchConfig;
use aura_widgets::{BottomSheetConfig, ImageComparerConfig, RatingSwipeConfig, SwipeButtonConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level widget configuration (aura.toml)
///
/// Every table is optional; missing tables and keys take the widget
/// defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuraConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub swipe: SwipeButtonConfig,
    #[serde(default)]
    pub sheet: BottomSheetConfig,
    #[serde(default)]
    pub rating: RatingSwipeConfig,
    #[serde(default)]
    pub zoom: PinchConfig,
    #[serde(default)]
    pub comparer: ImageComparerConfig,
}

/// Size of the surface the replayed widget is laid out in
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    390.0
}

fn default_height() -> f32 {
    844.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl AuraConfig {
    /// Load and validate an aura.toml
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check every table, naming the first one that fails
    pub fn validate(&self) -> Result<()> {
        ensure_positive("width", self.layout.width).context("[layout]")?;
        ensure_positive("height", self.layout.height).context("[layout]")?;

        ensure_positive("height", self.swipe.height).context("[swipe]")?;
        self.swipe.threshold.validate().context("[swipe.threshold]")?;

        self.sheet.snap.validate().context("[sheet.snap]")?;

        ensure_positive("width", self.rating.width).context("[rating]")?;
        self.rating.rating.validate().context("[rating.rating]")?;

        self.zoom.validate().context("[zoom]")?;

        ensure_in_range("initial_value", self.comparer.initial_value, 0.0, 1.0)
            .context("[comparer]")?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = AuraConfig::from_toml("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.width, 390.0);
        assert_eq!(config.swipe.threshold.threshold, 0.7);
        assert_eq!(config.zoom.max_scale, 3.0);
    }

    #[test]
    fn test_fixture_parses() {
        let config = AuraConfig::from_toml(include_str!("../fixtures/aura.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.swipe.title, "Slide to pay");
        assert_eq!(config.sheet.snap.snap_points.as_slice(), &[0.4, 0.9]);
        assert_eq!(config.rating.rating.max_rating, 10);
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let config = AuraConfig::from_toml("[zoom]\nmin_scale = 4.0\nmax_scale = 2.0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "[zoom]");
        assert_eq!(
            err.root_cause().to_string(),
            "scale bounds are inverted: min 4 > max 2"
        );
    }

    #[test]
    fn test_bad_snap_point_rejected() {
        let config = AuraConfig::from_toml("[sheet.snap]\nsnap_points = [0.5, 1.5]\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = AuraConfig::from_toml(include_str!("../fixtures/aura.toml")).unwrap();
        let text = config.to_toml().unwrap();
        let again = AuraConfig::from_toml(&text).unwrap();
        assert_eq!(again.swipe, config.swipe);
        assert_eq!(again.sheet, config.sheet);
    }
}
