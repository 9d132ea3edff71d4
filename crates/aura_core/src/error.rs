//! Configuration error types

use thiserror::Error;

/// Errors raised when validating widget or policy configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Spring stiffness, damping or mass is not a positive finite number
    #[error("invalid spring parameter `{name}`: {value}")]
    InvalidSpring { name: &'static str, value: f32 },

    /// A fractional threshold fell outside its legal range
    #[error("threshold `{name}` must be within {min}..={max}, got {value}")]
    ThresholdOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A snap point fraction fell outside `0.0..=1.0`
    #[error("snap point #{index} must be a fraction within 0..=1, got {value}")]
    InvalidSnapPoint { index: usize, value: f32 },

    /// Lower bound exceeds upper bound
    #[error("scale bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f32, max: f32 },

    /// A quantity that must be strictly positive was not
    #[error("`{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
}

/// Result type for configuration validation
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Check that `value` is a finite number strictly greater than zero
pub fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Check that `value` lies in `min..=max`
pub fn ensure_in_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("width", 1.0).is_ok());
        assert_eq!(
            ensure_positive("width", 0.0),
            Err(ConfigError::NotPositive {
                name: "width",
                value: 0.0
            })
        );
        assert!(ensure_positive("width", f32::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvertedBounds { min: 3.0, max: 1.0 };
        assert_eq!(err.to_string(), "scale bounds are inverted: min 3 > max 1");
    }
}
