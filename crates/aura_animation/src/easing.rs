//! Easing curves for timed animations

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized time
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// CSS-style cubic bezier with control points (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The platform's default timing curve (`ease` in CSS terms)
    pub const STANDARD: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// Map `t` in `0.0..=1.0` to eased progress. Inputs outside the range are clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t.powi(3),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => bezier(t as f64, x1, y1, x2, y2) as f32,
        }
    }
}

/// Solve x(p) = t for the curve parameter, then return y(p).
///
/// Newton iterations first; bisection when the slope flattens out.
fn bezier(t: f64, x1: f32, y1: f32, x2: f32, y2: f32) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = t;
    for _ in 0..8 {
        let err = coord(p, x1, x2) - t;
        if err.abs() < 1e-7 {
            return coord(p, y1, y2);
        }
        let slope = slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = t;
    for _ in 0..32 {
        let x = coord(p, x1, x2);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = 0.5 * (lo + hi);
    }
    coord(p, y1, y2)
}

/// One coordinate of a unit cubic bezier with endpoints at 0 and 1
#[inline]
fn coord(p: f64, c1: f64, c2: f64) -> f64 {
    let u = 1.0 - p;
    3.0 * u * u * p * c1 + 3.0 * u * p * p * c2 + p * p * p
}

#[inline]
fn slope(p: f64, c1: f64, c2: f64) -> f64 {
    let u = 1.0 - p;
    3.0 * u * u * c1 + 6.0 * u * p * (c2 - c1) + 3.0 * p * p * (1.0 - c2)
}
