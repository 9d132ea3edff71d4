//! Piecewise-linear range mapping for render projections

/// What to do with inputs outside the input range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Pin to the nearest output endpoint
    #[default]
    Clamp,
    /// Continue the edge segment linearly
    Extend,
    /// Return the input unchanged
    Identity,
}

/// Map `value` from `input` to `output`.
///
/// Both ranges must have the same length (at least two points) and `input`
/// must be ascending. Degenerate segments (zero-width input) map to the
/// segment's first output instead of producing NaN, which matters while a
/// widget's layout has not been measured yet.
pub fn interpolate(value: f32, input: &[f32], output: &[f32], extrapolation: Extrapolation) -> f32 {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len().min(output.len());
    if n == 0 {
        return value;
    }
    if n == 1 || !value.is_finite() {
        return output[0];
    }

    if value < input[0] || value > input[n - 1] {
        match extrapolation {
            Extrapolation::Clamp => {
                return if value < input[0] {
                    output[0]
                } else {
                    output[n - 1]
                };
            }
            Extrapolation::Identity => return value,
            Extrapolation::Extend => {}
        }
    }

    // Segment containing `value` (edge segments when extending)
    let segment = input[1..n - 1]
        .iter()
        .position(|&edge| value < edge)
        .unwrap_or(n - 2);

    let (x0, x1) = (input[segment], input[segment + 1]);
    let (y0, y1) = (output[segment], output[segment + 1]);
    let width = x1 - x0;
    if width.abs() <= f32::EPSILON {
        return y0;
    }
    y0 + (value - x0) / width * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_mapping() {
        let v = interpolate(150.0, &[0.0, 300.0], &[0.1, 1.0], Extrapolation::Clamp);
        assert!((v - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(
            interpolate(500.0, &[0.0, 100.0], &[1.0, 0.0], Extrapolation::Clamp),
            0.0
        );
        assert_eq!(
            interpolate(-5.0, &[0.0, 100.0], &[1.0, 0.0], Extrapolation::Clamp),
            1.0
        );
    }

    #[test]
    fn test_extend_and_identity() {
        assert_eq!(
            interpolate(200.0, &[0.0, 100.0], &[0.0, 10.0], Extrapolation::Extend),
            20.0
        );
        assert_eq!(
            interpolate(200.0, &[0.0, 100.0], &[0.0, 10.0], Extrapolation::Identity),
            200.0
        );
    }

    #[test]
    fn test_multi_segment() {
        let input = [0.0, 1.0, 2.0];
        let output = [0.0, 10.0, 0.0];
        assert_eq!(interpolate(0.5, &input, &output, Extrapolation::Clamp), 5.0);
        assert_eq!(interpolate(1.5, &input, &output, Extrapolation::Clamp), 5.0);
    }

    #[test]
    fn test_zero_width_range_is_not_nan() {
        let v = interpolate(0.0, &[0.0, 0.0], &[0.1, 1.0], Extrapolation::Clamp);
        assert!(v.is_finite());
    }
}
