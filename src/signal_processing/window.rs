use std::f64::consts::PI;

const HAMMING_ALPHA: f64 = 0.54;
const HAMMING_BETA: f64 = 0.46;

/// Generate a symmetric Hamming window of `n` points
///
/// `w[i] = 0.54 - 0.46 * cos(2*pi*i / (n - 1))`
///
/// The formula is undefined for `n == 1` (division by zero yields NaN);
/// callers are expected to validate the tap count first.
pub fn hamming_window(n: usize) -> Vec<f64> {
    let denom = n.saturating_sub(1) as f64;
    (0..n)
        .map(|i| HAMMING_ALPHA - HAMMING_BETA * (2.0 * PI * i as f64 / denom).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hamming_endpoints_and_center() {
        let w = hamming_window(31);
        assert_eq!(w.len(), 31);
        assert_abs_diff_eq!(w[0], 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(w[30], 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(w[15], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hamming_symmetric() {
        let w = hamming_window(101);
        for i in 0..w.len() {
            assert_abs_diff_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hamming_empty() {
        assert!(hamming_window(0).is_empty());
    }

    #[test]
    fn test_hamming_single_point_is_degenerate() {
        let w = hamming_window(1);
        assert_eq!(w.len(), 1);
        assert!(w[0].is_nan(), "single-point window should be NaN, got {}", w[0]);
    }
}
