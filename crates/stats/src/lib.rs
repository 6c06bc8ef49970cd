//! Statistical helper functions shared across the sindex crates.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator (matching R's `var()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator (matching R's `sd()`).
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Returns a copy of `data` sorted ascending (total order, NaN last).
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Median of unsorted data. For even length, averages the middle two values.
/// Returns NaN if empty.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let s = sorted(data);
    let n = s.len();
    if n % 2 == 1 {
        s[n / 2]
    } else {
        (s[n / 2 - 1] + s[n / 2]) / 2.0
    }
}

/// Counts distinct values using an absolute tolerance of 1e-10.
pub fn count_unique(data: &[f64]) -> usize {
    if data.is_empty() {
        return 0;
    }
    sorted(data)
        .windows(2)
        .filter(|w| (w[1] - w[0]).abs() > 1e-10)
        .count()
        + 1
}

/// Rounds `x` to `digits` decimal places, half away from zero.
///
/// Non-finite values pass through unchanged.
pub fn round_digits(x: f64, digits: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = x * factor;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert_eq!(sd(&[5.0]), 0.0);
    }

    #[test]
    fn test_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/1=8
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_median_odd_unsorted() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_median_empty_is_nan() {
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_sorted_nan_last() {
        let s = sorted(&[3.0, f64::NAN, 1.0]);
        assert_eq!(s[0], 1.0);
        assert_eq!(s[1], 3.0);
        assert!(s[2].is_nan());
    }

    #[test]
    fn test_count_unique() {
        assert_eq!(count_unique(&[]), 0);
        assert_eq!(count_unique(&[1.0, 1.0, 2.0, 3.0, 3.0]), 3);
        assert_eq!(count_unique(&[5.0; 10]), 1);
    }

    #[test]
    fn test_round_digits() {
        assert_relative_eq!(round_digits(1.23456, 2), 1.23, epsilon = 1e-12);
        assert_relative_eq!(round_digits(-1.2367, 2), -1.24, epsilon = 1e-12);
        assert_relative_eq!(round_digits(0.5, 0), 1.0, epsilon = 1e-12);
        assert!(round_digits(f64::NAN, 3).is_nan());
        assert_eq!(round_digits(f64::INFINITY, 3), f64::INFINITY);
    }
}
