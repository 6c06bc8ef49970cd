//! Two-sided Kolmogorov-Smirnov and Anderson-Darling tests against a fitted
//! distribution.
//!
//! KS p-values use the exact Marsaglia-Tsang-Wang distribution up to
//! [`KS_EXACT_MAX_N`] observations and the asymptotic Kolmogorov series
//! beyond. AD p-values use the Marsaglia & Marsaglia finite-sample
//! approximation.

use sindex_stats::sorted;

use crate::params::Params;

/// Largest sample size for which the exact KS distribution is used.
pub const KS_EXACT_MAX_N: usize = 100;

/// Bound applied to CDF values before taking logs in the AD statistic.
const AD_CDF_BOUND: f64 = 1e-10;

/// Statistic and p-value of a goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    statistic: f64,
    p_value: f64,
}

impl TestResult {
    /// Test statistic (D for KS, A² for AD).
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// P-value in `[0, 1]`.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

/// Evaluates the fitted CDF at the sorted sample.
fn cdf_values(sample: &[f64], params: &Params) -> Result<Vec<f64>, String> {
    if sample.is_empty() {
        return Err("empty sample".to_string());
    }
    sorted(sample)
        .into_iter()
        .map(|x| {
            params
                .cdf(x)
                .ok_or_else(|| format!("CDF undefined at {x}"))
        })
        .collect()
}

/// Two-sided one-sample Kolmogorov-Smirnov test.
pub fn ks_test(sample: &[f64], params: &Params) -> Result<TestResult, String> {
    let f = cdf_values(sample, params)?;
    let n = f.len();
    let nf = n as f64;
    let d = f
        .iter()
        .enumerate()
        .map(|(i, &fi)| {
            let upper = (i + 1) as f64 / nf - fi;
            let lower = fi - i as f64 / nf;
            upper.max(lower)
        })
        .fold(0.0_f64, f64::max);

    let cdf = if n <= KS_EXACT_MAX_N {
        ks_exact_cdf(n, d)
    } else {
        kolmogorov_cdf(nf.sqrt() * d)
    };
    Ok(TestResult {
        statistic: d,
        p_value: (1.0 - cdf).clamp(0.0, 1.0),
    })
}

/// Anderson-Darling test of a fully specified distribution.
pub fn ad_test(sample: &[f64], params: &Params) -> Result<TestResult, String> {
    let f: Vec<f64> = cdf_values(sample, params)?
        .into_iter()
        .map(|p| p.clamp(AD_CDF_BOUND, 1.0 - AD_CDF_BOUND))
        .collect();
    let n = f.len();
    let nf = n as f64;
    let s: f64 = (0..n)
        .map(|i| (2 * i + 1) as f64 * (f[i].ln() + (1.0 - f[n - 1 - i]).ln()))
        .sum();
    let a2 = -nf - s / nf;
    if !a2.is_finite() {
        return Err("non-finite Anderson-Darling statistic".to_string());
    }
    Ok(TestResult {
        statistic: a2,
        p_value: (1.0 - ad_cdf(n, a2)).clamp(0.0, 1.0),
    })
}

/// P(D_n < d) via the Marsaglia-Tsang-Wang matrix power.
fn ks_exact_cdf(n: usize, d: f64) -> f64 {
    if d <= 0.0 {
        return 0.0;
    }
    if d >= 1.0 {
        return 1.0;
    }
    let nf = n as f64;
    let s = d * d * nf;
    if s > 7.24 || (s > 3.76 && n > 99) {
        return 1.0 - 2.0 * (-(2.000_071 + 0.331 / nf.sqrt() + 1.409 / nf) * s).exp();
    }

    let k = (nf * d) as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;

    let mut hm = vec![0.0; m * m];
    for i in 0..m {
        for j in 0..m {
            if i + 1 >= j {
                hm[i * m + j] = 1.0;
            }
        }
    }
    for i in 0..m {
        hm[i * m] -= h.powi(i as i32 + 1);
        hm[(m - 1) * m + i] -= h.powi((m - i) as i32);
    }
    if 2.0 * h - 1.0 > 0.0 {
        hm[(m - 1) * m] += (2.0 * h - 1.0).powi(m as i32);
    }
    for i in 0..m {
        for j in 0..m {
            if i + 1 > j {
                for g in 1..=(i + 1 - j) {
                    hm[i * m + j] /= g as f64;
                }
            }
        }
    }

    let (q, mut eq) = matrix_power(&hm, m, n);
    let mut s = q[(k - 1) * m + k - 1];
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s < 1e-140 {
            s *= 1e140;
            eq -= 140;
        }
    }
    s * 10f64.powi(eq)
}

/// Raises an `m × m` matrix to the `n`-th power, returning the result and a
/// decimal exponent that keeps entries representable.
fn matrix_power(a: &[f64], m: usize, n: usize) -> (Vec<f64>, i32) {
    if n == 1 {
        return (a.to_vec(), 0);
    }
    let (v, ev) = matrix_power(a, m, n / 2);
    let b = matrix_mul(&v, &v, m);
    let (mut out, mut e) = if n % 2 == 0 {
        (b, 2 * ev)
    } else {
        (matrix_mul(a, &b, m), 2 * ev)
    };
    if out[(m / 2) * m + m / 2] > 1e140 {
        for x in &mut out {
            *x *= 1e-140;
        }
        e += 140;
    }
    (out, e)
}

fn matrix_mul(x: &[f64], y: &[f64], m: usize) -> Vec<f64> {
    let mut z = vec![0.0; m * m];
    for i in 0..m {
        for j in 0..m {
            z[i * m + j] = (0..m).map(|k| x[i * m + k] * y[k * m + j]).sum();
        }
    }
    z
}

/// Limiting Kolmogorov distribution P(K <= x).
fn kolmogorov_cdf(x: f64) -> f64 {
    const TOL: f64 = 1e-12;
    if x <= 0.0 {
        return 0.0;
    }
    if x < 1.0 {
        let z = -(std::f64::consts::PI.powi(2) / 8.0) / (x * x);
        let w = x.ln();
        let mut s = 0.0;
        let mut k = 1.0_f64;
        while k < (2.0 - TOL.ln()).sqrt() {
            s += (k * k * z - w).exp();
            k += 2.0;
        }
        return s * (2.0 * std::f64::consts::PI).sqrt();
    }
    let z = -2.0 * x * x;
    let mut total = 1.0;
    let mut sign = -1.0;
    for k in 1..=100 {
        let term = 2.0 * sign * (z * (k * k) as f64).exp();
        total += term;
        if term.abs() < TOL {
            break;
        }
        sign = -sign;
    }
    total
}

/// Asymptotic AD distribution plus the finite-n error correction.
fn ad_cdf(n: usize, z: f64) -> f64 {
    let x = ad_inf(z);
    x + ad_errfix(n as f64, x)
}

fn ad_inf(z: f64) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    if z < 2.0 {
        (-1.233_714_1 / z).exp() / z.sqrt()
            * (2.00012
                + (0.247105
                    - (0.0649821 - (0.0347962 - (0.011672 - 0.00168691 * z) * z) * z) * z)
                    * z)
    } else {
        (-(1.0776 - (2.30695 - (0.43424 - (0.082433 - (0.008056 - 0.0003146 * z) * z) * z) * z)
            * z)
            .exp())
        .exp()
    }
}

fn ad_errfix(n: f64, x: f64) -> f64 {
    if x > 0.8 {
        return (-130.2137
            + (745.2337 - (1705.091 - (1950.646 - (1116.360 - 255.7844 * x) * x) * x) * x) * x)
            / n;
    }
    let c = 0.01265 + 0.1757 / n;
    if x < c {
        let t = x / c;
        let t = t.sqrt() * (1.0 - t) * (49.0 * t - 102.0);
        return t * (0.0037 / (n * n * n) + 0.00078 / (n * n) + 0.00006) / n;
    }
    let t = (x - c) / (0.8 - c);
    let t = -0.00022633
        + (6.54034 - (14.6538 - (14.458 - (8.259 - 1.91864 * t) * t) * t) * t) * t;
    t * (0.04213 + 0.01365 / n) / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Gamma as GammaDist};

    fn gamma_params() -> Params {
        Params::Gamma {
            shape: 2.0,
            rate: 1.0 / 3.0,
        }
    }

    fn gamma_sample(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let dist = GammaDist::new(2.0, 3.0).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    #[test]
    fn ks_exact_single_observation() {
        // For n = 1, P(D < d) = 2d - 1 on [0.5, 1].
        assert_relative_eq!(ks_exact_cdf(1, 0.75), 0.5, epsilon = 1e-12);
        assert_relative_eq!(ks_exact_cdf(1, 0.9), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn ks_exact_agrees_with_limit_near_five_percent() {
        let n = 100;
        let d = 1.358 / (n as f64).sqrt();
        let exact = 1.0 - ks_exact_cdf(n, d);
        let limit = 1.0 - kolmogorov_cdf(1.358);
        assert_relative_eq!(limit, 0.05, epsilon = 1e-3);
        assert!((exact - limit).abs() < 0.01, "exact {exact}, limit {limit}");
    }

    #[test]
    fn kolmogorov_branches_meet() {
        let below = kolmogorov_cdf(1.0 - 1e-9);
        let above = kolmogorov_cdf(1.0);
        assert_relative_eq!(below, above, epsilon = 1e-8);
    }

    #[test]
    fn ad_critical_values() {
        // Asymptotic 10%, 5% and 1% points.
        for (a2, p) in [(1.933, 0.10), (2.492, 0.05), (3.857, 0.01)] {
            assert_relative_eq!(1.0 - ad_cdf(10_000, a2), p, epsilon = 2e-3);
        }
    }

    #[test]
    fn true_distribution_is_not_rejected() {
        for (n, seed) in [(40, 1), (500, 2)] {
            let sample = gamma_sample(n, seed);
            let ks = ks_test(&sample, &gamma_params()).unwrap();
            let ad = ad_test(&sample, &gamma_params()).unwrap();
            assert!(ks.p_value() > 0.001, "ks p = {}", ks.p_value());
            assert!(ad.p_value() > 0.001, "ad p = {}", ad.p_value());
        }
    }

    #[test]
    fn wrong_distribution_is_rejected() {
        let sample = gamma_sample(300, 3);
        let wrong = Params::Gamma {
            shape: 2.0,
            rate: 1.0,
        };
        let ks = ks_test(&sample, &wrong).unwrap();
        let ad = ad_test(&sample, &wrong).unwrap();
        assert!(ks.p_value() < 1e-3);
        assert!(ad.p_value() < 1e-3);
        assert!(ks.statistic() > 0.3);
    }

    #[test]
    fn empty_sample_fails() {
        assert!(ks_test(&[], &gamma_params()).is_err());
        assert!(ad_test(&[], &gamma_params()).is_err());
    }
}
