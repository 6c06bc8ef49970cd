//! Fitting a family to one reference sample.

use sindex_diagnostics::{DiagnosticKind, Diagnostics, GofTest};
use tracing::debug;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::family::{Family, Method};
use crate::gof::{ad_test, ks_test};
use crate::lmoments::{Lmoments, estimate};
use crate::mle::fit_mle;
use crate::params::Params;

/// Sample accounting and goodness-of-fit results that accompany a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStats {
    prob_zero: f64,
    n_obs: usize,
    n_na: usize,
    pct_na: f64,
    ks_pval: Option<f64>,
    ad_pval: Option<f64>,
}

impl FitStats {
    /// Creates statistics for a sample with `n_obs` entries of which `n_na`
    /// are missing. `pct_na` is derived.
    pub fn new(n_obs: usize, n_na: usize, prob_zero: f64) -> Self {
        let pct_na = if n_obs == 0 {
            0.0
        } else {
            n_na as f64 / n_obs as f64 * 100.0
        };
        Self {
            prob_zero,
            n_obs,
            n_na,
            pct_na,
            ks_pval: None,
            ad_pval: None,
        }
    }

    /// Sets the goodness-of-fit p-values.
    pub fn with_pvalues(mut self, ks_pval: Option<f64>, ad_pval: Option<f64>) -> Self {
        self.ks_pval = ks_pval;
        self.ad_pval = ad_pval;
        self
    }

    /// Fraction of exact zeros among the non-missing values.
    pub fn prob_zero(&self) -> f64 {
        self.prob_zero
    }

    /// Total number of entries, missing included.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Number of missing entries.
    pub fn n_na(&self) -> usize {
        self.n_na
    }

    /// Missing percentage.
    pub fn pct_na(&self) -> f64 {
        self.pct_na
    }

    /// Kolmogorov-Smirnov p-value, if the test ran.
    pub fn ks_pval(&self) -> Option<f64> {
        self.ks_pval
    }

    /// Anderson-Darling p-value, if the test ran.
    pub fn ad_pval(&self) -> Option<f64> {
        self.ad_pval
    }

    /// P-value of `test`.
    pub fn pval(&self, test: GofTest) -> Option<f64> {
        match test {
            GofTest::KolmogorovSmirnov => self.ks_pval,
            GofTest::AndersonDarling => self.ad_pval,
        }
    }
}

/// Result of fitting one sample.
///
/// `params` is `None` whenever the sample was insufficient or the fit
/// failed; [`stats`](Self::stats) is always populated.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedDistribution {
    family: Family,
    method: Method,
    na_thres: f64,
    params: Option<Params>,
    stats: FitStats,
    sample: Vec<f64>,
}

impl FittedDistribution {
    /// Distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Missing-value tolerance used.
    pub fn na_thres(&self) -> f64 {
        self.na_thres
    }

    /// Fitted parameters, `None` if undefined.
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Sample accounting and p-values.
    pub fn stats(&self) -> &FitStats {
        &self.stats
    }

    /// The cleaned sample the parameters were fitted to (missing values
    /// removed, and zeros removed for zero-bounded families).
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    /// Returns `true` if parameters are defined.
    pub fn is_defined(&self) -> bool {
        self.params.is_some()
    }

    /// Quantiles of the fitted distribution at `probs`, NaN where undefined.
    pub fn sample_quantiles(&self, probs: &[f64]) -> Vec<f64> {
        probs
            .iter()
            .map(|&p| {
                self.params
                    .and_then(|params| params.quantile(p))
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }
}

/// Fits `config.family()` to `sample`.
///
/// Missing entries are NaN. Insufficient data, negative values for a
/// zero-bounded family, failed estimation and failed goodness-of-fit tests
/// are recorded in `diag` and leave the corresponding fields undefined.
///
/// # Errors
///
/// Returns [`FitError`] only for an invalid configuration.
#[tracing::instrument(level = "debug", skip_all, fields(family = %config.family(), method = %config.method()))]
pub fn fit(
    sample: &[f64],
    config: &FitConfig,
    diag: &mut Diagnostics,
) -> Result<FittedDistribution, FitError> {
    config.validate()?;
    let family = config.family();

    // 1. Missing values
    let values: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
    let n_obs = sample.len();
    let n_na = n_obs - values.len();
    let n_zero = values.iter().filter(|&&v| v == 0.0).count();
    let prob_zero = if values.is_empty() {
        0.0
    } else {
        n_zero as f64 / values.len() as f64
    };
    let stats = FitStats::new(n_obs, n_na, prob_zero);

    let mut fitted = FittedDistribution {
        family,
        method: config.method(),
        na_thres: config.na_thres(),
        params: None,
        stats,
        sample: values,
    };

    // 2. Sufficiency
    if stats.pct_na() >= config.na_thres() || fitted.sample.is_empty() {
        diag.push(DiagnosticKind::FitInsufficientData {
            n_obs,
            n_na,
            pct_na: stats.pct_na(),
            threshold: config.na_thres(),
        });
        return Ok(fitted);
    }

    // 3. Zero-bounded families
    if family.is_zero_bounded() {
        let n_negative = fitted.sample.iter().filter(|&&v| v < 0.0).count();
        if n_negative > 0 {
            diag.push(DiagnosticKind::NegativeValues {
                family: family.name(),
                n_negative,
            });
            return Ok(fitted);
        }
        fitted.sample.retain(|&v| v != 0.0);
    }

    // 4. Estimate
    fitted.params = match config.method() {
        Method::Mle => match fit_mle(family, &fitted.sample) {
            Ok(params) => Some(params),
            Err(reason) => {
                diag.push(DiagnosticKind::MleNotConverged {
                    family: family.name(),
                    reason,
                });
                None
            }
        },
        Method::Lmoments => {
            let estimated = Lmoments::from_sample(&fitted.sample)
                .ok_or_else(|| {
                    format!(
                        "sample L-moments undefined for {} values",
                        fitted.sample.len()
                    )
                })
                .and_then(|lm| estimate(family, &lm));
            match estimated {
                Ok(params) => Some(params),
                Err(reason) => {
                    diag.push(DiagnosticKind::InvalidLmoments { reason });
                    None
                }
            }
        }
    };

    // 5. Goodness of fit
    if let Some(params) = fitted.params {
        let ks = run_test(GofTest::KolmogorovSmirnov, &fitted.sample, &params, diag);
        let ad = run_test(GofTest::AndersonDarling, &fitted.sample, &params, diag);
        fitted.stats = stats.with_pvalues(ks, ad);
    }

    debug!(
        n_obs,
        n_na,
        n_fit = fitted.sample.len(),
        prob_zero,
        defined = fitted.is_defined(),
        "sample fitted"
    );
    Ok(fitted)
}

fn run_test(
    test: GofTest,
    sample: &[f64],
    params: &Params,
    diag: &mut Diagnostics,
) -> Option<f64> {
    let outcome = match test {
        GofTest::KolmogorovSmirnov => ks_test(sample, params),
        GofTest::AndersonDarling => ad_test(sample, params),
    };
    match outcome {
        Ok(result) => Some(result.p_value()),
        Err(reason) => {
            diag.push(DiagnosticKind::GofFailed { test, reason });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Gamma as GammaDist};

    fn gamma_sample_with(shape: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let dist = GammaDist::new(shape, 20.0).unwrap();
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    fn gamma_sample(n: usize, seed: u64) -> Vec<f64> {
        gamma_sample_with(3.0, n, seed)
    }

    #[test]
    fn insufficient_data_keeps_accounting() {
        let mut sample = gamma_sample(10, 1);
        sample[0] = f64::NAN;
        sample[1] = 0.0;
        let mut diag = Diagnostics::new();
        let fitted = fit(&sample, &FitConfig::new(), &mut diag).unwrap();
        assert!(!fitted.is_defined());
        assert_eq!(fitted.stats().n_obs(), 10);
        assert_eq!(fitted.stats().n_na(), 1);
        assert_relative_eq!(fitted.stats().pct_na(), 10.0);
        assert_relative_eq!(fitted.stats().prob_zero(), 1.0 / 9.0);
        assert_eq!(fitted.stats().ks_pval(), None);
        assert!(diag.any(|k| matches!(k, DiagnosticKind::FitInsufficientData { .. })));
    }

    #[test]
    fn all_missing_is_insufficient() {
        let mut diag = Diagnostics::new();
        let fitted = fit(&[f64::NAN; 5], &FitConfig::new().with_na_thres(100.0), &mut diag)
            .unwrap();
        assert!(!fitted.is_defined());
        assert_eq!(fitted.stats().prob_zero(), 0.0);
    }

    #[test]
    fn negative_values_leave_params_undefined() {
        let mut sample = gamma_sample(30, 2);
        sample[5] = -0.5;
        for family in [Family::Gamma, Family::Weibull] {
            for method in [Method::Mle, Method::Lmoments] {
                let mut diag = Diagnostics::new();
                let config = FitConfig::new().with_family(family).with_method(method);
                let fitted = fit(&sample, &config, &mut diag).unwrap();
                assert!(!fitted.is_defined());
                assert!(diag.any(|k| matches!(
                    k,
                    DiagnosticKind::NegativeValues { n_negative: 1, .. }
                )));
            }
        }
    }

    #[test]
    fn zeros_removed_for_zero_bounded() {
        let mut sample = gamma_sample(40, 3);
        sample[0] = 0.0;
        sample[1] = 0.0;
        let mut diag = Diagnostics::new();
        let fitted = fit(&sample, &FitConfig::new(), &mut diag).unwrap();
        assert!(fitted.is_defined());
        assert_eq!(fitted.sample().len(), 38);
        assert_relative_eq!(fitted.stats().prob_zero(), 0.05);
        assert!(fitted.stats().ks_pval().is_some());
        assert!(fitted.stats().ad_pval().is_some());
    }

    #[test]
    fn every_supported_combination_fits() {
        // Moderate skew keeps every family's shape finite.
        let sample = gamma_sample_with(6.0, 300, 4);
        for family in Family::ALL {
            for method in [Method::Mle, Method::Lmoments] {
                if !family.supports(method) {
                    continue;
                }
                let mut diag = Diagnostics::new();
                let config = FitConfig::new().with_family(family).with_method(method);
                let fitted = fit(&sample, &config, &mut diag).unwrap();
                assert!(fitted.is_defined(), "{family}/{method}: {:?}", diag.entries());
                assert_eq!(fitted.params().unwrap().values().len(), family.n_params());
            }
        }
    }

    #[test]
    fn unsupported_method_is_error() {
        let mut diag = Diagnostics::new();
        let config = FitConfig::new().with_family(Family::Gamma3);
        assert!(fit(&gamma_sample(30, 5), &config, &mut diag).is_err());
    }

    #[test]
    fn sample_quantiles_follow_params() {
        let mut diag = Diagnostics::new();
        let fitted = fit(&gamma_sample(200, 6), &FitConfig::new(), &mut diag).unwrap();
        let q = fitted.sample_quantiles(&[0.1, 0.5, 0.9]);
        assert!(q[0] < q[1] && q[1] < q[2]);

        let empty = fit(&[], &FitConfig::new(), &mut diag).unwrap();
        assert!(empty.sample_quantiles(&[0.5])[0].is_nan());
    }
}
