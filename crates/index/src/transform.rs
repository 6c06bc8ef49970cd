//! Probability blending and the inverse-normal transform.

use sindex_diagnostics::{DiagnosticKind, Diagnostics, GofTest};
use sindex_stats::round_digits;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::IndexConfig;
use crate::table::ParamRow;

/// Blends the point mass at zero into a continuous CDF value:
/// `prob_zero + (1 - prob_zero) * p`.
pub fn blend_zero(prob_zero: f64, p: f64) -> f64 {
    prob_zero + (1.0 - prob_zero) * p
}

/// Inverse standard-normal CDF; `±inf` at 0 and 1, NaN outside `[0, 1]`.
pub fn inverse_normal(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    Normal::new(0.0, 1.0)
        .map(|n| n.inverse_cdf(p))
        .unwrap_or(f64::NAN)
}

/// Standardizes one aggregate with its parameter row.
///
/// Returns NaN when the aggregate is missing, the parameters are undefined,
/// a configured goodness-of-fit threshold is not met, the CDF is undefined
/// or the transform is not finite.
pub(crate) fn standardize(
    aggregate: f64,
    row: &ParamRow,
    config: &IndexConfig,
    diag: &mut Diagnostics,
) -> f64 {
    if aggregate.is_nan() {
        return f64::NAN;
    }
    let Some(params) = row.params() else {
        return f64::NAN;
    };

    for (test, threshold) in [
        (GofTest::KolmogorovSmirnov, config.ks_thres()),
        (GofTest::AndersonDarling, config.ad_thres()),
    ] {
        let Some(threshold) = threshold else {
            continue;
        };
        let p_value = row.stats().pval(test);
        if !p_value.is_some_and(|p| p >= threshold) {
            diag.push(DiagnosticKind::GofRejected {
                test,
                p_value,
                threshold,
            });
            return f64::NAN;
        }
    }

    let Some(p_raw) = params.cdf(aggregate) else {
        diag.push(DiagnosticKind::CdfUndefined { value: aggregate });
        return f64::NAN;
    };
    let p = if row.family().is_zero_bounded() {
        blend_zero(row.stats().prob_zero(), p_raw)
    } else {
        p_raw
    };

    let z = inverse_normal(p);
    if !z.is_finite() {
        diag.push(DiagnosticKind::NonFiniteIndex { probability: p });
        return f64::NAN;
    }
    round_digits(z, config.digits())
}
