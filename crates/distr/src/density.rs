//! CDF, quantile and log-density evaluation for every parameterisation.
//!
//! Gamma and Weibull CDFs go through `statrs`; the extreme-value and
//! logistic families use their closed forms.

use statrs::distribution::{ContinuousCDF, Gamma, Weibull};
use statrs::function::gamma::ln_gamma;

use crate::params::Params;

/// Shape magnitude below which GEV and GLO collapse to their limiting
/// (Gumbel / logistic) forms.
pub(crate) const SHAPE_EPS: f64 = 1e-8;

impl Params {
    /// Cumulative probability at `x`.
    ///
    /// Returns `None` when `x` is NaN, the parameters cannot build a
    /// distribution, or the result is not finite.
    pub fn cdf(&self, x: f64) -> Option<f64> {
        if x.is_nan() {
            return None;
        }
        let p = match *self {
            Self::Gamma { shape, rate } => Gamma::new(shape, rate).ok()?.cdf(x),
            Self::Gamma3 {
                shape,
                scale,
                threshold,
            } => Gamma::new(shape, 1.0 / scale).ok()?.cdf(x - threshold),
            Self::Weibull { shape, scale } => Weibull::new(shape, scale).ok()?.cdf(x),
            Self::Weibull3 {
                shape,
                scale,
                threshold,
            } => Weibull::new(shape, scale).ok()?.cdf(x - threshold),
            Self::Gev {
                shape,
                scale,
                location,
            } => gev_cdf((x - location) / scale, shape),
            Self::Glogis {
                shape,
                scale,
                location,
            } => (-shape * softplus(-(x - location) / scale)).exp(),
            Self::Glo { xi, alpha, kappa } => match glo_reduced(x, xi, alpha, kappa) {
                Some(y) => 1.0 / (1.0 + (-y).exp()),
                None if kappa > 0.0 => 1.0,
                None => 0.0,
            },
        };
        p.is_finite().then(|| p.clamp(0.0, 1.0))
    }

    /// Quantile (inverse CDF) at probability `p`.
    ///
    /// Returns `None` for `p` outside `[0, 1]` or invalid parameters. The
    /// endpoints map to the support bounds, which may be infinite.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&p) {
            return None;
        }
        let x = match *self {
            Self::Gamma { shape, rate } => gamma_quantile(shape, rate, p)?,
            Self::Gamma3 {
                shape,
                scale,
                threshold,
            } => threshold + gamma_quantile(shape, 1.0 / scale, p)?,
            Self::Weibull { shape, scale } => weibull_quantile(shape, scale, p),
            Self::Weibull3 {
                shape,
                scale,
                threshold,
            } => threshold + weibull_quantile(shape, scale, p),
            Self::Gev {
                shape,
                scale,
                location,
            } => {
                let y = -p.ln();
                if shape.abs() < SHAPE_EPS {
                    location - scale * y.ln()
                } else {
                    location + scale * (y.powf(-shape) - 1.0) / shape
                }
            }
            Self::Glogis {
                shape,
                scale,
                location,
            } => location - scale * (p.powf(-1.0 / shape) - 1.0).ln(),
            Self::Glo { xi, alpha, kappa } => {
                let y = (p / (1.0 - p)).ln();
                if kappa.abs() < SHAPE_EPS {
                    xi + alpha * y
                } else {
                    xi + alpha * (1.0 - (-kappa * y).exp()) / kappa
                }
            }
        };
        (!x.is_nan()).then_some(x)
    }

    /// Log-density at `x`, `-inf` outside the support.
    pub(crate) fn ln_pdf(&self, x: f64) -> f64 {
        match *self {
            Self::Gamma { shape, rate } => gamma_ln_pdf(x, shape, rate),
            Self::Gamma3 {
                shape,
                scale,
                threshold,
            } => gamma_ln_pdf(x - threshold, shape, 1.0 / scale),
            Self::Weibull { shape, scale } => weibull_ln_pdf(x, shape, scale),
            Self::Weibull3 {
                shape,
                scale,
                threshold,
            } => weibull_ln_pdf(x - threshold, shape, scale),
            Self::Gev {
                shape,
                scale,
                location,
            } => {
                let z = (x - location) / scale;
                if shape.abs() < SHAPE_EPS {
                    return -scale.ln() - z - (-z).exp();
                }
                let t = 1.0 + shape * z;
                if t <= 0.0 {
                    return f64::NEG_INFINITY;
                }
                -scale.ln() - (1.0 + 1.0 / shape) * t.ln() - t.powf(-1.0 / shape)
            }
            Self::Glogis {
                shape,
                scale,
                location,
            } => {
                let z = (x - location) / scale;
                shape.ln() - scale.ln() - z - (shape + 1.0) * softplus(-z)
            }
            Self::Glo { xi, alpha, kappa } => match glo_reduced(x, xi, alpha, kappa) {
                Some(y) => -alpha.ln() - (1.0 - kappa) * y - 2.0 * softplus(-y),
                None => f64::NEG_INFINITY,
            },
        }
    }
}

/// ln(1 + e^u) without overflow.
pub(crate) fn softplus(u: f64) -> f64 {
    if u > 0.0 {
        u + (-u).exp().ln_1p()
    } else {
        u.exp().ln_1p()
    }
}

fn gev_cdf(z: f64, shape: f64) -> f64 {
    if shape.abs() < SHAPE_EPS {
        return (-(-z).exp()).exp();
    }
    let t = 1.0 + shape * z;
    if t <= 0.0 {
        // Below the lower bound (shape > 0) or above the upper bound.
        return if shape > 0.0 { 0.0 } else { 1.0 };
    }
    (-t.powf(-1.0 / shape)).exp()
}

/// Reduced variate of Hosking's GLO, `None` outside the support.
fn glo_reduced(x: f64, xi: f64, alpha: f64, kappa: f64) -> Option<f64> {
    if kappa.abs() < SHAPE_EPS {
        return Some((x - xi) / alpha);
    }
    let arg = 1.0 - kappa * (x - xi) / alpha;
    (arg > 0.0).then(|| -arg.ln() / kappa)
}

fn gamma_quantile(shape: f64, rate: f64, p: f64) -> Option<f64> {
    let dist = Gamma::new(shape, rate).ok()?;
    Some(if p <= 0.0 {
        0.0
    } else if p >= 1.0 {
        f64::INFINITY
    } else {
        dist.inverse_cdf(p)
    })
}

fn weibull_quantile(shape: f64, scale: f64, p: f64) -> f64 {
    scale * (-(-p).ln_1p()).powf(1.0 / shape)
}

fn gamma_ln_pdf(x: f64, shape: f64, rate: f64) -> f64 {
    if x <= 0.0 {
        return f64::NEG_INFINITY;
    }
    shape * rate.ln() + (shape - 1.0) * x.ln() - rate * x - ln_gamma(shape)
}

fn weibull_ln_pdf(x: f64, shape: f64, scale: f64) -> f64 {
    if x <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let ln_ratio = x.ln() - scale.ln();
    shape.ln() - scale.ln() + (shape - 1.0) * ln_ratio - (shape * ln_ratio).exp()
}
