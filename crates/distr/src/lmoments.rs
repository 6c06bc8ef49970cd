//! Sample L-moments and closed-form L-moment estimators.
//!
//! Estimators follow Hosking's rational approximations for the gamma,
//! Pearson III, GEV and generalized logistic families.

use std::f64::consts::{LN_2, PI};

use sindex_stats::sorted;
use statrs::function::gamma::{gamma, ln_gamma};

use crate::family::Family;
use crate::params::Params;

/// Below this magnitude a shape estimate is treated as zero.
const SMALL: f64 = 1e-5;
const EULER: f64 = 0.577_215_664_901_532_9;

/// First three sample L-moments and the L-skewness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lmoments {
    l1: f64,
    l2: f64,
    l3: f64,
}

impl Lmoments {
    /// Computes L-moments from unbiased probability-weighted moments.
    ///
    /// Returns `None` for fewer than 3 values, non-finite values, or a
    /// sample without spread (`l2 <= 0`).
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 3 || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let x = sorted(values);
        let nf = n as f64;
        let (mut b0, mut b1, mut b2) = (0.0, 0.0, 0.0);
        for (j, &v) in x.iter().enumerate() {
            let j = j as f64;
            b0 += v;
            b1 += v * j / (nf - 1.0);
            b2 += v * j * (j - 1.0) / ((nf - 1.0) * (nf - 2.0));
        }
        b0 /= nf;
        b1 /= nf;
        b2 /= nf;

        let lm = Self {
            l1: b0,
            l2: 2.0 * b1 - b0,
            l3: 6.0 * b2 - 6.0 * b1 + b0,
        };
        let valid = lm.l1.is_finite() && lm.l2.is_finite() && lm.l2 > 0.0 && lm.t3().abs() < 1.0;
        valid.then_some(lm)
    }

    /// L-location (the mean).
    pub fn l1(&self) -> f64 {
        self.l1
    }

    /// L-scale.
    pub fn l2(&self) -> f64 {
        self.l2
    }

    /// Third L-moment.
    pub fn l3(&self) -> f64 {
        self.l3
    }

    /// L-skewness `l3 / l2`.
    pub fn t3(&self) -> f64 {
        self.l3 / self.l2
    }

    fn negated(&self) -> Self {
        Self {
            l1: -self.l1,
            l2: self.l2,
            l3: -self.l3,
        }
    }
}

/// Maps sample L-moments to the parameters of `family`.
///
/// The generalized logistic is returned in Hosking's `xi/alpha/kappa`
/// convention. Errors carry a human-readable reason.
pub(crate) fn estimate(family: Family, lm: &Lmoments) -> Result<Params, String> {
    let params = match family {
        Family::Gamma => {
            let (shape, scale) = pelgam(lm)?;
            Params::Gamma {
                shape,
                rate: 1.0 / scale,
            }
        }
        Family::Gamma3 => pelpe3(lm)?,
        Family::Weibull => weibull2(lm)?,
        Family::Weibull3 => {
            let (xi, alpha, kappa) = pelgev(&lm.negated())?;
            if kappa <= 0.0 {
                return Err(format!(
                    "L-skewness {:.4} implies a Weibull without lower bound",
                    lm.t3()
                ));
            }
            Params::Weibull3 {
                shape: 1.0 / kappa,
                scale: alpha / kappa,
                threshold: -(xi + alpha / kappa),
            }
        }
        Family::Gev => {
            let (xi, alpha, kappa) = pelgev(lm)?;
            Params::Gev {
                shape: -kappa,
                scale: alpha,
                location: xi,
            }
        }
        Family::Glogis => pelglo(lm),
    };
    params.validate().map_err(|e| e.to_string())?;
    Ok(params)
}

/// Gamma shape and scale.
fn pelgam(lm: &Lmoments) -> Result<(f64, f64), String> {
    const A1: f64 = -0.3080;
    const A2: f64 = -0.05812;
    const A3: f64 = 0.01765;
    const B1: f64 = 0.7213;
    const B2: f64 = -0.5947;
    const B3: f64 = -2.1817;
    const B4: f64 = 1.2113;

    if lm.l1 <= lm.l2 || lm.l2 <= 0.0 {
        return Err(format!(
            "gamma requires l1 > l2 > 0 (l1 = {:.4}, l2 = {:.4})",
            lm.l1, lm.l2
        ));
    }
    let cv = lm.l2 / lm.l1;
    let alpha = if cv < 0.5 {
        let t = PI * cv * cv;
        (1.0 + A1 * t) / (t * (1.0 + t * (A2 + t * A3)))
    } else {
        let t = 1.0 - cv;
        t * (B1 + t * B2) / (1.0 + t * (B3 + t * B4))
    };
    Ok((alpha, lm.l1 / alpha))
}

/// Pearson III with shape, scale and threshold; positive skew only.
fn pelpe3(lm: &Lmoments) -> Result<Params, String> {
    const C1: f64 = 0.2906;
    const C2: f64 = 0.1882;
    const C3: f64 = 0.0442;
    const D1: f64 = 0.36067;
    const D2: f64 = -0.59567;
    const D3: f64 = 0.25361;
    const D4: f64 = -2.78861;
    const D5: f64 = 2.56096;
    const D6: f64 = -0.77045;

    let t3 = lm.t3();
    if t3 <= 1e-6 {
        return Err(format!(
            "gamma3 requires positive L-skewness (t3 = {t3:.4})"
        ));
    }
    let alpha = if t3 >= 1.0 / 3.0 {
        let t = 1.0 - t3;
        t * (D1 + t * (D2 + t * D3)) / (1.0 + t * (D4 + t * (D5 + t * D6)))
    } else {
        let t = 3.0 * PI * t3 * t3;
        (1.0 + C1 * t) / (t * (1.0 + t * (C2 + t * C3)))
    };
    let beta = PI.sqrt() * lm.l2 * (ln_gamma(alpha) - ln_gamma(alpha + 0.5)).exp();
    Ok(Params::Gamma3 {
        shape: alpha,
        scale: beta,
        threshold: lm.l1 - alpha * beta,
    })
}

/// Two-parameter Weibull from the L-CV.
fn weibull2(lm: &Lmoments) -> Result<Params, String> {
    let tau = lm.l2 / lm.l1;
    if !(lm.l1 > 0.0 && tau > 0.0 && tau < 1.0) {
        return Err(format!(
            "weibull requires 0 < l2/l1 < 1 (l1 = {:.4}, l2 = {:.4})",
            lm.l1, lm.l2
        ));
    }
    let shape = -LN_2 / (1.0 - tau).ln();
    let scale = lm.l1 / gamma(1.0 + 1.0 / shape);
    Ok(Params::Weibull { shape, scale })
}

/// Hosking's GEV `(xi, alpha, kappa)`.
fn pelgev(lm: &Lmoments) -> Result<(f64, f64, f64), String> {
    const A0: f64 = 0.283_775_30;
    const A1: f64 = -1.210_963_99;
    const A2: f64 = -2.507_282_14;
    const A3: f64 = -1.134_555_66;
    const A4: f64 = -0.071_380_22;
    const B1: f64 = 2.061_896_96;
    const B2: f64 = 1.319_122_39;
    const B3: f64 = 0.250_771_04;
    const C1: f64 = 1.599_214_91;
    const C2: f64 = -0.488_322_13;
    const C3: f64 = 0.015_731_52;
    const D1: f64 = -0.643_639_29;
    const D2: f64 = 0.089_852_47;
    const EPS: f64 = 1e-6;
    const MAXIT: usize = 20;

    let t3 = lm.t3();
    if t3.abs() >= 1.0 {
        return Err(format!("L-skewness out of range (t3 = {t3:.4})"));
    }

    let g = if t3 > 0.0 {
        let z = 1.0 - t3;
        (-1.0 + z * (C1 + z * (C2 + z * C3))) / (1.0 + z * (D1 + z * D2))
    } else {
        let mut g = (A0 + t3 * (A1 + t3 * (A2 + t3 * (A3 + t3 * A4))))
            / (1.0 + t3 * (B1 + t3 * (B2 + t3 * B3)));
        if t3 < -0.8 {
            // Newton-Raphson on the exact relation for strongly negative skew.
            if t3 <= -0.97 {
                g = 1.0 - (1.0 + t3).ln() / LN_2;
            }
            let target = (t3 + 3.0) / 2.0;
            let ln3 = 3.0_f64.ln();
            for _ in 0..MAXIT {
                let x2 = 2.0_f64.powf(-g);
                let x3 = 3.0_f64.powf(-g);
                let xx2 = 1.0 - x2;
                let xx3 = 1.0 - x3;
                let t = xx3 / xx2;
                let deriv = (xx2 * x3 * ln3 - xx3 * x2 * LN_2) / (xx2 * xx2);
                let previous = g;
                g -= (t - target) / deriv;
                if (g - previous).abs() <= EPS * g {
                    break;
                }
            }
        }
        g
    };

    if !g.is_finite() {
        return Err(format!("no GEV shape for t3 = {t3:.4}"));
    }
    if g.abs() < SMALL {
        let alpha = lm.l2 / LN_2;
        return Ok((lm.l1 - EULER * alpha, alpha, 0.0));
    }
    let gam = ln_gamma(1.0 + g).exp();
    let alpha = lm.l2 * g / (gam * (1.0 - 2.0_f64.powf(-g)));
    let xi = lm.l1 - alpha * (1.0 - gam) / g;
    Ok((xi, alpha, g))
}

/// Hosking's generalized logistic.
fn pelglo(lm: &Lmoments) -> Params {
    let g = -lm.t3();
    if g.abs() <= SMALL {
        return Params::Glo {
            xi: lm.l1,
            alpha: lm.l2,
            kappa: 0.0,
        };
    }
    let gg = g * PI / (g * PI).sin();
    let alpha = lm.l2 / gg;
    Params::Glo {
        xi: lm.l1 - alpha * (1.0 - gg) / g,
        alpha,
        kappa: g,
    }
}
