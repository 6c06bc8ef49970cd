//! Maximum-likelihood fitting via Nelder-Mead.
//!
//! Positive parameters are optimised on the log scale so the simplex never
//! leaves the parameter space; support violations cost `f64::MAX`.

use std::f64::consts::PI;

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use sindex_stats::{count_unique, mean, sd};
use statrs::function::gamma::gamma;

use crate::family::Family;
use crate::lmoments::{Lmoments, estimate};
use crate::params::Params;

/// Iteration cap; reaching it counts as non-convergence.
pub(crate) const MAX_ITERS: u64 = 1000;

/// Fits `family` to `sample` by maximum likelihood.
///
/// Errors carry a human-readable reason for the diagnostic record.
pub(crate) fn fit_mle(family: Family, sample: &[f64]) -> Result<Params, String> {
    // 1. Validate
    if sample.len() < 3 || count_unique(sample) < 2 {
        return Err(format!(
            "need at least 3 values with spread, got {}",
            sample.len()
        ));
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err("sample contains non-finite values".to_string());
    }

    // 2. Starting point and simplex in the unconstrained space
    let (start, steps) = start_values(family, sample)?;
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(start.len() + 1);
    simplex.push(start.clone());
    for (i, step) in steps.iter().enumerate() {
        let mut vertex = start.clone();
        vertex[i] += step;
        simplex.push(vertex);
    }

    // 3. Run Nelder-Mead
    let cost = NegLogLik {
        family,
        data: sample,
    };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(1e-8)
        .map_err(|e| format!("solver setup failed: {e}"))?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|e| format!("optimisation failed: {e}"))?;

    let state = result.state();
    if let TerminationStatus::Terminated(TerminationReason::MaxItersReached) =
        state.get_termination_status()
    {
        return Err(format!("no convergence within {MAX_ITERS} iterations"));
    }
    if !state.best_cost.is_finite() || state.best_cost >= f64::MAX {
        return Err("likelihood is not finite at the optimum".to_string());
    }
    let best = state
        .best_param
        .as_ref()
        .ok_or_else(|| "optimiser returned no parameters".to_string())?;

    // 4. Back to the native parameterisation
    let params = decode(family, best).ok_or_else(|| "unsupported family".to_string())?;
    params.validate().map_err(|e| e.to_string())?;
    Ok(params)
}

/// Starting values and simplex steps, both in the unconstrained space.
fn start_values(family: Family, sample: &[f64]) -> Result<(Vec<f64>, Vec<f64>), String> {
    let m = mean(sample);
    let s = sd(sample);
    let (start, steps) = match family {
        Family::Gamma => {
            let var = s * s;
            let shape = m * m / var;
            let rate = m / var;
            (vec![shape.ln(), rate.ln()], vec![0.1, 0.1])
        }
        Family::Weibull => {
            let shape = (s / m).powf(-1.086);
            let scale = m / gamma(1.0 + 1.0 / shape);
            (vec![shape.ln(), scale.ln()], vec![0.1, 0.1])
        }
        Family::Gev => {
            let from_lmoments = Lmoments::from_sample(sample)
                .and_then(|lm| estimate(Family::Gev, &lm).ok())
                .filter(|p| supports_all(p, sample));
            let (shape, scale, location) = match from_lmoments {
                Some(Params::Gev {
                    shape,
                    scale,
                    location,
                }) => (shape, scale, location),
                _ => {
                    let scale = s * 6.0_f64.sqrt() / PI;
                    (0.0, scale, m - 0.577_215_664_9 * scale)
                }
            };
            (vec![shape, scale.ln(), location], vec![0.05, 0.1, 0.1 * s])
        }
        Family::Glogis => {
            let scale = s * 3.0_f64.sqrt() / PI;
            (vec![0.0, scale.ln(), m], vec![0.1, 0.1, 0.1 * s])
        }
        Family::Gamma3 | Family::Weibull3 => {
            return Err(format!("maximum likelihood is not available for {family}"));
        }
    };
    if start.iter().chain(&steps).all(|v| v.is_finite()) {
        Ok((start, steps))
    } else {
        Err("no finite starting values".to_string())
    }
}

fn supports_all(params: &Params, sample: &[f64]) -> bool {
    sample.iter().all(|&x| params.ln_pdf(x).is_finite())
}

/// Maps an unconstrained vector to native parameters.
fn decode(family: Family, theta: &[f64]) -> Option<Params> {
    match (family, theta) {
        (Family::Gamma, [ln_shape, ln_rate]) => Some(Params::Gamma {
            shape: ln_shape.exp(),
            rate: ln_rate.exp(),
        }),
        (Family::Weibull, [ln_shape, ln_scale]) => Some(Params::Weibull {
            shape: ln_shape.exp(),
            scale: ln_scale.exp(),
        }),
        (Family::Gev, [shape, ln_scale, location]) => Some(Params::Gev {
            shape: *shape,
            scale: ln_scale.exp(),
            location: *location,
        }),
        (Family::Glogis, [ln_shape, ln_scale, location]) => Some(Params::Glogis {
            shape: ln_shape.exp(),
            scale: ln_scale.exp(),
            location: *location,
        }),
        _ => None,
    }
}

/// Cost function for argmin: mean negative log-likelihood per observation.
struct NegLogLik<'a> {
    family: Family,
    data: &'a [f64],
}

impl CostFunction for NegLogLik<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let Some(params) = decode(self.family, theta) else {
            return Ok(f64::MAX);
        };
        let loglik: f64 = self.data.iter().map(|&x| params.ln_pdf(x)).sum();
        if loglik.is_finite() {
            Ok(-loglik / self.data.len() as f64)
        } else {
            Ok(f64::MAX)
        }
    }
}
