//! Validated parameter vectors, one variant per family parameterisation.

use crate::error::FitError;
use crate::family::{Family, Method};

/// Fitted distribution parameters.
///
/// Each variant uses the native parameter names of its family. Generalized
/// logistic parameters come in two conventions depending on the estimation
/// method: [`Params::Glogis`] from MLE and [`Params::Glo`] from L-moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Params {
    /// Gamma with `shape` (k) and `rate` (1 / scale).
    Gamma {
        /// Shape k.
        shape: f64,
        /// Rate 1/θ.
        rate: f64,
    },
    /// Pearson type III: gamma shifted by `threshold`.
    Gamma3 {
        /// Shape α.
        shape: f64,
        /// Scale β.
        scale: f64,
        /// Lower bound of the support.
        threshold: f64,
    },
    /// Weibull with `shape` (k) and `scale` (λ).
    Weibull {
        /// Shape k.
        shape: f64,
        /// Scale λ.
        scale: f64,
    },
    /// Weibull shifted by `threshold`.
    Weibull3 {
        /// Shape k.
        shape: f64,
        /// Scale λ.
        scale: f64,
        /// Lower bound of the support.
        threshold: f64,
    },
    /// Generalized extreme value, F(x) = exp(-(1 + shape·z)^(-1/shape)).
    Gev {
        /// Shape ξ (positive means heavy upper tail).
        shape: f64,
        /// Scale σ.
        scale: f64,
        /// Location μ.
        location: f64,
    },
    /// Type-I generalized logistic, F(x) = (1 + e^(-z))^(-shape).
    Glogis {
        /// Shape a.
        shape: f64,
        /// Scale σ.
        scale: f64,
        /// Location μ.
        location: f64,
    },
    /// Hosking's generalized logistic.
    Glo {
        /// Location ξ.
        xi: f64,
        /// Scale α.
        alpha: f64,
        /// Shape κ.
        kappa: f64,
    },
}

impl Params {
    /// Builds parameters for `family` from a value vector in
    /// [`names`](Self::names) order.
    ///
    /// `method` selects the generalized logistic convention.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidParams`] if the vector has the wrong length
    /// or the values are outside the parameter space.
    pub fn from_values(family: Family, method: Method, values: &[f64]) -> Result<Self, FitError> {
        let expected = family.n_params();
        if values.len() != expected {
            return Err(FitError::InvalidParams {
                family: family.name().to_string(),
                reason: format!("expected {expected} values, got {}", values.len()),
            });
        }
        let v = values;
        let params = match (family, method) {
            (Family::Gamma, _) => Self::Gamma {
                shape: v[0],
                rate: v[1],
            },
            (Family::Gamma3, _) => Self::Gamma3 {
                shape: v[0],
                scale: v[1],
                threshold: v[2],
            },
            (Family::Weibull, _) => Self::Weibull {
                shape: v[0],
                scale: v[1],
            },
            (Family::Weibull3, _) => Self::Weibull3 {
                shape: v[0],
                scale: v[1],
                threshold: v[2],
            },
            (Family::Gev, _) => Self::Gev {
                shape: v[0],
                scale: v[1],
                location: v[2],
            },
            (Family::Glogis, Method::Mle) => Self::Glogis {
                shape: v[0],
                scale: v[1],
                location: v[2],
            },
            (Family::Glogis, Method::Lmoments) => Self::Glo {
                xi: v[0],
                alpha: v[1],
                kappa: v[2],
            },
        };
        params.validate()?;
        Ok(params)
    }

    /// Family the parameters belong to.
    pub fn family(&self) -> Family {
        match self {
            Self::Gamma { .. } => Family::Gamma,
            Self::Gamma3 { .. } => Family::Gamma3,
            Self::Weibull { .. } => Family::Weibull,
            Self::Weibull3 { .. } => Family::Weibull3,
            Self::Gev { .. } => Family::Gev,
            Self::Glogis { .. } | Self::Glo { .. } => Family::Glogis,
        }
    }

    /// Parameter names, in [`values`](Self::values) order.
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            Self::Gamma { .. } => &["shape", "rate"],
            Self::Weibull { .. } => &["shape", "scale"],
            Self::Gamma3 { .. } | Self::Weibull3 { .. } => &["shape", "scale", "threshold"],
            Self::Gev { .. } | Self::Glogis { .. } => &["shape", "scale", "location"],
            Self::Glo { .. } => &["xi", "alpha", "kappa"],
        }
    }

    /// Parameter values, in [`names`](Self::names) order.
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Self::Gamma { shape, rate } => vec![shape, rate],
            Self::Weibull { shape, scale } => vec![shape, scale],
            Self::Gamma3 {
                shape,
                scale,
                threshold,
            }
            | Self::Weibull3 {
                shape,
                scale,
                threshold,
            } => vec![shape, scale, threshold],
            Self::Gev {
                shape,
                scale,
                location,
            }
            | Self::Glogis {
                shape,
                scale,
                location,
            } => vec![shape, scale, location],
            Self::Glo { xi, alpha, kappa } => vec![xi, alpha, kappa],
        }
    }

    /// Checks that every value is finite and scale-like values are positive.
    pub fn validate(&self) -> Result<(), FitError> {
        let invalid = |reason: &str| FitError::InvalidParams {
            family: self.family().name().to_string(),
            reason: reason.to_string(),
        };
        if self.values().iter().any(|v| !v.is_finite()) {
            return Err(invalid("parameters must be finite"));
        }
        let positive = match *self {
            Self::Gamma { shape, rate } => vec![shape, rate],
            Self::Weibull { shape, scale }
            | Self::Gamma3 { shape, scale, .. }
            | Self::Weibull3 { shape, scale, .. }
            | Self::Glogis { shape, scale, .. } => vec![shape, scale],
            Self::Gev { scale, .. } => vec![scale],
            Self::Glo { alpha, .. } => vec![alpha],
        };
        if positive.iter().any(|&v| v <= 0.0) {
            return Err(invalid("shape and scale must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_names_align() {
        for family in Family::ALL {
            for method in [Method::Mle, Method::Lmoments] {
                let values = vec![1.5; family.n_params()];
                let p = Params::from_values(family, method, &values).unwrap();
                assert_eq!(p.names(), family.param_names(method));
                assert_eq!(p.values(), values);
                assert_eq!(p.family(), family);
            }
        }
    }

    #[test]
    fn glogis_convention_follows_method() {
        let mle = Params::from_values(Family::Glogis, Method::Mle, &[1.0, 2.0, 3.0]).unwrap();
        let lmom = Params::from_values(Family::Glogis, Method::Lmoments, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mle.names(), &["shape", "scale", "location"]);
        assert_eq!(lmom.names(), &["xi", "alpha", "kappa"]);
    }

    #[test]
    fn wrong_length_rejected() {
        let err = Params::from_values(Family::Gamma, Method::Mle, &[1.0]).unwrap_err();
        assert!(matches!(err, FitError::InvalidParams { .. }));
    }

    #[test]
    fn non_positive_scale_rejected() {
        assert!(Params::from_values(Family::Gamma, Method::Mle, &[1.0, 0.0]).is_err());
        assert!(Params::from_values(Family::Gev, Method::Mle, &[-0.2, -1.0, 0.0]).is_err());
        assert!(Params::from_values(Family::Gev, Method::Mle, &[-0.2, 1.0, -5.0]).is_ok());
        assert!(Params::from_values(Family::Glogis, Method::Lmoments, &[-3.0, 1.0, -0.4]).is_ok());
    }

    #[test]
    fn nan_rejected() {
        assert!(Params::from_values(Family::Weibull, Method::Mle, &[f64::NAN, 1.0]).is_err());
    }
}
