//! Distribution families and estimation methods.

use std::fmt;
use std::str::FromStr;

use crate::error::FitError;

/// Supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Family {
    /// Two-parameter gamma (shape, rate), zero-bounded.
    #[default]
    Gamma,
    /// Pearson type III (shape, scale, threshold).
    Gamma3,
    /// Two-parameter Weibull (shape, scale), zero-bounded.
    Weibull,
    /// Three-parameter Weibull (shape, scale, threshold).
    Weibull3,
    /// Generalized extreme value (shape, scale, location).
    Gev,
    /// Generalized logistic. Type-I (shape, scale, location) under MLE,
    /// Hosking's (xi, alpha, kappa) under L-moments.
    Glogis,
}

impl Family {
    /// All families, in declaration order.
    pub const ALL: [Family; 6] = [
        Self::Gamma,
        Self::Gamma3,
        Self::Weibull,
        Self::Weibull3,
        Self::Gev,
        Self::Glogis,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Gamma => "gamma",
            Self::Gamma3 => "gamma3",
            Self::Weibull => "weibull",
            Self::Weibull3 => "weibull3",
            Self::Gev => "gev",
            Self::Glogis => "glogis",
        }
    }

    /// Number of parameters in the fitted vector.
    pub fn n_params(self) -> usize {
        match self {
            Self::Gamma | Self::Weibull => 2,
            Self::Gamma3 | Self::Weibull3 | Self::Gev | Self::Glogis => 3,
        }
    }

    /// Parameter names produced by fitting with `method`.
    pub fn param_names(self, method: Method) -> &'static [&'static str] {
        match (self, method) {
            (Self::Gamma, _) => &["shape", "rate"],
            (Self::Weibull, _) => &["shape", "scale"],
            (Self::Gamma3 | Self::Weibull3, _) => &["shape", "scale", "threshold"],
            (Self::Gev, _) | (Self::Glogis, Method::Mle) => &["shape", "scale", "location"],
            (Self::Glogis, Method::Lmoments) => &["xi", "alpha", "kappa"],
        }
    }

    /// Returns `true` if the family can be fitted with `method`.
    ///
    /// The threshold families are only available through L-moments.
    pub fn supports(self, method: Method) -> bool {
        match method {
            Method::Lmoments => true,
            Method::Mle => !matches!(self, Self::Gamma3 | Self::Weibull3),
        }
    }

    /// Returns `true` for families with support on `[0, ∞)` whose CDF is
    /// blended with the probability of exact zeros.
    pub fn is_zero_bounded(self) -> bool {
        matches!(self, Self::Gamma | Self::Weibull)
    }

    /// Fails with [`FitError::UnsupportedMethod`] when
    /// [`supports`](Self::supports) is `false`.
    pub fn check_method(self, method: Method) -> Result<(), FitError> {
        if self.supports(method) {
            Ok(())
        } else {
            Err(FitError::UnsupportedMethod {
                family: self,
                method,
            })
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gamma" => Ok(Self::Gamma),
            "gamma3" | "pearson3" | "pe3" => Ok(Self::Gamma3),
            "weibull" => Ok(Self::Weibull),
            "weibull3" => Ok(Self::Weibull3),
            "gev" => Ok(Self::Gev),
            "glogis" | "glo" => Ok(Self::Glogis),
            _ => Err(FitError::UnknownName {
                what: "family",
                name: s.to_string(),
            }),
        }
    }
}

/// Parameter estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Maximum likelihood (Nelder-Mead).
    #[default]
    Mle,
    /// Method of L-moments.
    Lmoments,
}

impl Method {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mle => "mle",
            Self::Lmoments => "lmoments",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mle" => Ok(Self::Mle),
            "lmoments" | "lmom" | "l-moments" => Ok(Self::Lmoments),
            _ => Err(FitError::UnknownName {
                what: "method",
                name: s.to_string(),
            }),
        }
    }
}
