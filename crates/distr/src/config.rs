//! Configuration for distribution fitting.

use crate::error::FitError;
use crate::family::{Family, Method};

/// Configuration for [`fit`](crate::fit).
///
/// # Example
///
/// ```
/// use sindex_distr::{Family, FitConfig, Method};
///
/// let config = FitConfig::new()
///     .with_family(Family::Gev)
///     .with_method(Method::Lmoments)
///     .with_na_thres(20.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FitConfig {
    family: Family,
    method: Method,
    na_thres: f64,
}

impl FitConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `family = Gamma`, `method = Mle`, `na_thres = 10.0`.
    pub fn new() -> Self {
        Self {
            family: Family::Gamma,
            method: Method::Mle,
            na_thres: 10.0,
        }
    }

    /// Sets the distribution family.
    pub fn with_family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    /// Sets the estimation method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the missing-value tolerance in percent.
    pub fn with_na_thres(mut self, pct: f64) -> Self {
        self.na_thres = pct;
        self
    }

    /// Distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Missing-value tolerance in percent.
    pub fn na_thres(&self) -> f64 {
        self.na_thres
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::UnsupportedMethod`] for MLE on a threshold family
    /// and [`FitError::InvalidConfig`] if `na_thres` is outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), FitError> {
        self.family.check_method(self.method)?;
        if !(0.0..=100.0).contains(&self.na_thres) {
            return Err(FitError::InvalidConfig {
                reason: format!("na_thres must be in [0, 100], got {}", self.na_thres),
            });
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}
