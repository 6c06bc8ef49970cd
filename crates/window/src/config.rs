//! Configuration for window aggregation.

use std::str::FromStr;

use crate::error::WindowError;
use crate::interpolate::Interpolation;

/// What to do when a window extends beyond the covered range of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Report the window as out of range without aggregating.
    #[default]
    Skip,
    /// Record a diagnostic and aggregate, treating outside dates as missing.
    Proceed,
}

impl FromStr for OutOfRange {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "proceed" => Ok(Self::Proceed),
            other => Err(WindowError::UnknownName {
                what: "out-of-range policy",
                name: other.to_string(),
            }),
        }
    }
}

/// Missing-value and range policy for [`aggregate_window`](crate::aggregate_window).
///
/// # Example
///
/// ```
/// use sindex_window::{Interpolation, OutOfRange, WindowConfig};
///
/// let config = WindowConfig::new()
///     .with_na_thres(20.0)
///     .with_interpolation(Interpolation::Linear)
///     .with_out_of_range(OutOfRange::Proceed);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    na_thres: f64,
    interpolation: Interpolation,
    out_of_range: OutOfRange,
}

impl WindowConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `na_thres = 10.0`, `interpolation = None`,
    /// `out_of_range = Skip`.
    pub fn new() -> Self {
        Self {
            na_thres: 10.0,
            interpolation: Interpolation::None,
            out_of_range: OutOfRange::Skip,
        }
    }

    /// Sets the missing-value tolerance in percent of the window length.
    pub fn with_na_thres(mut self, pct: f64) -> Self {
        self.na_thres = pct;
        self
    }

    /// Sets the interpolation policy.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the out-of-range policy.
    pub fn with_out_of_range(mut self, policy: OutOfRange) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Returns the missing-value tolerance in percent.
    pub fn na_thres(&self) -> f64 {
        self.na_thres
    }

    /// Returns the interpolation policy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the out-of-range policy.
    pub fn out_of_range(&self) -> OutOfRange {
        self.out_of_range
    }

    /// Validates this configuration.
    ///
    /// `na_thres` must be finite and within `[0, 100]`.
    pub fn validate(&self) -> Result<(), WindowError> {
        if !self.na_thres.is_finite() || !(0.0..=100.0).contains(&self.na_thres) {
            return Err(WindowError::InvalidConfig {
                reason: format!("na_thres must be in [0, 100], got {}", self.na_thres),
            });
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = WindowConfig::new();
        assert!((cfg.na_thres() - 10.0).abs() < f64::EPSILON);
        assert_eq!(cfg.interpolation(), Interpolation::None);
        assert_eq!(cfg.out_of_range(), OutOfRange::Skip);
    }

    #[test]
    fn builder_chaining() {
        let cfg = WindowConfig::new()
            .with_na_thres(25.0)
            .with_interpolation(Interpolation::Mean)
            .with_out_of_range(OutOfRange::Proceed);
        assert!((cfg.na_thres() - 25.0).abs() < f64::EPSILON);
        assert_eq!(cfg.interpolation(), Interpolation::Mean);
        assert_eq!(cfg.out_of_range(), OutOfRange::Proceed);
    }

    #[test]
    fn out_of_range_from_str() {
        assert_eq!("Proceed".parse::<OutOfRange>().unwrap(), OutOfRange::Proceed);
        assert_eq!("skip".parse::<OutOfRange>().unwrap(), OutOfRange::Skip);
        assert!("ignore".parse::<OutOfRange>().is_err());
    }

    #[test]
    fn validate_bounds() {
        assert!(WindowConfig::new().with_na_thres(0.0).validate().is_ok());
        assert!(WindowConfig::new().with_na_thres(100.0).validate().is_ok());
        assert!(WindowConfig::new().with_na_thres(-1.0).validate().is_err());
        assert!(WindowConfig::new().with_na_thres(100.5).validate().is_err());
        assert!(WindowConfig::new().with_na_thres(f64::NAN).validate().is_err());
    }
}
