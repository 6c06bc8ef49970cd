//! Configuration for index computation.

use sindex_distr::{Family, FitConfig, Method};
use sindex_reference::RefYears;
use sindex_window::{Interpolation, OutOfRange, Reduction, WindowConfig};

use crate::error::IndexError;

/// Configuration for [`compute_index`](crate::compute_index).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use sindex_distr::{Family, Method};
/// use sindex_index::IndexConfig;
/// use sindex_reference::RefYears;
///
/// let config = IndexConfig::new()
///     .with_agg_length(90)
///     .with_family(Family::Glogis)
///     .with_method(Method::Lmoments)
///     .with_ref_years(RefYears::Trailing(30))
///     .with_ks_thres(Some(0.05));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IndexConfig {
    agg_length: usize,
    reduction: Reduction,
    family: Family,
    method: Method,
    ks_thres: Option<f64>,
    ad_thres: Option<f64>,
    ref_years: RefYears,
    ref_out_of_range: OutOfRange,
    ref_na_thres: f64,
    agg_na_thres: f64,
    interpolation: Interpolation,
    digits: u32,
    keep_details: bool,
}

impl IndexConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `agg_length = 30`, `reduction = Sum`, `family = Gamma`,
    /// `method = Mle`, no KS/AD thresholds, `ref_years = All`,
    /// `ref_out_of_range = Skip`, `ref_na_thres = 10`, `agg_na_thres = 10`,
    /// `interpolation = None`, `digits = 3`, `keep_details = false`.
    pub fn new() -> Self {
        Self {
            agg_length: 30,
            reduction: Reduction::Sum,
            family: Family::Gamma,
            method: Method::Mle,
            ks_thres: None,
            ad_thres: None,
            ref_years: RefYears::All,
            ref_out_of_range: OutOfRange::Skip,
            ref_na_thres: 10.0,
            agg_na_thres: 10.0,
            interpolation: Interpolation::None,
            digits: 3,
            keep_details: false,
        }
    }

    // --- Builder methods ---

    /// Sets the aggregation window length in days.
    pub fn with_agg_length(mut self, days: usize) -> Self {
        self.agg_length = days;
        self
    }

    /// Sets the window reduction.
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
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

    /// Sets the minimum Kolmogorov-Smirnov p-value, `None` to disable.
    pub fn with_ks_thres(mut self, thres: Option<f64>) -> Self {
        self.ks_thres = thres;
        self
    }

    /// Sets the minimum Anderson-Darling p-value, `None` to disable.
    pub fn with_ad_thres(mut self, thres: Option<f64>) -> Self {
        self.ad_thres = thres;
        self
    }

    /// Sets the reference-year policy.
    pub fn with_ref_years(mut self, ref_years: RefYears) -> Self {
        self.ref_years = ref_years;
        self
    }

    /// Sets how partly covered windows are treated for an explicit
    /// reference-year list. The other policies always proceed.
    pub fn with_ref_out_of_range(mut self, policy: OutOfRange) -> Self {
        self.ref_out_of_range = policy;
        self
    }

    /// Sets the missing-value tolerance of the reference sample (percent).
    pub fn with_ref_na_thres(mut self, pct: f64) -> Self {
        self.ref_na_thres = pct;
        self
    }

    /// Sets the missing-value tolerance of each window (percent).
    pub fn with_agg_na_thres(mut self, pct: f64) -> Self {
        self.agg_na_thres = pct;
        self
    }

    /// Sets the window interpolation policy.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the number of decimal digits in the output.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Sets whether aggregates, reference samples and the parameter table
    /// are returned.
    pub fn with_keep_details(mut self, keep: bool) -> Self {
        self.keep_details = keep;
        self
    }

    // --- Accessors ---

    /// Aggregation window length in days.
    pub fn agg_length(&self) -> usize {
        self.agg_length
    }

    /// Window reduction.
    pub fn reduction(&self) -> &Reduction {
        &self.reduction
    }

    /// Distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Minimum KS p-value.
    pub fn ks_thres(&self) -> Option<f64> {
        self.ks_thres
    }

    /// Minimum AD p-value.
    pub fn ad_thres(&self) -> Option<f64> {
        self.ad_thres
    }

    /// Reference-year policy.
    pub fn ref_years(&self) -> &RefYears {
        &self.ref_years
    }

    /// Out-of-range policy for explicit reference years.
    pub fn ref_out_of_range(&self) -> OutOfRange {
        self.ref_out_of_range
    }

    /// Reference-sample missing tolerance (percent).
    pub fn ref_na_thres(&self) -> f64 {
        self.ref_na_thres
    }

    /// Window missing tolerance (percent).
    pub fn agg_na_thres(&self) -> f64 {
        self.agg_na_thres
    }

    /// Window interpolation policy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Output precision.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Whether details are returned.
    pub fn keep_details(&self) -> bool {
        self.keep_details
    }

    /// Window settings for the output-date aggregates, which always proceed
    /// across the series edges.
    pub(crate) fn window_config(&self) -> WindowConfig {
        WindowConfig::new()
            .with_na_thres(self.agg_na_thres)
            .with_interpolation(self.interpolation)
            .with_out_of_range(OutOfRange::Proceed)
    }

    /// Window settings for reference aggregates.
    pub(crate) fn reference_window_config(&self) -> WindowConfig {
        WindowConfig::new()
            .with_na_thres(self.agg_na_thres)
            .with_interpolation(self.interpolation)
            .with_out_of_range(self.ref_out_of_range)
    }

    /// Fit settings for reference samples.
    pub(crate) fn fit_config(&self) -> FitConfig {
        FitConfig::new()
            .with_family(self.family)
            .with_method(self.method)
            .with_na_thres(self.ref_na_thres)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Fit`] for MLE on a threshold family,
    /// [`IndexError::Reference`] for an unusable year policy and
    /// [`IndexError::InvalidConfig`] for out-of-range numeric settings.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.agg_length == 0 {
            return Err(IndexError::InvalidConfig {
                reason: "agg_length must be >= 1".to_string(),
            });
        }
        for (name, thres) in [("ks_thres", self.ks_thres), ("ad_thres", self.ad_thres)] {
            match thres {
                Some(t) if !(0.0..=1.0).contains(&t) => {
                    return Err(IndexError::InvalidConfig {
                        reason: format!("{name} must be in [0, 1], got {t}"),
                    });
                }
                _ => {}
            }
        }
        self.window_config().validate()?;
        self.fit_config().validate()?;
        self.ref_years.validate()?;
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}
