//! Index results, metadata and optional details.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sindex_diagnostics::Diagnostics;
use sindex_distr::{Family, Method};
use sindex_reference::ReferenceSample;
use sindex_series::{DailySeries, Series};
use sindex_window::Interpolation;

use crate::config::IndexConfig;
use crate::table::ParamTable;

/// Settings the index was computed with, in reporting form.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMetadata {
    /// Aggregation window length in days.
    pub agg_length: usize,
    /// Name of the window reduction.
    pub agg_fun: String,
    /// Distribution family.
    pub distr: Family,
    /// Estimation method.
    pub method: Method,
    /// Minimum KS p-value.
    pub ks_thres: Option<f64>,
    /// Minimum AD p-value.
    pub ad_thres: Option<f64>,
    /// Reference-year policy.
    pub ref_years: String,
    /// Trailing reference length, if that policy is used.
    pub ref_length: Option<u32>,
    /// Reference-sample missing tolerance (percent).
    pub ref_na_thres: f64,
    /// Window missing tolerance (percent).
    pub agg_na_thres: f64,
    /// Window interpolation policy.
    pub agg_interpolation: Interpolation,
    /// Output precision.
    pub digits: u32,
}

impl From<&IndexConfig> for IndexMetadata {
    fn from(config: &IndexConfig) -> Self {
        Self {
            agg_length: config.agg_length(),
            agg_fun: config.reduction().name().to_string(),
            distr: config.family(),
            method: config.method(),
            ks_thres: config.ks_thres(),
            ad_thres: config.ad_thres(),
            ref_years: config.ref_years().to_string(),
            ref_length: config.ref_years().length(),
            ref_na_thres: config.ref_na_thres(),
            agg_na_thres: config.agg_na_thres(),
            agg_interpolation: config.interpolation(),
            digits: config.digits(),
        }
    }
}

/// Intermediate artifacts, returned when
/// [`IndexConfig::keep_details`] is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexDetails {
    /// Output-date aggregate, NaN when missing.
    pub aggregates: BTreeMap<NaiveDate, f64>,
    /// Reference samples of freshly fitted dates.
    pub reference_samples: BTreeMap<NaiveDate, ReferenceSample>,
    /// Parameters used for every output date.
    pub params: ParamTable,
}

/// Output of [`compute_index`](crate::compute_index).
#[derive(Debug, Clone)]
pub struct IndexResult {
    values: DailySeries,
    metadata: IndexMetadata,
    diagnostics: Diagnostics,
    details: Option<IndexDetails>,
}

impl IndexResult {
    pub(crate) fn new(
        values: DailySeries,
        metadata: IndexMetadata,
        diagnostics: Diagnostics,
        details: Option<IndexDetails>,
    ) -> Self {
        Self {
            values,
            metadata,
            diagnostics,
            details,
        }
    }

    /// Standardized values, missing where no index could be computed. The
    /// input series metadata is carried over.
    pub fn values(&self) -> &DailySeries {
        &self.values
    }

    /// Settings used.
    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    /// Every non-fatal condition, in date order.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Intermediate artifacts, if requested.
    pub fn details(&self) -> Option<&IndexDetails> {
        self.details.as_ref()
    }

    /// Value for `date`, NaN when missing or not requested.
    pub fn value(&self, date: NaiveDate) -> f64 {
        self.values.value_at(date).unwrap_or(f64::NAN)
    }
}
