//! The per-date fit and transform pipeline.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rayon::prelude::*;
use sindex_diagnostics::{DiagnosticKind, Diagnostics};
use sindex_distr::{FitStats, fit};
use sindex_reference::{ReferenceError, ReferenceSample, reference_sample};
use sindex_series::{DailySeries, Series};
use sindex_window::{WindowError, aggregate_window};
use tracing::info;

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::result::{IndexDetails, IndexMetadata, IndexResult};
use crate::table::{ParamRow, ParamTable};
use crate::transform::standardize;

/// Fit output for one date.
struct DateFit {
    date: NaiveDate,
    row: ParamRow,
    sample: Option<ReferenceSample>,
    diag: Diagnostics,
}

/// Aggregate and standardized value for one date.
struct DateValue {
    date: NaiveDate,
    aggregate: f64,
    value: f64,
    diag: Diagnostics,
}

/// Computes the standardized index for every date in `dates`.
///
/// Distributions are fitted to `reference` (the data series itself when
/// `None`). Dates with a row in `params` reuse that row unchanged; all
/// other dates are fitted in parallel. Duplicate dates are collapsed and
/// the output is in date order.
///
/// # Errors
///
/// Returns [`IndexError`] for an invalid configuration or a window that
/// cannot be represented on the calendar. Per-date problems produce a
/// missing value and a diagnostic instead.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sindex_index::{IndexConfig, compute_index};
/// use sindex_series::DailySeries;
///
/// let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
/// let values: Vec<f64> = (0..20 * 365).map(|i| 1.0 + ((i * 37) % 11) as f64).collect();
/// let series = DailySeries::from_values(start, &values);
///
/// let date = NaiveDate::from_ymd_opt(2009, 6, 30).unwrap();
/// let result = compute_index(&[date], &series, None, None, &IndexConfig::new()).unwrap();
/// assert_eq!(result.values().len(), 1);
/// ```
#[tracing::instrument(level = "info", skip_all, fields(n_dates = dates.len()))]
pub fn compute_index(
    dates: &[NaiveDate],
    series: &dyn Series,
    reference: Option<&dyn Series>,
    params: Option<&ParamTable>,
    config: &IndexConfig,
) -> Result<IndexResult, IndexError> {
    config.validate()?;
    let dates: Vec<NaiveDate> = dates
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let reference = reference.unwrap_or(series);

    // 1. Partition into reused and fresh dates
    let (reused, to_fit): (Vec<NaiveDate>, Vec<NaiveDate>) = dates
        .iter()
        .copied()
        .partition(|&date| params.is_some_and(|table| table.contains(date)));

    // 2. Fit fresh dates in parallel
    let fits = to_fit
        .par_iter()
        .map(|&date| fit_date(date, reference, config))
        .collect::<Result<Vec<_>, _>>()?;

    // 3. Merge into one table restricted to the requested dates
    let mut table = ParamTable::new();
    if let Some(external) = params {
        for &date in &reused {
            if let Some(row) = external.get(date) {
                table.insert(date, row.clone());
            }
        }
    }
    let mut fit_diags = BTreeMap::new();
    let mut samples = BTreeMap::new();
    for f in fits {
        table.insert(f.date, f.row);
        fit_diags.insert(f.date, f.diag);
        if let Some(sample) = f.sample {
            samples.insert(f.date, sample);
        }
    }

    // 4. Aggregate and standardize every date
    let outputs = dates
        .par_iter()
        .map(|&date| value_date(date, series, &table, config))
        .collect::<Result<Vec<_>, _>>()?;

    // 5. Assemble in date order
    let mut values = DailySeries::new().with_meta(series.meta().clone());
    let mut diagnostics = Diagnostics::new();
    let mut aggregates = BTreeMap::new();
    for out in outputs {
        if let Some(diag) = fit_diags.remove(&out.date) {
            diagnostics.append(diag);
        }
        diagnostics.append(out.diag);
        values.set(out.date, Some(out.value));
        aggregates.insert(out.date, out.aggregate);
    }

    info!(
        n_dates = dates.len(),
        n_fitted = to_fit.len(),
        n_reused = reused.len(),
        n_missing = values.n_missing(),
        n_diagnostics = diagnostics.len(),
        "index computed"
    );

    let details = config.keep_details().then(|| IndexDetails {
        aggregates,
        reference_samples: samples,
        params: table,
    });
    Ok(IndexResult::new(
        values,
        IndexMetadata::from(config),
        diagnostics,
        details,
    ))
}

/// Builds the reference sample for `date` and fits it.
fn fit_date(
    date: NaiveDate,
    reference: &dyn Series,
    config: &IndexConfig,
) -> Result<DateFit, IndexError> {
    let mut diag = Diagnostics::scoped(date);
    let sample = match reference_sample(
        reference,
        date,
        config.agg_length(),
        config.reduction(),
        &config.reference_window_config(),
        config.ref_years(),
        &mut diag,
    ) {
        Ok(sample) => Some(sample),
        Err(ReferenceError::Window(WindowError::Reduction { message, .. })) => {
            diag.push(DiagnosticKind::ReductionFailed { date, message });
            None
        }
        Err(e) => return Err(e.into()),
    };

    let row = match &sample {
        Some(sample) => {
            let fitted = fit(&sample.values(), &config.fit_config(), &mut diag)?;
            ParamRow::from_fit(&fitted)
        }
        None => ParamRow::new(
            config.family(),
            config.method(),
            None,
            FitStats::new(0, 0, 0.0),
        ),
    };
    Ok(DateFit {
        date,
        row,
        sample,
        diag,
    })
}

/// Aggregates the window ending at `date` and standardizes it.
fn value_date(
    date: NaiveDate,
    series: &dyn Series,
    table: &ParamTable,
    config: &IndexConfig,
) -> Result<DateValue, IndexError> {
    let mut diag = Diagnostics::scoped(date);
    let aggregate = match aggregate_window(
        series,
        date,
        config.agg_length(),
        config.reduction(),
        &config.window_config(),
        &mut diag,
    ) {
        Ok(aggregate) => aggregate.value(),
        Err(WindowError::Reduction { message, .. }) => {
            diag.push(DiagnosticKind::ReductionFailed { date, message });
            f64::NAN
        }
        Err(e) => return Err(e.into()),
    };
    let value = match table.get(date) {
        Some(row) => standardize(aggregate, row, config, &mut diag),
        None => f64::NAN,
    };
    Ok(DateValue {
        date,
        aggregate,
        value,
        diag,
    })
}
