//! Window alignment and aggregation.

use chrono::NaiveDate;
use sindex_calendar::{date_sequence, window_bounds};
use sindex_diagnostics::{DiagnosticKind, Diagnostics};
use sindex_series::Series;

use crate::config::{OutOfRange, WindowConfig};
use crate::error::WindowError;
use crate::interpolate::fill_missing;
use crate::reduce::Reduction;

/// Outcome of aggregating one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregate {
    /// Reduced value; NaN when the window is missing.
    Value(f64),
    /// The window lies (partly, under [`OutOfRange::Skip`]) outside the series.
    OutOfRange,
}

impl Aggregate {
    /// The aggregate as a number, NaN for missing or out-of-range windows.
    pub fn value(self) -> f64 {
        match self {
            Self::Value(v) => v,
            Self::OutOfRange => f64::NAN,
        }
    }

    /// Returns `true` if the aggregate is a finite number.
    pub fn is_finite(self) -> bool {
        self.value().is_finite()
    }
}

/// Aligns series values onto every calendar date in `[start, end]`.
///
/// Returns one slot per date (NaN for missing or absent entries) and the
/// number of dates absent from the series.
pub fn align_window<S: Series + ?Sized>(
    series: &S,
    start: NaiveDate,
    end: NaiveDate,
) -> (Vec<f64>, usize) {
    let present = series.range(start, end);
    let mut entries = present.iter().peekable();
    let mut n_absent = 0usize;

    let values: Vec<f64> = date_sequence(start, end)
        .into_iter()
        .map(|date| match entries.peek() {
            Some(&&(d, v)) if d == date => {
                entries.next();
                v.unwrap_or(f64::NAN)
            }
            _ => {
                n_absent += 1;
                f64::NAN
            }
        })
        .collect();
    (values, n_absent)
}

/// Aggregates the trailing window of `length` days ending at `date`.
///
/// Non-fatal conditions (out-of-range windows, absent dates, too many
/// missing values, fully missing windows) are recorded in `diag`.
///
/// # Errors
///
/// Returns [`WindowError::Reduction`] if a custom reduction fails and
/// [`WindowError::Calendar`] if the window start is not representable.
#[tracing::instrument(level = "trace", skip(series, reduction, config, diag))]
pub fn aggregate_window<S: Series + ?Sized>(
    series: &S,
    date: NaiveDate,
    length: usize,
    reduction: &Reduction,
    config: &WindowConfig,
    diag: &mut Diagnostics,
) -> Result<Aggregate, WindowError> {
    // 1. Bounds and coverage
    let Some((start, end)) = window_bounds(date, length)? else {
        return Ok(Aggregate::Value(f64::NAN));
    };
    let Some((first, last)) = series.date_range() else {
        return Ok(Aggregate::OutOfRange);
    };
    if end < first || start > last {
        diag.push(DiagnosticKind::WindowOutOfRange {
            date,
            start,
            proceeded: false,
        });
        return Ok(Aggregate::OutOfRange);
    }
    if start < first || end > last {
        let proceed = config.out_of_range() == OutOfRange::Proceed;
        diag.push(DiagnosticKind::WindowOutOfRange {
            date,
            start,
            proceeded: proceed,
        });
        if !proceed {
            return Ok(Aggregate::OutOfRange);
        }
    }

    // 2. Align onto the full calendar
    let (values, n_absent) = align_window(series, start, end);
    if n_absent > 0 {
        diag.push(DiagnosticKind::MissingDates {
            date,
            count: n_absent,
        });
    }
    if values.is_empty() {
        return Ok(Aggregate::Value(f64::NAN));
    }

    // 3. Missing values
    let n_missing = values.iter().filter(|v| v.is_nan()).count();
    if n_missing == values.len() {
        diag.push(DiagnosticKind::WindowAllMissing { date });
        return Ok(Aggregate::Value(f64::NAN));
    }
    let pct_missing = n_missing as f64 / length as f64 * 100.0;
    let prepared = if pct_missing > config.na_thres() {
        diag.push(DiagnosticKind::WindowNaThresholdExceeded {
            date,
            pct_missing,
            threshold: config.na_thres(),
        });
        values
    } else if n_missing > 0 {
        fill_missing(&values, config.interpolation())
    } else {
        values
    };

    // 4. Reduce
    reduction
        .reduce(&prepared)
        .map(Aggregate::Value)
        .map_err(|message| WindowError::Reduction {
            name: reduction.name().to_string(),
            date,
            message,
        })
}
