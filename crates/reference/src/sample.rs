//! Reference sample construction.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use sindex_calendar::with_year;
use sindex_diagnostics::{DiagnosticKind, Diagnostics};
use sindex_series::Series;
use sindex_window::{Aggregate, OutOfRange, Reduction, WindowConfig, aggregate_window};
use tracing::debug;

use crate::error::ReferenceError;
use crate::policy::{RefYears, reference_years};

/// One aggregate per reference year, keyed by representative date.
///
/// Entries may be NaN (incomplete windows); years outside the data are not
/// present at all and are listed in [`dropped_years`](Self::dropped_years).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSample {
    entries: BTreeMap<NaiveDate, f64>,
    dropped_years: Vec<i32>,
}

impl ReferenceSample {
    /// Builds a sample from representative-date entries.
    pub fn from_entries(entries: BTreeMap<NaiveDate, f64>) -> Self {
        Self {
            entries,
            dropped_years: Vec::new(),
        }
    }

    /// Representative date → aggregate, in date order.
    pub fn entries(&self) -> &BTreeMap<NaiveDate, f64> {
        &self.entries
    }

    /// Aggregates in date order, NaN for incomplete windows.
    pub fn values(&self) -> Vec<f64> {
        self.entries.values().copied().collect()
    }

    /// Representative dates used.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.keys().copied().collect()
    }

    /// Years excluded because their windows lie outside the data.
    pub fn dropped_years(&self) -> &[i32] {
        &self.dropped_years
    }

    /// Number of retained entries, NaN ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no year was retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of NaN entries.
    pub fn n_missing(&self) -> usize {
        self.entries.values().filter(|v| v.is_nan()).count()
    }
}

/// Computes the reference sample for `target`.
///
/// Each selected year contributes the aggregate of the window ending at the
/// representative date (the target's month and day in that year, with
/// Feb 29 mapped to Feb 28 in common years). For [`RefYears::All`] and
/// [`RefYears::Trailing`] partly covered windows are always aggregated; for
/// [`RefYears::Years`] the out-of-range policy in `config` applies.
///
/// # Errors
///
/// Returns [`ReferenceError::InvalidPolicy`] for an unusable policy and
/// propagates window errors (custom reduction failures).
#[tracing::instrument(level = "debug", skip(series, reduction, config, policy, diag))]
pub fn reference_sample<S: Series + ?Sized>(
    series: &S,
    target: NaiveDate,
    length: usize,
    reduction: &Reduction,
    config: &WindowConfig,
    policy: &RefYears,
    diag: &mut Diagnostics,
) -> Result<ReferenceSample, ReferenceError> {
    policy.validate()?;

    let window_config = if policy.proceeds_out_of_range() {
        config.clone().with_out_of_range(OutOfRange::Proceed)
    } else {
        config.clone()
    };

    let mut sample = ReferenceSample::default();
    for year in reference_years(target, series, policy) {
        let date = with_year(target, year)?;
        match aggregate_window(series, date, length, reduction, &window_config, diag)? {
            Aggregate::Value(v) => {
                sample.entries.insert(date, v);
            }
            Aggregate::OutOfRange => {
                diag.push(DiagnosticKind::ReferenceYearDropped { year });
                sample.dropped_years.push(year);
            }
        }
    }

    debug!(
        target_year = target.year(),
        n_years = sample.len(),
        n_missing = sample.n_missing(),
        n_dropped = sample.dropped_years.len(),
        "reference sample built"
    );
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sindex_series::DailySeries;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Daily value equals the calendar year, so window sums identify the year.
    fn year_valued(first: i32, last: i32) -> DailySeries {
        let mut s = DailySeries::new();
        for d in sindex_calendar::date_sequence(ymd(first, 1, 1), ymd(last, 12, 31)) {
            s.push(d, Some(d.year() as f64)).unwrap();
        }
        s
    }

    fn sample(series: &DailySeries, target: NaiveDate, policy: &RefYears) -> ReferenceSample {
        let mut diag = Diagnostics::new();
        reference_sample(
            series,
            target,
            10,
            &Reduction::Mean,
            &WindowConfig::new(),
            policy,
            &mut diag,
        )
        .unwrap()
    }

    #[test]
    fn all_years_except_target() {
        let s = year_valued(2000, 2009);
        let rs = sample(&s, ymd(2009, 6, 30), &RefYears::All);
        assert_eq!(rs.len(), 9);
        for (date, value) in rs.entries() {
            assert_relative_eq!(*value, date.year() as f64);
            assert_ne!(date.year(), 2009);
        }
    }

    #[test]
    fn feb_29_target_uses_feb_28_in_common_years() {
        let s = year_valued(2000, 2008);
        let rs = sample(&s, ymd(2008, 2, 29), &RefYears::Trailing(4));
        assert_eq!(
            rs.dates(),
            vec![ymd(2004, 2, 29), ymd(2005, 2, 28), ymd(2006, 2, 28), ymd(2007, 2, 28)]
        );
    }

    #[test]
    fn years_outside_data_are_dropped() {
        let s = year_valued(2000, 2004);
        let rs = sample(&s, ymd(2004, 7, 1), &RefYears::Trailing(8));
        assert_eq!(rs.len(), 4);
        assert_eq!(rs.dropped_years(), &[1996, 1997, 1998, 1999]);
    }

    #[test]
    fn explicit_years_respect_skip_policy() {
        let s = year_valued(2000, 2004);
        // The 2000 window for Jan 5 starts in 1999 and is skipped.
        let rs = sample(&s, ymd(2004, 1, 5), &RefYears::Years(vec![2000, 2001]));
        assert_eq!(rs.dates(), vec![ymd(2001, 1, 5)]);
        assert_eq!(rs.dropped_years(), &[2000]);
    }

    #[test]
    fn incomplete_windows_are_kept_as_nan() {
        let mut s = year_valued(2000, 2004);
        for d in sindex_calendar::date_sequence(ymd(2002, 6, 1), ymd(2002, 6, 10)) {
            s.set_missing(d);
        }
        let rs = sample(&s, ymd(2004, 6, 10), &RefYears::All);
        assert_eq!(rs.len(), 4);
        assert_eq!(rs.n_missing(), 1);
        assert!(rs.entries()[&ymd(2002, 6, 10)].is_nan());
    }

    #[test]
    fn invalid_policy_is_error() {
        let s = year_valued(2000, 2001);
        let mut diag = Diagnostics::new();
        let err = reference_sample(
            &s,
            ymd(2001, 1, 1),
            5,
            &Reduction::Sum,
            &WindowConfig::new(),
            &RefYears::Trailing(0),
            &mut diag,
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidPolicy { .. }));
    }
}
