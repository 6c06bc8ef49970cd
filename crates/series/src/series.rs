//! The `Series` trait and the in-memory `DailySeries`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::error::SeriesError;
use crate::meta::SeriesMeta;

/// Read-only view of a date-indexed series with explicit missing values.
///
/// Implementors must be `Send + Sync` so per-date work can run in parallel
/// against a shared series.
pub trait Series: Send + Sync {
    /// Value observed on `date`. `None` if the date is absent or missing.
    fn value_at(&self, date: NaiveDate) -> Option<f64>;

    /// First and last date of the series, or `None` if it is empty.
    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)>;

    /// Whether the date is present as an entry (missing or not).
    fn contains(&self, date: NaiveDate) -> bool;

    /// Entries with `start <= date <= end`, in date order.
    fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, Option<f64>)>;

    /// Metadata attached to the series.
    fn meta(&self) -> &SeriesMeta;

    /// Whether `date` lies within `[first, last]` of the series.
    fn covers(&self, date: NaiveDate) -> bool {
        match self.date_range() {
            Some((first, last)) => first <= date && date <= last,
            None => false,
        }
    }

    /// Calendar years that have at least one entry.
    fn years(&self) -> BTreeSet<i32> {
        match self.date_range() {
            Some((first, last)) => self
                .range(first, last)
                .into_iter()
                .map(|(d, _)| d.year())
                .collect(),
            None => BTreeSet::new(),
        }
    }
}

/// Ordered daily series. Missing observations are stored as `None`; a NaN
/// supplied on construction is normalised to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, Option<f64>>,
    meta: SeriesMeta,
}

fn normalise(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

impl DailySeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a contiguous daily series starting at `start`.
    ///
    /// NaN entries become missing values.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        let values = start
            .iter_days()
            .zip(values.iter())
            .map(|(d, &v)| (d, normalise(Some(v))))
            .collect();
        Self {
            values,
            meta: SeriesMeta::default(),
        }
    }

    /// Builds a series from parallel date and value slices.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the slices differ in length
    /// and [`SeriesError::NotIncreasing`] if dates are not strictly increasing.
    pub fn from_pairs(dates: &[NaiveDate], values: &[Option<f64>]) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        let mut series = Self::new();
        for (&date, &value) in dates.iter().zip(values.iter()) {
            series.push(date, value)?;
        }
        Ok(series)
    }

    /// Appends an entry after the current last date.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NotIncreasing`] if `date` does not follow the
    /// last date.
    pub fn push(&mut self, date: NaiveDate, value: Option<f64>) -> Result<(), SeriesError> {
        if let Some((&previous, _)) = self.values.last_key_value() {
            if date <= previous {
                return Err(SeriesError::NotIncreasing { previous, date });
            }
        }
        self.values.insert(date, normalise(value));
        Ok(())
    }

    /// Attaches metadata.
    pub fn with_meta(mut self, meta: SeriesMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Number of entries, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing entries.
    pub fn n_missing(&self) -> usize {
        self.values.values().filter(|v| v.is_none()).count()
    }

    /// Iterates over entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.values.iter().map(|(&d, &v)| (d, v))
    }

    /// Marks the value on `date` as missing, inserting the date if absent.
    pub fn set_missing(&mut self, date: NaiveDate) {
        self.values.insert(date, None);
    }

    /// Replaces the value on an existing or new date.
    pub fn set(&mut self, date: NaiveDate, value: Option<f64>) {
        self.values.insert(date, normalise(value));
    }
}

impl Series for DailySeries {
    fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied().flatten()
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (&first, _) = self.values.first_key_value()?;
        let (&last, _) = self.values.last_key_value()?;
        Some((first, last))
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, Option<f64>)> {
        if end < start {
            return Vec::new();
        }
        self.values
            .range(start..=end)
            .map(|(&d, &v)| (d, v))
            .collect()
    }

    fn meta(&self) -> &SeriesMeta {
        &self.meta
    }

    fn years(&self) -> BTreeSet<i32> {
        self.values.keys().map(|d| d.year()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_values_is_contiguous() {
        let s = DailySeries::from_values(ymd(2000, 2, 27), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.date_range(), Some((ymd(2000, 2, 27), ymd(2000, 3, 1))));
        assert_eq!(s.value_at(ymd(2000, 2, 29)), Some(3.0));
    }

    #[test]
    fn nan_is_missing() {
        let s = DailySeries::from_values(ymd(2000, 1, 1), &[1.0, f64::NAN]);
        assert!(s.contains(ymd(2000, 1, 2)));
        assert_eq!(s.value_at(ymd(2000, 1, 2)), None);
        assert_eq!(s.n_missing(), 1);
    }

    #[test]
    fn push_rejects_unordered() {
        let mut s = DailySeries::new();
        s.push(ymd(2000, 1, 2), Some(1.0)).unwrap();
        let err = s.push(ymd(2000, 1, 1), Some(2.0)).unwrap_err();
        assert!(matches!(err, SeriesError::NotIncreasing { .. }));
        let err = s.push(ymd(2000, 1, 2), Some(2.0)).unwrap_err();
        assert!(matches!(err, SeriesError::NotIncreasing { .. }));
    }

    #[test]
    fn from_pairs_length_mismatch() {
        let err = DailySeries::from_pairs(&[ymd(2000, 1, 1)], &[]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { dates: 1, values: 0 });
    }

    #[test]
    fn covers_and_contains_differ_on_gaps() {
        let s = DailySeries::from_pairs(
            &[ymd(2000, 1, 1), ymd(2000, 1, 5)],
            &[Some(1.0), Some(2.0)],
        )
        .unwrap();
        assert!(s.covers(ymd(2000, 1, 3)));
        assert!(!s.contains(ymd(2000, 1, 3)));
        assert!(!s.covers(ymd(2000, 1, 6)));
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let s = DailySeries::from_values(ymd(2000, 1, 1), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let r = s.range(ymd(2000, 1, 2), ymd(2000, 1, 4));
        assert_eq!(
            r,
            vec![
                (ymd(2000, 1, 2), Some(2.0)),
                (ymd(2000, 1, 3), Some(3.0)),
                (ymd(2000, 1, 4), Some(4.0)),
            ]
        );
        assert!(s.range(ymd(2000, 1, 4), ymd(2000, 1, 2)).is_empty());
    }

    #[test]
    fn years_present() {
        let s = DailySeries::from_values(ymd(1999, 12, 30), &[1.0; 5]);
        let years: Vec<i32> = s.years().into_iter().collect();
        assert_eq!(years, vec![1999, 2000]);
    }

    #[test]
    fn empty_series() {
        let s = DailySeries::new();
        assert!(s.is_empty());
        assert_eq!(s.date_range(), None);
        assert!(!s.covers(ymd(2000, 1, 1)));
        assert!(s.years().is_empty());
    }

    #[test]
    fn series_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<DailySeries>();
    }
}
