//! Date-indexed parameter table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sindex_distr::{Family, FitStats, FittedDistribution, Method, Params};

/// Parameters and fit statistics for one output date.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRow {
    family: Family,
    method: Method,
    params: Option<Params>,
    stats: FitStats,
}

impl ParamRow {
    /// Creates a row. `params`, when present, should belong to `family`.
    pub fn new(family: Family, method: Method, params: Option<Params>, stats: FitStats) -> Self {
        Self {
            family,
            method,
            params,
            stats,
        }
    }

    /// Row for a fresh fit.
    pub fn from_fit(fitted: &FittedDistribution) -> Self {
        Self::new(
            fitted.family(),
            fitted.method(),
            fitted.params().copied(),
            *fitted.stats(),
        )
    }

    /// Distribution family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Parameters, `None` if undefined.
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Fit statistics.
    pub fn stats(&self) -> &FitStats {
        &self.stats
    }

    /// Parameter names for this row's family and method.
    pub fn param_names(&self) -> &'static [&'static str] {
        self.family.param_names(self.method)
    }

    /// Parameter values in [`param_names`](Self::param_names) order, NaN
    /// when undefined.
    pub fn param_values(&self) -> Vec<f64> {
        match &self.params {
            Some(p) => p.values(),
            None => vec![f64::NAN; self.family.n_params()],
        }
    }
}

/// Parameter rows keyed by output date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTable {
    rows: BTreeMap<NaiveDate, ParamRow>,
}

impl ParamTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the row for `date`.
    pub fn insert(&mut self, date: NaiveDate, row: ParamRow) {
        self.rows.insert(date, row);
    }

    /// Row for `date`.
    pub fn get(&self, date: NaiveDate) -> Option<&ParamRow> {
        self.rows.get(&date)
    }

    /// Returns `true` if a row exists for `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.rows.contains_key(&date)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dates with a row, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.keys().copied().collect()
    }

    /// Rows in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &ParamRow)> + '_ {
        self.rows.iter().map(|(d, r)| (*d, r))
    }
}

impl FromIterator<(NaiveDate, ParamRow)> for ParamTable {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, ParamRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn undefined_row_has_nan_values() {
        let row = ParamRow::new(
            Family::Glogis,
            Method::Lmoments,
            None,
            FitStats::new(30, 5, 0.0),
        );
        assert_eq!(row.param_names(), &["xi", "alpha", "kappa"]);
        assert!(row.param_values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn table_is_date_ordered() {
        let row = ParamRow::new(
            Family::Gamma,
            Method::Mle,
            Some(Params::Gamma {
                shape: 2.0,
                rate: 0.1,
            }),
            FitStats::new(30, 0, 0.1),
        );
        let table: ParamTable = [(ymd(2001, 3, 1), row.clone()), (ymd(2000, 3, 1), row)]
            .into_iter()
            .collect();
        assert_eq!(table.dates(), vec![ymd(2000, 3, 1), ymd(2001, 3, 1)]);
        assert!(table.contains(ymd(2001, 3, 1)));
        assert_eq!(table.get(ymd(2000, 3, 1)).unwrap().param_values(), vec![2.0, 0.1]);
    }
}
