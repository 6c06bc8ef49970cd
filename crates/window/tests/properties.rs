use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use sindex_diagnostics::Diagnostics;
use sindex_series::{DailySeries, Series};
use sindex_window::{
    Aggregate, Interpolation, OutOfRange, Reduction, WindowConfig, aggregate_window, fill_missing,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Deterministic, irregular daily values over several years.
fn synthetic(start: NaiveDate, n: usize) -> DailySeries {
    let values: Vec<f64> = (0..n)
        .map(|i| ((i * 7919) % 101) as f64 / 10.0)
        .collect();
    DailySeries::from_values(start, &values)
}

#[test]
fn complete_windows_match_direct_reduction() {
    let series = synthetic(ymd(1999, 1, 1), 3 * 365);
    let (first, last) = series.date_range().unwrap();
    let config = WindowConfig::new();

    for length in [1usize, 5, 30, 90] {
        for reduction in [Reduction::Sum, Reduction::Mean, Reduction::Max, Reduction::Median] {
            let mut date = first.checked_add_days(Days::new(length as u64)).unwrap();
            while date <= last {
                let start = date.checked_sub_days(Days::new(length as u64 - 1)).unwrap();
                let raw: Vec<f64> = series
                    .range(start, date)
                    .into_iter()
                    .map(|(_, v)| v.unwrap())
                    .collect();
                let expected = reduction.reduce(&raw).unwrap();

                let mut diag = Diagnostics::new();
                let agg =
                    aggregate_window(&series, date, length, &reduction, &config, &mut diag).unwrap();
                assert_relative_eq!(agg.value(), expected, epsilon = 1e-9);
                assert!(diag.is_empty());

                date = date.checked_add_days(Days::new(37)).unwrap();
            }
        }
    }
}

#[test]
fn fully_missing_window_is_nan_for_every_policy() {
    let mut series = synthetic(ymd(2000, 1, 1), 60);
    for d in 20..30u64 {
        series.set_missing(ymd(2000, 1, 1).checked_add_days(Days::new(d)).unwrap());
    }
    let date = ymd(2000, 1, 30);
    for interpolation in [
        Interpolation::None,
        Interpolation::Linear,
        Interpolation::Mean,
        Interpolation::Zeros,
    ] {
        for na_thres in [0.0, 10.0, 100.0] {
            let config = WindowConfig::new()
                .with_na_thres(na_thres)
                .with_interpolation(interpolation);
            let mut diag = Diagnostics::new();
            let agg = aggregate_window(&series, date, 10, &Reduction::Sum, &config, &mut diag)
                .unwrap();
            assert!(matches!(agg, Aggregate::Value(v) if v.is_nan()));
        }
    }
}

#[test]
fn fill_policies_preserve_length() {
    let windows: [&[f64]; 3] = [
        &[f64::NAN, 1.0, 2.0],
        &[1.0, f64::NAN, f64::NAN, 4.0, f64::NAN],
        &[5.0, 6.0, 7.0],
    ];
    for w in windows {
        assert_eq!(fill_missing(w, Interpolation::Zeros).len(), w.len());
        assert_eq!(fill_missing(w, Interpolation::Mean).len(), w.len());
        assert_eq!(fill_missing(w, Interpolation::Linear).len(), w.len());
        let n_obs = w.iter().filter(|v| !v.is_nan()).count();
        assert_eq!(fill_missing(w, Interpolation::None).len(), n_obs);
    }
}

#[test]
fn window_before_series_start() {
    let series = synthetic(ymd(2000, 1, 1), 100);
    let mut diag = Diagnostics::new();
    let skip = WindowConfig::new();
    let agg = aggregate_window(&series, ymd(2000, 1, 15), 30, &Reduction::Sum, &skip, &mut diag)
        .unwrap();
    assert_eq!(agg, Aggregate::OutOfRange);

    let proceed = WindowConfig::new()
        .with_out_of_range(OutOfRange::Proceed)
        .with_na_thres(60.0);
    let agg = aggregate_window(&series, ymd(2000, 1, 15), 30, &Reduction::Sum, &proceed, &mut diag)
        .unwrap();
    assert!(agg.is_finite());
}
