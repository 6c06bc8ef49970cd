//! Missing-value policies applied inside a window.

use std::fmt;
use std::str::FromStr;

use crate::error::WindowError;

/// How missing values inside a window are handled before reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Drop missing entries.
    #[default]
    None,
    /// Piecewise-linear interpolation over window positions; edges take the
    /// nearest observed value.
    Linear,
    /// Replace missing entries with the mean of the observed entries.
    Mean,
    /// Replace missing entries with zero.
    Zeros,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Mean => "mean",
            Self::Zeros => "zeros",
        })
    }
}

impl FromStr for Interpolation {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "na" => Ok(Self::None),
            "linear" => Ok(Self::Linear),
            "mean" => Ok(Self::Mean),
            "zeros" | "zero" => Ok(Self::Zeros),
            other => Err(WindowError::UnknownName {
                what: "interpolation",
                name: other.to_string(),
            }),
        }
    }
}

/// Applies `method` to a window where NaN marks a missing value.
///
/// `None` shortens the output; every other policy keeps the length. A
/// window with no observed values is returned unchanged.
pub fn fill_missing(values: &[f64], method: Interpolation) -> Vec<f64> {
    let observed: Vec<usize> = (0..values.len()).filter(|&i| !values[i].is_nan()).collect();
    if observed.is_empty() {
        return values.to_vec();
    }

    match method {
        Interpolation::None => values.iter().copied().filter(|v| !v.is_nan()).collect(),
        Interpolation::Zeros => values
            .iter()
            .map(|&v| if v.is_nan() { 0.0 } else { v })
            .collect(),
        Interpolation::Mean => {
            let known: Vec<f64> = observed.iter().map(|&i| values[i]).collect();
            let fill = sindex_stats::mean(&known);
            values
                .iter()
                .map(|&v| if v.is_nan() { fill } else { v })
                .collect()
        }
        Interpolation::Linear => linear(values, &observed),
    }
}

/// Linear interpolation between the observed positions in `observed`
/// (ascending, non-empty). Positions before the first or after the last
/// observation take that observation's value.
fn linear(values: &[f64], observed: &[usize]) -> Vec<f64> {
    let first = observed[0];
    let last = observed[observed.len() - 1];
    let mut out = values.to_vec();

    for slot in out.iter_mut().take(first) {
        *slot = values[first];
    }
    for slot in out.iter_mut().skip(last + 1) {
        *slot = values[last];
    }
    for pair in observed.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let (y0, y1) = (values[lo], values[hi]);
        let span = (hi - lo) as f64;
        for (i, slot) in out.iter_mut().enumerate().take(hi).skip(lo + 1) {
            let t = (i - lo) as f64 / span;
            *slot = y0 + t * (y1 - y0);
        }
    }
    out
}
