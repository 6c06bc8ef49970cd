//! Reference-year selection.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use sindex_series::Series;

use crate::error::ReferenceError;

/// Which years make up the reference sample for a target date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefYears {
    /// Every year present in the reference series, except the target year.
    #[default]
    All,
    /// Exactly these years.
    Years(Vec<i32>),
    /// The `n` years immediately preceding the target year.
    Trailing(u32),
}

impl RefYears {
    /// Validates the policy.
    ///
    /// An explicit list must not be empty and a trailing length must be at
    /// least 1.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        match self {
            Self::All => Ok(()),
            Self::Years(years) if years.is_empty() => Err(ReferenceError::InvalidPolicy {
                reason: "explicit year list is empty".to_string(),
            }),
            Self::Years(_) => Ok(()),
            Self::Trailing(0) => Err(ReferenceError::InvalidPolicy {
                reason: "trailing length must be >= 1".to_string(),
            }),
            Self::Trailing(_) => Ok(()),
        }
    }

    /// Whether windows partly outside the data are aggregated by default.
    pub(crate) fn proceeds_out_of_range(&self) -> bool {
        !matches!(self, Self::Years(_))
    }

    /// Trailing length, if this is a trailing policy.
    pub fn length(&self) -> Option<u32> {
        match self {
            Self::Trailing(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for RefYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Years(years) => {
                let list: Vec<String> = years.iter().map(i32::to_string).collect();
                write!(f, "[{}]", list.join(", "))
            }
            Self::Trailing(n) => write!(f, "trailing({n})"),
        }
    }
}

/// Resolves the reference years for `target`, ascending and without
/// duplicates.
pub fn reference_years<S: Series + ?Sized>(
    target: NaiveDate,
    series: &S,
    policy: &RefYears,
) -> Vec<i32> {
    let target_year = target.year();
    match policy {
        RefYears::All => series
            .years()
            .into_iter()
            .filter(|&y| y != target_year)
            .collect(),
        RefYears::Years(years) => years
            .iter()
            .copied()
            .collect::<BTreeSet<i32>>()
            .into_iter()
            .collect(),
        RefYears::Trailing(n) => {
            let n = i32::try_from(*n).unwrap_or(i32::MAX);
            (target_year.saturating_sub(n)..target_year).collect()
        }
    }
}
