//! Diagnostic records and the collector passed through the pipeline.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

/// Goodness-of-fit test identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GofTest {
    /// Two-sided Kolmogorov-Smirnov test.
    KolmogorovSmirnov,
    /// Anderson-Darling test.
    AndersonDarling,
}

impl fmt::Display for GofTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KolmogorovSmirnov => f.write_str("ks"),
            Self::AndersonDarling => f.write_str("ad"),
        }
    }
}

/// A non-fatal condition, tagged by the stage that raised it.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Aggregation window extends beyond the series range.
    WindowOutOfRange {
        /// Window end date.
        date: NaiveDate,
        /// First date of the window.
        start: NaiveDate,
        /// `true` if aggregation proceeded with synthesized missing values.
        proceeded: bool,
    },
    /// Calendar dates inside the window are absent from the series.
    MissingDates {
        /// Window end date.
        date: NaiveDate,
        /// Number of absent dates.
        count: usize,
    },
    /// Missing fraction in the window exceeds the tolerance; the window was
    /// reduced without interpolation.
    WindowNaThresholdExceeded {
        /// Window end date.
        date: NaiveDate,
        /// Missing percentage in the window.
        pct_missing: f64,
        /// Configured tolerance (percent).
        threshold: f64,
    },
    /// Every value in the window is missing.
    WindowAllMissing {
        /// Window end date.
        date: NaiveDate,
    },
    /// The reduction function returned an error.
    ReductionFailed {
        /// Window end date.
        date: NaiveDate,
        /// Error message from the reduction.
        message: String,
    },
    /// A reference year was excluded because its window lies outside the data.
    ReferenceYearDropped {
        /// Excluded year.
        year: i32,
    },
    /// Too many missing values, or nothing left to fit.
    FitInsufficientData {
        /// Total number of observations.
        n_obs: usize,
        /// Number of missing observations.
        n_na: usize,
        /// Missing percentage.
        pct_na: f64,
        /// Configured tolerance (percent).
        threshold: f64,
    },
    /// Negative values in a sample for a zero-bounded family.
    NegativeValues {
        /// Family name.
        family: &'static str,
        /// Number of negative values.
        n_negative: usize,
    },
    /// Sample L-moments are unusable for the requested family.
    InvalidLmoments {
        /// Description of the problem.
        reason: String,
    },
    /// Maximum-likelihood optimisation did not converge.
    MleNotConverged {
        /// Family name.
        family: &'static str,
        /// Description of the failure.
        reason: String,
    },
    /// A goodness-of-fit test could not be computed.
    GofFailed {
        /// Which test failed.
        test: GofTest,
        /// Description of the failure.
        reason: String,
    },
    /// Fit rejected because a goodness-of-fit p-value is missing or below
    /// the configured threshold.
    GofRejected {
        /// Which test rejected the fit.
        test: GofTest,
        /// Observed p-value, if any.
        p_value: Option<f64>,
        /// Configured threshold.
        threshold: f64,
    },
    /// The fitted CDF is undefined at the observed aggregate.
    CdfUndefined {
        /// Observed aggregate value.
        value: f64,
    },
    /// The inverse-normal transform produced a non-finite value.
    NonFiniteIndex {
        /// Probability that was transformed.
        probability: f64,
    },
}

impl DiagnosticKind {
    /// Returns `true` for conditions about fitting or result policy, `false`
    /// for data-coverage notes.
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Self::WindowOutOfRange { .. }
                | Self::MissingDates { .. }
                | Self::ReferenceYearDropped { .. }
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowOutOfRange {
                date,
                start,
                proceeded,
            } => write!(
                f,
                "window {start}..={date} extends beyond the series range (proceeded: {proceeded})"
            ),
            Self::MissingDates { date, count } => {
                write!(f, "{count} dates absent from series in window ending {date}")
            }
            Self::WindowNaThresholdExceeded {
                date,
                pct_missing,
                threshold,
            } => write!(
                f,
                "window ending {date} is {pct_missing:.1}% missing (tolerance {threshold}%)"
            ),
            Self::WindowAllMissing { date } => {
                write!(f, "window ending {date} is entirely missing")
            }
            Self::ReductionFailed { date, message } => {
                write!(f, "reduction failed for window ending {date}: {message}")
            }
            Self::ReferenceYearDropped { year } => {
                write!(f, "reference year {year} lies outside the data")
            }
            Self::FitInsufficientData {
                n_obs,
                n_na,
                pct_na,
                threshold,
            } => write!(
                f,
                "insufficient data: {n_na} of {n_obs} missing ({pct_na:.1}%, tolerance {threshold}%)"
            ),
            Self::NegativeValues { family, n_negative } => {
                write!(f, "{n_negative} negative values cannot be fitted by {family}")
            }
            Self::InvalidLmoments { reason } => write!(f, "invalid L-moments: {reason}"),
            Self::MleNotConverged { family, reason } => {
                write!(f, "{family} maximum likelihood did not converge: {reason}")
            }
            Self::GofFailed { test, reason } => write!(f, "{test} test failed: {reason}"),
            Self::GofRejected {
                test,
                p_value,
                threshold,
            } => match p_value {
                Some(p) => write!(f, "{test} p-value {p:.4} below threshold {threshold}"),
                None => write!(f, "{test} p-value undefined (threshold {threshold})"),
            },
            Self::CdfUndefined { value } => write!(f, "cdf undefined at {value}"),
            Self::NonFiniteIndex { probability } => {
                write!(f, "probability {probability} maps to a non-finite index")
            }
        }
    }
}

/// A diagnostic scoped to the output date being processed, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    scope: Option<NaiveDate>,
    kind: DiagnosticKind,
}

impl Diagnostic {
    /// Output date the diagnostic belongs to.
    pub fn scope(&self) -> Option<NaiveDate> {
        self.scope
    }

    /// The condition that was raised.
    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(date) => write!(f, "[{date}] {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Collector for diagnostics, passed by `&mut` through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    scope: Option<NaiveDate>,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an unscoped collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector whose entries are tagged with `date`.
    pub fn scoped(date: NaiveDate) -> Self {
        Self {
            scope: Some(date),
            entries: Vec::new(),
        }
    }

    /// Records a condition and mirrors it to `tracing`.
    pub fn push(&mut self, kind: DiagnosticKind) {
        let scope = self.scope.map(|d| d.to_string()).unwrap_or_default();
        if kind.is_warning() {
            warn!(scope = %scope, "{kind}");
        } else {
            debug!(scope = %scope, "{kind}");
        }
        self.entries.push(Diagnostic {
            scope: self.scope,
            kind,
        });
    }

    /// Moves all entries of `other` into `self`, keeping their scopes.
    pub fn append(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// All recorded entries in push order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Consumes the collector and returns its entries.
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if any entry kind matches `pred`.
    pub fn any(&self, pred: impl Fn(&DiagnosticKind) -> bool) -> bool {
        self.entries.iter().any(|d| pred(&d.kind))
    }

    /// Iterates over entries scoped to `date`.
    pub fn for_date(&self, date: NaiveDate) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter(move |d| d.scope == Some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn scoped_entries_carry_date() {
        let mut diag = Diagnostics::scoped(ymd(2000, 1, 31));
        diag.push(DiagnosticKind::WindowAllMissing {
            date: ymd(2000, 1, 31),
        });
        assert_eq!(diag.entries()[0].scope(), Some(ymd(2000, 1, 31)));
        assert_eq!(diag.for_date(ymd(2000, 1, 31)).count(), 1);
        assert_eq!(diag.for_date(ymd(2000, 2, 1)).count(), 0);
    }

    #[test]
    fn append_keeps_scopes() {
        let mut all = Diagnostics::new();
        let mut a = Diagnostics::scoped(ymd(2000, 1, 1));
        a.push(DiagnosticKind::ReferenceYearDropped { year: 1999 });
        let mut b = Diagnostics::scoped(ymd(2000, 1, 2));
        b.push(DiagnosticKind::ReferenceYearDropped { year: 1998 });
        all.append(a);
        all.append(b);
        let scopes: Vec<_> = all.entries().iter().map(Diagnostic::scope).collect();
        assert_eq!(scopes, vec![Some(ymd(2000, 1, 1)), Some(ymd(2000, 1, 2))]);
    }

    #[test]
    fn warning_classification() {
        assert!(!DiagnosticKind::ReferenceYearDropped { year: 2000 }.is_warning());
        assert!(
            DiagnosticKind::NegativeValues {
                family: "gamma",
                n_negative: 1
            }
            .is_warning()
        );
    }

    #[test]
    fn display_messages() {
        let kind = DiagnosticKind::GofRejected {
            test: GofTest::KolmogorovSmirnov,
            p_value: Some(0.5),
            threshold: 0.99,
        };
        assert_eq!(kind.to_string(), "ks p-value 0.5000 below threshold 0.99");

        let kind = DiagnosticKind::GofRejected {
            test: GofTest::AndersonDarling,
            p_value: None,
            threshold: 0.05,
        };
        assert_eq!(kind.to_string(), "ad p-value undefined (threshold 0.05)");

        let mut diag = Diagnostics::scoped(ymd(2001, 3, 1));
        diag.push(DiagnosticKind::CdfUndefined { value: 1.5 });
        assert_eq!(diag.entries()[0].to_string(), "[2001-03-01] cdf undefined at 1.5");
    }

    #[test]
    fn diagnostics_are_send() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Diagnostics>();
    }
}
