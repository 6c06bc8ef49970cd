//! # sindex-series
//!
//! The time-series container consumed by the standardized-index pipeline.
//!
//! The pipeline only talks to the [`Series`] trait: point lookup, coverage,
//! range bounds, and ordered iteration. [`DailySeries`] is the in-memory
//! implementation: an ordered `date -> Option<f64>` map with explicit missing
//! entries and an opaque [`SeriesMeta`] bundle that is carried through to the
//! output unchanged.
//!
//! ```
//! use chrono::NaiveDate;
//! use sindex_series::{DailySeries, Series};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let series = DailySeries::from_values(start, &[1.0, f64::NAN, 3.0]);
//! assert_eq!(series.value_at(start), Some(1.0));
//! assert_eq!(series.value_at(start.succ_opt().unwrap()), None);
//! assert_eq!(series.len(), 3);
//! ```

mod error;
mod meta;
mod series;

pub use error::SeriesError;
pub use meta::SeriesMeta;
pub use series::{DailySeries, Series};
