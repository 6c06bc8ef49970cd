//! # sindex-window
//!
//! Reduces the trailing window `[date - L + 1, date]` of a daily series to a
//! single aggregate value.
//!
//! ## Pipeline
//!
//! 1. **Bounds**: a window wholly outside the series is out of range; a
//!    partially outside window proceeds or stops per [`OutOfRange`].
//! 2. **Align**: every calendar date of the window gets a slot; dates absent
//!    from the series become missing values, so the window always has `L`
//!    slots.
//! 3. **Missing values**: an entirely missing window is NaN. Above the
//!    tolerance the raw window goes to the reduction untouched; otherwise
//!    the [`Interpolation`] policy fills or drops the gaps.
//! 4. **Reduce** with a [`Reduction`] (sum by default).
//!
//! ```
//! use chrono::NaiveDate;
//! use sindex_diagnostics::Diagnostics;
//! use sindex_series::DailySeries;
//! use sindex_window::{Aggregate, Reduction, WindowConfig, aggregate_window};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let series = DailySeries::from_values(start, &[1.0, 2.0, 3.0, 4.0]);
//! let date = NaiveDate::from_ymd_opt(2000, 1, 4).unwrap();
//! let mut diag = Diagnostics::new();
//!
//! let agg = aggregate_window(&series, date, 3, &Reduction::Sum, &WindowConfig::new(), &mut diag)
//!     .unwrap();
//! assert_eq!(agg, Aggregate::Value(9.0));
//! ```

mod aggregate;
mod config;
mod error;
mod interpolate;
mod reduce;

pub use aggregate::{Aggregate, aggregate_window, align_window};
pub use config::{OutOfRange, WindowConfig};
pub use error::WindowError;
pub use interpolate::{Interpolation, fill_missing};
pub use reduce::Reduction;
