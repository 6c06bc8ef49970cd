//! # sindex-calendar
//!
//! Gregorian date arithmetic used by the aggregation and reference-sampling
//! stages of the standardized-index pipeline.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["target date"] -->|"window_bounds(date, L)"| B["[date-L+1, date]"]
//!     B -->|"date_sequence(start, end)"| C["Vec of NaiveDate"]
//!     A -->|"with_year(date, y)"| D["representative date in year y"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use sindex_calendar::{date_sequence, window_bounds, with_year};
//!
//! let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
//! let (start, end) = window_bounds(date, 30).unwrap().unwrap();
//! assert_eq!(date_sequence(start, end).len(), 30);
//!
//! // Feb 29 in a non-leap year resolves to Feb 28.
//! let leap = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
//! assert_eq!(with_year(leap, 2019).unwrap(), NaiveDate::from_ymd_opt(2019, 2, 28).unwrap());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `window` | Trailing window bounds |
//! | `sequence` | Contiguous daily date sequences |
//! | `year` | Leap years and year substitution |
//! | `error` | Error types |

mod error;
mod sequence;
mod window;
mod year;

pub use error::CalendarError;
pub use sequence::date_sequence;
pub use window::window_bounds;
pub use year::{is_leap_year, with_year};
