//! # sindex-reference
//!
//! Builds the reference sample a distribution is fitted to: one window
//! aggregate per reference year, taken at the target date's month and day.
//!
//! ## Year policies
//!
//! | [`RefYears`] | Years used | Out-of-range windows |
//! |--------------|-----------|----------------------|
//! | `All` | every year in the series except the target year | proceed |
//! | `Trailing(n)` | the `n` years before the target year | proceed |
//! | `Years(list)` | exactly the listed years | caller's choice |
//!
//! Years whose window lies outside the data are dropped from the sample.
//! Years whose window is merely incomplete stay in as NaN so the fitter can
//! account for them.

mod error;
mod policy;
mod sample;

pub use error::ReferenceError;
pub use policy::{RefYears, reference_years};
pub use sample::{ReferenceSample, reference_sample};
