//! # sindex-index
//!
//! Standardized drought and wetness indices (SPI, SPEI, SSI) from a daily
//! series.
//!
//! For every output date the series is aggregated over a trailing window,
//! the same window is aggregated in each reference year to form a sample,
//! a distribution is fitted to that sample and the observed aggregate is
//! mapped through the fitted CDF and the inverse standard-normal CDF.
//!
//! ```mermaid
//! flowchart TD
//!     D[output dates] --> P{row in supplied table?}
//!     P -- yes --> T[parameter table]
//!     P -- no --> R[reference sample] --> F[fit] --> T
//!     D --> A[window aggregate]
//!     A --> X[CDF + zero blend]
//!     T --> X
//!     X --> N[inverse normal, round]
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | `config` | [`IndexConfig`] builder and validation |
//! | `compute` | [`compute_index`], parallel per-date pipeline |
//! | `transform` | [`blend_zero`], [`inverse_normal`] |
//! | `table` | [`ParamTable`] / [`ParamRow`] |
//! | `result` | [`IndexResult`], [`IndexMetadata`], [`IndexDetails`] |
//!
//! Non-fatal conditions are collected in [`IndexResult::diagnostics`];
//! only configuration problems are returned as [`IndexError`].

mod compute;
mod config;
mod error;
mod result;
mod table;
mod transform;

pub use compute::compute_index;
pub use config::IndexConfig;
pub use error::IndexError;
pub use result::{IndexDetails, IndexMetadata, IndexResult};
pub use table::{ParamRow, ParamTable};
pub use transform::{blend_zero, inverse_normal};
