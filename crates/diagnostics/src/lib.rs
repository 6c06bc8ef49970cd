//! # sindex-diagnostics
//!
//! Non-fatal conditions raised while computing standardized indices.
//!
//! Insufficient data, fitting failures and policy rejections never abort a
//! batch. They turn the affected date into a missing value and are recorded
//! here as a [`Diagnostic`] so callers and tests can inspect them. Every
//! push is mirrored to `tracing` (`warn!` for fit and policy conditions,
//! `debug!` for data-coverage notes).
//!
//! ```
//! use sindex_diagnostics::{DiagnosticKind, Diagnostics};
//!
//! let mut diag = Diagnostics::new();
//! diag.push(DiagnosticKind::InvalidLmoments {
//!     reason: "l2 <= 0".to_string(),
//! });
//! assert_eq!(diag.len(), 1);
//! assert!(diag.any(|k| matches!(k, DiagnosticKind::InvalidLmoments { .. })));
//! ```

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, GofTest};
