//! Error types for the sindex-distr crate.

use crate::family::{Family, Method};

/// Error type for all fallible operations in the sindex-distr crate.
///
/// Only configuration problems are errors. Insufficient data, failed
/// optimisation and rejected goodness-of-fit tests are reported through
/// [`sindex_diagnostics::Diagnostics`] and leave the parameters undefined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Returned when a family cannot be fitted with the requested method.
    #[error("method '{method}' is not supported for family '{family}'")]
    UnsupportedMethod {
        /// Requested family.
        family: Family,
        /// Requested method.
        method: Method,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid fit configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a parameter vector does not match its family.
    #[error("invalid parameters for '{family}': {reason}")]
    InvalidParams {
        /// Family name.
        family: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a name does not match any known family or method.
    #[error("unknown {what}: {name:?}")]
    UnknownName {
        /// Kind of name being parsed.
        what: &'static str,
        /// The unrecognised name.
        name: String,
    },
}
