//! Error types for the sindex-index crate.

use sindex_distr::FitError;
use sindex_reference::ReferenceError;
use sindex_window::WindowError;

/// Error type for all fallible operations in the sindex-index crate.
///
/// Every variant is a configuration problem detected before per-date work
/// starts, or a calendar failure that makes a window unrepresentable.
/// Per-date data and fitting problems are diagnostics, not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid index configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned for an invalid family/method combination.
    #[error(transparent)]
    Fit(#[from] FitError),

    /// Returned when a window cannot be built.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Returned when a reference sample cannot be built.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sindex_distr::{Family, Method};

    #[test]
    fn error_invalid_config() {
        let e = IndexError::InvalidConfig {
            reason: "agg_length must be >= 1".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid index configuration: agg_length must be >= 1"
        );
    }

    #[test]
    fn error_from_fit() {
        let e: IndexError = FitError::UnsupportedMethod {
            family: Family::Weibull3,
            method: Method::Mle,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "method 'mle' is not supported for family 'weibull3'"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<IndexError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<IndexError>();
    }
}
