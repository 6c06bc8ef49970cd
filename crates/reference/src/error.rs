//! Error types for the sindex-reference crate.

use sindex_calendar::CalendarError;
use sindex_window::WindowError;

/// Error type for all fallible operations in the sindex-reference crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReferenceError {
    /// Returned when the reference-year policy is unusable.
    #[error("invalid reference years: {reason}")]
    InvalidPolicy {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a representative date cannot be built.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Returned when aggregating a reference window fails.
    #[error(transparent)]
    Window(#[from] WindowError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_policy() {
        let e = ReferenceError::InvalidPolicy {
            reason: "trailing length must be >= 1".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid reference years: trailing length must be >= 1"
        );
    }

    #[test]
    fn error_wraps_calendar() {
        let e: ReferenceError = CalendarError::YearOutOfRange { year: 500_000 }.into();
        assert_eq!(
            e.to_string(),
            "year 500000 is outside the supported calendar range"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ReferenceError>();
    }
}
