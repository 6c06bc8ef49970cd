//! Error types for the sindex-window crate.

use chrono::NaiveDate;
use sindex_calendar::CalendarError;

/// Error type for all fallible operations in the sindex-window crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// Returned when the window bounds cannot be represented.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Returned when a configuration parameter is invalid.
    #[error("invalid window configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the reduction function fails for one window.
    #[error("reduction '{name}' failed for window ending {date}: {message}")]
    Reduction {
        /// Name of the reduction.
        name: String,
        /// Window end date.
        date: NaiveDate,
        /// Error message produced by the reduction.
        message: String,
    },

    /// Returned when a name does not match any known policy or reduction.
    #[error("unknown {what}: {name:?}")]
    UnknownName {
        /// Kind of name being parsed.
        what: &'static str,
        /// The unrecognised name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let e = WindowError::InvalidConfig {
            reason: "na_thres must be in [0, 100]".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid window configuration: na_thres must be in [0, 100]"
        );
    }

    #[test]
    fn error_reduction() {
        let e = WindowError::Reduction {
            name: "p90".to_string(),
            date: NaiveDate::from_ymd_opt(2000, 1, 31).unwrap(),
            message: "too few values".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "reduction 'p90' failed for window ending 2000-01-31: too few values"
        );
    }

    #[test]
    fn error_unknown_name() {
        let e = WindowError::UnknownName {
            what: "interpolation",
            name: "spline".to_string(),
        };
        assert_eq!(e.to_string(), "unknown interpolation: \"spline\"");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<WindowError>();
    }
}
