//! Error types for the sindex-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the sindex-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a trailing window would start before the earliest
    /// representable date.
    #[error("window of {length} days ending at {end} underflows the calendar")]
    WindowUnderflow {
        /// Last day of the requested window.
        end: NaiveDate,
        /// Requested window length in days.
        length: usize,
    },

    /// Returned when a year cannot be substituted into a date.
    #[error("year {year} is outside the supported calendar range")]
    YearOutOfRange {
        /// The year that could not be represented.
        year: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_window_underflow() {
        let err = CalendarError::WindowUnderflow {
            end: NaiveDate::from_ymd_opt(2000, 1, 5).unwrap(),
            length: 10,
        };
        assert_eq!(
            err.to_string(),
            "window of 10 days ending at 2000-01-05 underflows the calendar"
        );
    }

    #[test]
    fn error_year_out_of_range() {
        let err = CalendarError::YearOutOfRange { year: 400_000 };
        assert_eq!(
            err.to_string(),
            "year 400000 is outside the supported calendar range"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
