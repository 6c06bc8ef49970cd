//! Error types for the sindex-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the sindex-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when dates are not strictly increasing.
    #[error("dates must be strictly increasing: {date} follows {previous}")]
    NotIncreasing {
        /// The earlier date that was already present.
        previous: NaiveDate,
        /// The offending date.
        date: NaiveDate,
    },

    /// Returned when date and value slices differ in length.
    #[error("length mismatch: {dates} dates, {values} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates: usize,
        /// Number of values supplied.
        values: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_increasing() {
        let e = SeriesError::NotIncreasing {
            previous: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "dates must be strictly increasing: 2000-01-01 follows 2000-01-02"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = SeriesError::LengthMismatch {
            dates: 3,
            values: 2,
        };
        assert_eq!(e.to_string(), "length mismatch: 3 dates, 2 values");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SeriesError>();
    }
}
