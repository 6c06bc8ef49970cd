//! Leap years and year substitution for representative dates.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Returns `true` if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Substitutes `year` into the month and day of `date`.
///
/// February 29 maps to February 28 when `year` is not a leap year, so every
/// reference year yields a valid representative date.
///
/// # Errors
///
/// Returns [`CalendarError::YearOutOfRange`] if `year` is not representable.
pub fn with_year(date: NaiveDate, year: i32) -> Result<NaiveDate, CalendarError> {
    let day = if date.month() == 2 && date.day() == 29 && !is_leap_year(year) {
        28
    } else {
        date.day()
    };
    NaiveDate::from_ymd_opt(year, date.month(), day).ok_or(CalendarError::YearOutOfRange { year })
}
