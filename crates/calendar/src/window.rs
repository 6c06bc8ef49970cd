//! Trailing aggregation window bounds.

use chrono::{Days, NaiveDate};

use crate::error::CalendarError;

/// Returns the inclusive bounds `[date - length + 1, date]` of a trailing
/// window of `length` days ending at `date`.
///
/// Returns `Ok(None)` for a zero-length window.
///
/// # Errors
///
/// Returns [`CalendarError::WindowUnderflow`] if the window start is not
/// representable.
pub fn window_bounds(
    date: NaiveDate,
    length: usize,
) -> Result<Option<(NaiveDate, NaiveDate)>, CalendarError> {
    if length == 0 {
        return Ok(None);
    }
    let start = date
        .checked_sub_days(Days::new(length as u64 - 1))
        .ok_or(CalendarError::WindowUnderflow { end: date, length })?;
    Ok(Some((start, date)))
}
