//! Contiguous daily date sequences.

use chrono::NaiveDate;

/// Generates every calendar date from `start` to `end`, both inclusive.
///
/// Returns an empty vector when `end < start`. Leap days are included
/// whenever they fall inside the range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sindex_calendar::date_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2000, 12, 30).unwrap();
/// let end = NaiveDate::from_ymd_opt(2001, 1, 2).unwrap();
/// assert_eq!(date_sequence(start, end).len(), 4);
/// ```
pub fn date_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    let n_days = (end - start).num_days() as usize + 1;
    start.iter_days().take(n_days).collect()
}
