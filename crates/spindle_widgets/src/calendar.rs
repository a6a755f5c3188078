//! Calendar collaborators
//!
//! Pure day-count and range helpers used by the picker coordinator. Months
//! are 1-indexed throughout. No timezone handling: the picker only ever
//! carries day-granularity values.

use chrono::NaiveDate;

/// Whether a year has a February 29th
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month (1-indexed), honoring leap years
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => {
            debug_assert!(false, "month out of range: {month}");
            30
        }
    }
}

/// Whether `date` lies within `[min, max]`, inclusive on both bounds
pub fn date_in_range(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> bool {
    min <= date && date <= max
}

/// Clamp `date` into `[min, max]` (callers guarantee `min <= max`)
pub fn clamp_date(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    if date < min {
        min
    } else if date > max {
        max
    } else {
        date
    }
}
