//! Calendar-day arithmetic shared by every layout component.
//!
//! All layout math goes through these helpers. Dates are `NaiveDate`, so
//! there is no time-of-day or offset component to drift across DST changes.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of calendar days from `a` to `b`. Negative when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Shift `date` by `n` calendar days, saturating at the chrono date limits.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    Duration::try_days(n)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if n >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// `start <= date <= end`.
pub fn is_within_inclusive_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date` (28-31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    let next_first = shift_months_to_first(first, 1);
    days_between(first, next_first) as u32
}

/// Index of `date`'s weekday counted from `week_start` (0..=6).
pub fn weekday_index(date: NaiveDate, week_start: Weekday) -> u32 {
    let day = date.weekday().num_days_from_sunday();
    let start = week_start.num_days_from_sunday();
    (day + 7 - start) % 7
}

/// The most recent `week_start` weekday on or before `date`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    add_days(date, -(weekday_index(date, week_start) as i64))
}

/// First day of the month `delta` months away from `date`'s month.
pub fn shift_months_to_first(date: NaiveDate, delta: i32) -> NaiveDate {
    let total_months = date.year() * 12 + (date.month() as i32 - 1) + delta;
    let year = total_months.div_euclid(12);
    let month = total_months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(if delta >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}
