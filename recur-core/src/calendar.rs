//! Calendar-day arithmetic.
//!
//! Everything here works on local calendar days (`NaiveDate`), with no
//! time-of-day or timezone involved.
//!
//! Month and year stepping keep the day of month and let any excess roll into
//! the following month, the way a browser `Date` overflows: Jan 31 plus one
//! month is Mar 2 in 2024 and Mar 3 in 2023, and Feb 29 plus one year is
//! Mar 1. Nothing is clamped to the last day of the month.
//!
//! Results outside chrono's representable range saturate at
//! `NaiveDate::MIN`/`NaiveDate::MAX` so the functions stay total.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{RecurError, RecurResult};

/// Shift `date` by `n` calendar days (`n` may be negative).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };

    shifted.unwrap_or(if n >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

pub fn add_weeks(date: NaiveDate, n: i64) -> NaiveDate {
    add_days(date, n.saturating_mul(7))
}

/// Same day of month, `n` months later, rolling over short months.
pub fn add_months(date: NaiveDate, n: i64) -> NaiveDate {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + n;
    let year = total.div_euclid(12);
    // rem_euclid(12) is always in 0..12
    let month = total.rem_euclid(12) as u32 + 1;
    roll_forward(year, month, date.day())
}

/// Same month and day, `n` years later, rolling Feb 29 over to Mar 1.
pub fn add_years(date: NaiveDate, n: i64) -> NaiveDate {
    let year = i64::from(date.year()).saturating_add(n);
    roll_forward(year, date.month(), date.day())
}

/// True when both dates fall on the same calendar day.
///
/// `NaiveDate` carries no time component, so this is plain equality; it is
/// kept as a named operation because the month grid and the summary compare
/// days through it.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Ordinal week of the month the date falls in: `ceil(day / 7)`, 1..=5.
pub fn week_of_month(date: NaiveDate) -> u32 {
    date.day().div_ceil(7)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weekday index with Sunday as 0.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
pub fn weekday_from_index(index: i64) -> RecurResult<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(RecurError::WeekdayOutOfRange(other)),
    }
}

/// Parse a weekday given as a name ("mon", "Monday") or an index ("1").
pub fn parse_weekday(s: &str) -> RecurResult<Weekday> {
    let s = s.trim();
    if let Ok(index) = s.parse::<i64>() {
        return weekday_from_index(index);
    }
    s.parse::<Weekday>()
        .map_err(|_| RecurError::UnknownWeekday(s.to_string()))
}

/// Parse YYYY-MM-DD as a calendar date.
pub fn parse_date(s: &str) -> RecurResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| RecurError::InvalidDate(s.to_string()))
}

/// First of the target month plus `day - 1` days.
fn roll_forward(year: i64, month: u32, day: u32) -> NaiveDate {
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
        .map(|first| add_days(first, i64::from(day) - 1))
        .unwrap_or(if year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}
