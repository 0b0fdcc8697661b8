//! Recurrence expansion.
//!
//! Walks a cursor from the start date to the horizon. At each stop the pattern
//! decides whether the cursor is an occurrence, then moves the cursor forward.
//! Stepping and filtering are separate: sparse patterns (weekdays, "2nd
//! Tuesday") scan day by day and let the filter pick the matches, dense ones
//! jump straight from occurrence to occurrence.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::{add_days, add_months, add_years, week_of_month};
use crate::recurrence::{Interval, MonthlyPattern, Pattern, RecurrenceConfig};

/// Hard ceiling on the number of dates a single expansion returns.
pub const MAX_OCCURRENCES: usize = 100;

/// Horizon used when the config has no end date, counted from the start date.
pub const DEFAULT_HORIZON_YEARS: i64 = 2;

impl Pattern {
    /// Whether `date` is an occurrence of this pattern.
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            Pattern::Weekly { selected_days } => selected_days.contains(date.weekday()),
            Pattern::Monthly {
                monthly_pattern: Some(MonthlyPattern::DayOfMonth { day }),
            } => date.day() == *day,
            Pattern::Monthly {
                monthly_pattern: Some(MonthlyPattern::WeekOfMonth { week, day }),
            } => week_of_month(date) == *week && date.weekday() == *day,
            Pattern::Daily
            | Pattern::Monthly {
                monthly_pattern: None,
            }
            | Pattern::Yearly => true,
        }
    }

    /// Next cursor position after `date`.
    ///
    /// Weekly patterns scan every day and ignore the interval.
    pub fn step(&self, date: NaiveDate, interval: Interval) -> NaiveDate {
        let n = i64::from(interval.get());
        match self {
            Pattern::Daily => add_days(date, n),
            Pattern::Weekly { .. } => add_days(date, 1),
            Pattern::Monthly {
                monthly_pattern: Some(MonthlyPattern::WeekOfMonth { .. }),
            } => add_days(date, 1),
            Pattern::Monthly { .. } => add_months(date, n),
            Pattern::Yearly => add_years(date, n),
        }
    }
}

/// Inclusive upper bound of the walk: the end date, or start + 2 years.
pub fn horizon(config: &RecurrenceConfig) -> Option<NaiveDate> {
    let start = config.start_date?;
    Some(
        config
            .end_date
            .unwrap_or_else(|| add_years(start, DEFAULT_HORIZON_YEARS)),
    )
}

/// Lazy, uncapped walk over a config's occurrences.
///
/// Bounded by the horizon only; [`generate`] adds the [`MAX_OCCURRENCES`] cap.
#[derive(Debug, Clone)]
pub struct Occurrences {
    pattern: Pattern,
    interval: Interval,
    cursor: Option<NaiveDate>,
    horizon: NaiveDate,
}

impl Occurrences {
    pub fn new(config: &RecurrenceConfig) -> Self {
        let horizon = horizon(config).unwrap_or(NaiveDate::MIN);
        let cursor = config
            .start_date
            .and_then(|start| first_cursor(&config.pattern, start, horizon));

        Occurrences {
            pattern: config.pattern,
            interval: config.interval,
            cursor,
            horizon,
        }
    }

    pub fn horizon(&self) -> NaiveDate {
        self.horizon
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let current = self.cursor.filter(|c| *c <= self.horizon)?;
            let next = self.pattern.step(current, self.interval);
            // Stepping saturates at NaiveDate::MAX; stop instead of spinning there.
            self.cursor = (next > current).then_some(next);

            if self.pattern.includes(current) {
                return Some(current);
            }
        }
    }
}

/// Where the walk begins.
///
/// A day-of-month pattern steps by whole months, so it has to start on a
/// matching day: the cursor is moved forward to the first date on or after
/// `start` whose day of month is the pattern's. Every other pattern starts on
/// `start` itself.
fn first_cursor(pattern: &Pattern, start: NaiveDate, horizon: NaiveDate) -> Option<NaiveDate> {
    let Pattern::Monthly {
        monthly_pattern: Some(MonthlyPattern::DayOfMonth { day }),
    } = pattern
    else {
        return Some(start);
    };

    if !(1..=31).contains(day) {
        return None;
    }

    let mut cursor = start;
    while cursor <= horizon {
        if cursor.day() == *day {
            return Some(cursor);
        }
        let next = add_days(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }
    None
}

/// Iterate the occurrences of `config` without the result cap.
pub fn occurrences(config: &RecurrenceConfig) -> Occurrences {
    Occurrences::new(config)
}

/// Expand `config` into its ordered list of dates.
///
/// Returns at most [`MAX_OCCURRENCES`] dates, all within
/// `[start_date, horizon]`. A config without a start date, or with an end date
/// before its start date, yields an empty list.
pub fn generate(config: &RecurrenceConfig) -> Vec<NaiveDate> {
    let walk = occurrences(config);
    let horizon = walk.horizon();
    let dates: Vec<NaiveDate> = walk.take(MAX_OCCURRENCES).collect();

    debug!(
        frequency = %config.frequency(),
        interval = config.interval.get(),
        start = ?config.start_date,
        %horizon,
        count = dates.len(),
        "recurrence_expanded"
    );

    dates
}
