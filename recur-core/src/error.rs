//! Error types for recur.
//!
//! Generating dates never fails. These errors come from the edges: reading a
//! spec file, parsing dates and weekday names typed by a user.

use thiserror::Error;

/// Errors that can occur while turning user input into a recurrence config.
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Unknown recurrence type '{0}'. Expected daily, weekly, monthly or yearly")]
    UnknownFrequency(String),

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("Weekday index {0} out of range (0 = Sunday through 6 = Saturday)")]
    WeekdayOutOfRange(i64),

    #[error("Day of month {0} out of range (1-31)")]
    DayOfMonthOutOfRange(i64),

    #[error("Week of month {0} out of range (1-5)")]
    WeekOfMonthOutOfRange(i64),

    #[error("Spec parse error: {0}")]
    SpecParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for recur operations.
pub type RecurResult<T> = Result<T, RecurError>;
