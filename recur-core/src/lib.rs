//! Core types for recur.
//!
//! This crate turns a declarative recurrence (daily, weekly, monthly, yearly
//! with an interval and optional weekday or day-of-month constraints) into the
//! concrete calendar dates it produces:
//! - `calendar`: calendar-day arithmetic with month/year rollover
//! - `recurrence`: the `RecurrenceConfig` value and its pattern types
//! - `engine`: the date-generation walk (`generate`)
//! - `summary`, `month_grid`, `warnings`: presentation helpers for consumers
//! - `spec_file`: TOML spec files

pub mod calendar;
pub mod engine;
pub mod error;
pub mod month_grid;
pub mod recurrence;
pub mod spec_file;
pub mod summary;
pub mod warnings;

pub use engine::{MAX_OCCURRENCES, generate, occurrences};
pub use error::{RecurError, RecurResult};
pub use recurrence::{Frequency, Interval, MonthlyPattern, Pattern, RecurrenceConfig, WeekdaySet};
