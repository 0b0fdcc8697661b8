//! Recurrence spec files.
//!
//! A spec file is a flat TOML description of a recurrence:
//!
//! ```toml
//! type = "weekly"
//! interval = 1
//! start_date = "2024-01-01"
//! end_date = "2024-03-31"
//! selected_days = [1, 3]          # or ["mon", "wed"]
//!
//! [monthly_pattern]               # only read when type = "monthly"
//! kind = "week_of_month"
//! week = 2
//! day = 2
//! ```
//!
//! Intervals are forgiving: a missing or non-numeric interval becomes 1, and
//! so do zero and negative ones. Everything else is strict. An unknown `type`
//! is a hard error (`RecurError::UnknownFrequency`), never a fallback to
//! daily, and unknown weekdays or out-of-range days are errors too.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use toml::Value;

use crate::calendar::{parse_date, parse_weekday, weekday_from_index};
use crate::error::{RecurError, RecurResult};
use crate::recurrence::{
    Frequency, Interval, MonthlyPattern, Pattern, RecurrenceConfig, WeekdaySet,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSpec {
    #[serde(rename = "type")]
    kind: Option<String>,
    interval: Option<Value>,
    start_date: Option<Value>,
    end_date: Option<Value>,
    selected_days: Vec<Value>,
    monthly_pattern: Option<RawMonthlyPattern>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawMonthlyPattern {
    #[serde(alias = "dayOfMonth")]
    DayOfMonth { day: i64 },
    #[serde(alias = "weekOfMonth")]
    WeekOfMonth { week: i64, day: i64 },
}

/// Parse a spec file's contents.
pub fn parse_spec(text: &str) -> RecurResult<RecurrenceConfig> {
    let raw: RawSpec = toml::from_str(text).map_err(|e| RecurError::SpecParse(e.to_string()))?;
    RecurrenceConfig::try_from(raw)
}

/// Read and parse a spec file.
pub fn load_spec(path: &Path) -> RecurResult<RecurrenceConfig> {
    let text = std::fs::read_to_string(path)?;
    parse_spec(&text)
}

impl TryFrom<RawSpec> for RecurrenceConfig {
    type Error = RecurError;

    fn try_from(raw: RawSpec) -> RecurResult<Self> {
        let frequency = match raw.kind.as_deref() {
            Some(kind) => kind.parse()?,
            None => Frequency::Daily,
        };

        let pattern = match frequency {
            Frequency::Daily => Pattern::Daily,
            Frequency::Weekly => Pattern::Weekly {
                selected_days: weekday_set(&raw.selected_days)?,
            },
            Frequency::Monthly => Pattern::Monthly {
                monthly_pattern: raw.monthly_pattern.map(monthly_pattern).transpose()?,
            },
            Frequency::Yearly => Pattern::Yearly,
        };

        Ok(RecurrenceConfig {
            pattern,
            interval: interval(raw.interval.as_ref()),
            start_date: date("start_date", raw.start_date.as_ref())?,
            end_date: date("end_date", raw.end_date.as_ref())?,
        })
    }
}

fn interval(value: Option<&Value>) -> Interval {
    match value {
        Some(Value::Integer(n)) => Interval::lenient(*n),
        Some(Value::Float(f)) if f.is_finite() => Interval::lenient(f.trunc() as i64),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Interval::lenient)
            .unwrap_or_default(),
        _ => Interval::ONE,
    }
}

fn date(field: &str, value: Option<&Value>) -> RecurResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_date(s).map(Some),
        Some(Value::Datetime(dt)) => dt
            .date
            .and_then(|d| {
                NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
            })
            .map(Some)
            .ok_or_else(|| RecurError::InvalidDate(dt.to_string())),
        Some(other) => Err(RecurError::SpecParse(format!(
            "{field} must be a date, found {}",
            other.type_str()
        ))),
    }
}

fn weekday_set(values: &[Value]) -> RecurResult<WeekdaySet> {
    values
        .iter()
        .map(|value| match value {
            Value::Integer(i) => weekday_from_index(*i),
            Value::String(s) => parse_weekday(s),
            other => Err(RecurError::UnknownWeekday(other.to_string())),
        })
        .collect()
}

fn monthly_pattern(raw: RawMonthlyPattern) -> RecurResult<MonthlyPattern> {
    match raw {
        RawMonthlyPattern::DayOfMonth { day } => MonthlyPattern::day_of_month(day),
        RawMonthlyPattern::WeekOfMonth { week, day } => {
            MonthlyPattern::week_of_month(week, weekday_from_index(day)?)
        }
    }
}
