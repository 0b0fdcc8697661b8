//! Recurrence configuration types.
//!
//! A [`RecurrenceConfig`] is an immutable value: consumers build a new one for
//! every edit instead of mutating fields in place. The pattern is a sum type so
//! weekday selections only exist on weekly patterns and monthly sub-patterns
//! only exist on monthly ones.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{week_of_month, weekday_from_index, weekday_index};
use crate::error::{RecurError, RecurResult};

/// Base rule family, without any of the per-pattern options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Singular unit noun used in summaries ("day", "week", ...).
    pub fn unit(&self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
            Frequency::Yearly => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurError;

    fn from_str(s: &str) -> RecurResult<Self> {
        let lower = s.trim().to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| RecurError::UnknownFrequency(s.to_string()))
    }
}

/// Repeat interval ("every N units"). Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Interval(NonZeroU32);

impl Interval {
    pub const ONE: Interval = Interval(NonZeroU32::MIN);

    /// Zero is coerced to 1.
    pub fn new(n: u32) -> Self {
        NonZeroU32::new(n).map(Interval).unwrap_or(Interval::ONE)
    }

    /// Zero and negative values are coerced to 1; huge values saturate.
    pub fn lenient(n: i64) -> Self {
        Interval::new(u32::try_from(n.max(0)).unwrap_or(u32::MAX))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::ONE
    }
}

impl From<u32> for Interval {
    fn from(n: u32) -> Self {
        Interval::new(n)
    }
}

impl From<Interval> for u32 {
    fn from(interval: Interval) -> Self {
        interval.get()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Set of weekdays, serialized as a list of indices with Sunday = 0.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Returns a copy of the set with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        WeekdaySet(self.0 | Self::bit(day))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        (0..7)
            .filter_map(|i| weekday_from_index(i).ok())
            .filter(|day| self.contains(*day))
    }

    pub fn indices(&self) -> Vec<u8> {
        self.iter().map(weekday_index).collect()
    }

    fn bit(day: Weekday) -> u8 {
        1 << weekday_index(day)
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(WeekdaySet::EMPTY, WeekdaySet::with)
    }
}

impl TryFrom<Vec<i64>> for WeekdaySet {
    type Error = RecurError;

    fn try_from(indices: Vec<i64>) -> RecurResult<Self> {
        indices
            .into_iter()
            .map(weekday_from_index)
            .collect::<RecurResult<WeekdaySet>>()
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.indices()
    }
}

/// Which days of a month a monthly pattern lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthlyPattern {
    /// A fixed calendar day, 1..=31.
    DayOfMonth { day: u32 },
    /// The `week`-th occurrence (1..=5) of `day` within the month.
    WeekOfMonth { week: u32, day: Weekday },
}

impl MonthlyPattern {
    pub fn day_of_month(day: i64) -> RecurResult<Self> {
        match u32::try_from(day) {
            Ok(d @ 1..=31) => Ok(MonthlyPattern::DayOfMonth { day: d }),
            _ => Err(RecurError::DayOfMonthOutOfRange(day)),
        }
    }

    pub fn week_of_month(week: i64, day: Weekday) -> RecurResult<Self> {
        match u32::try_from(week) {
            Ok(w @ 1..=5) => Ok(MonthlyPattern::WeekOfMonth { week: w, day }),
            _ => Err(RecurError::WeekOfMonthOutOfRange(week)),
        }
    }

    /// "On day N of the month", taking N from `start`.
    pub fn day_of_month_from(start: NaiveDate) -> Self {
        MonthlyPattern::DayOfMonth { day: start.day() }
    }

    /// "On the Nth weekday of the month", taking both from `start`.
    pub fn week_of_month_from(start: NaiveDate) -> Self {
        MonthlyPattern::WeekOfMonth {
            week: week_of_month(start),
            day: start.weekday(),
        }
    }
}

/// Rule family plus the options that only make sense for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    #[default]
    Daily,
    Weekly {
        selected_days: WeekdaySet,
    },
    Monthly {
        monthly_pattern: Option<MonthlyPattern>,
    },
    Yearly,
}

impl Pattern {
    pub fn frequency(&self) -> Frequency {
        match self {
            Pattern::Daily => Frequency::Daily,
            Pattern::Weekly { .. } => Frequency::Weekly,
            Pattern::Monthly { .. } => Frequency::Monthly,
            Pattern::Yearly => Frequency::Yearly,
        }
    }

    pub fn weekly(days: impl IntoIterator<Item = Weekday>) -> Self {
        Pattern::Weekly {
            selected_days: days.into_iter().collect(),
        }
    }

    pub fn monthly(monthly_pattern: Option<MonthlyPattern>) -> Self {
        Pattern::Monthly { monthly_pattern }
    }
}

/// Declarative input to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceConfig {
    pub pattern: Pattern,
    #[serde(default)]
    pub interval: Interval,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceConfig {
    pub fn new(pattern: Pattern) -> Self {
        RecurrenceConfig {
            pattern,
            ..Default::default()
        }
    }

    pub fn with_pattern(self, pattern: Pattern) -> Self {
        RecurrenceConfig { pattern, ..self }
    }

    pub fn with_interval(self, interval: u32) -> Self {
        RecurrenceConfig {
            interval: Interval::new(interval),
            ..self
        }
    }

    pub fn starting(self, start: NaiveDate) -> Self {
        RecurrenceConfig {
            start_date: Some(start),
            ..self
        }
    }

    pub fn until(self, end: NaiveDate) -> Self {
        RecurrenceConfig {
            end_date: Some(end),
            ..self
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.pattern.frequency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_daily_without_dates() {
        let config = RecurrenceConfig::default();
        assert_eq!(config.pattern, Pattern::Daily);
        assert_eq!(config.interval.get(), 1);
        assert!(config.start_date.is_none());
        assert!(config.end_date.is_none());
    }

    #[test]
    fn interval_never_below_one() {
        assert_eq!(Interval::new(0).get(), 1);
        assert_eq!(Interval::new(3).get(), 3);
        assert_eq!(Interval::lenient(-4).get(), 1);
        assert_eq!(Interval::lenient(0).get(), 1);
        assert_eq!(Interval::lenient(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" yearly ".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!(matches!(
            "fortnightly".parse::<Frequency>(),
            Err(RecurError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn weekday_set_membership() {
        let set = WeekdaySet::EMPTY.with(Weekday::Wed).with(Weekday::Mon);
        assert!(set.contains(Weekday::Mon));
        assert!(!set.contains(Weekday::Sun));
        assert_eq!(set.len(), 2);
        assert_eq!(set.indices(), vec![1, 3]);
        assert!(WeekdaySet::EMPTY.is_empty());
    }

    #[test]
    fn weekday_set_rejects_bad_index() {
        assert!(WeekdaySet::try_from(vec![0, 6]).is_ok());
        assert!(matches!(
            WeekdaySet::try_from(vec![1, 9]),
            Err(RecurError::WeekdayOutOfRange(9))
        ));
    }

    #[test]
    fn monthly_pattern_ranges() {
        assert!(MonthlyPattern::day_of_month(31).is_ok());
        assert!(MonthlyPattern::day_of_month(0).is_err());
        assert!(MonthlyPattern::day_of_month(32).is_err());
        assert!(MonthlyPattern::week_of_month(5, Weekday::Fri).is_ok());
        assert!(MonthlyPattern::week_of_month(6, Weekday::Fri).is_err());
    }

    #[test]
    fn monthly_pattern_from_start_date() {
        // 2024-01-09 is the second Tuesday of January
        let start = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(
            MonthlyPattern::day_of_month_from(start),
            MonthlyPattern::DayOfMonth { day: 9 }
        );
        assert_eq!(
            MonthlyPattern::week_of_month_from(start),
            MonthlyPattern::WeekOfMonth {
                week: 2,
                day: Weekday::Tue
            }
        );
    }

    #[test]
    fn builders_replace_fields() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = RecurrenceConfig::new(Pattern::Yearly)
            .with_interval(0)
            .starting(start);
        assert_eq!(config.frequency(), Frequency::Yearly);
        assert_eq!(config.interval, Interval::ONE);
        assert_eq!(config.start_date, Some(start));

        let weekly = config.with_pattern(Pattern::weekly([Weekday::Fri]));
        assert_eq!(weekly.frequency(), Frequency::Weekly);
        assert_eq!(weekly.start_date, Some(start));
    }

    #[test]
    fn config_serializes_with_tagged_pattern() {
        let config = RecurrenceConfig::new(Pattern::weekly([Weekday::Mon, Weekday::Wed]))
            .starting(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["pattern"]["type"], "weekly");
        assert_eq!(json["pattern"]["selected_days"], serde_json::json!([1, 3]));
        assert_eq!(json["interval"], 1);

        let back: RecurrenceConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
