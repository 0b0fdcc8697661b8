//! Non-fatal configuration diagnostics.
//!
//! The engine happily expands any config; these flag the ones that will
//! produce nothing useful so a consumer can tell the user why.

use std::fmt;

use serde::Serialize;

use crate::recurrence::{Pattern, RecurrenceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigWarning {
    StartDateRequired,
    InvalidDateRange,
    NoDaysSelected,
}

impl ConfigWarning {
    pub fn title(&self) -> &'static str {
        match self {
            ConfigWarning::StartDateRequired => "Start Date Required",
            ConfigWarning::InvalidDateRange => "Invalid Date Range",
            ConfigWarning::NoDaysSelected => "No Days Selected",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfigWarning::StartDateRequired => {
                "Select a start date to begin creating your recurrence pattern."
            }
            ConfigWarning::InvalidDateRange => "End date must be after start date.",
            ConfigWarning::NoDaysSelected => {
                "Select at least one day of the week for weekly recurrence."
            }
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

pub fn warnings(config: &RecurrenceConfig) -> Vec<ConfigWarning> {
    let mut found = Vec::new();

    match (config.start_date, config.end_date) {
        (None, _) => found.push(ConfigWarning::StartDateRequired),
        (Some(start), Some(end)) if start > end => found.push(ConfigWarning::InvalidDateRange),
        _ => {}
    }

    if matches!(config.pattern, Pattern::Weekly { selected_days } if selected_days.is_empty()) {
        found.push(ConfigWarning::NoDaysSelected);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_config_needs_start() {
        assert_eq!(
            warnings(&RecurrenceConfig::default()),
            vec![ConfigWarning::StartDateRequired]
        );
    }

    #[test]
    fn valid_config_has_no_warnings() {
        let config = RecurrenceConfig::new(Pattern::weekly([Weekday::Mon]))
            .starting(date(2024, 1, 1))
            .until(date(2024, 1, 1));
        assert!(warnings(&config).is_empty());
    }

    #[test]
    fn reversed_range() {
        let config = RecurrenceConfig::default()
            .starting(date(2024, 2, 1))
            .until(date(2024, 1, 1));
        assert_eq!(warnings(&config), vec![ConfigWarning::InvalidDateRange]);
    }

    #[test]
    fn weekly_without_days() {
        let config = RecurrenceConfig::new(Pattern::weekly([]));
        assert_eq!(
            warnings(&config),
            vec![
                ConfigWarning::StartDateRequired,
                ConfigWarning::NoDaysSelected
            ]
        );
    }

    #[test]
    fn display_combines_title_and_message() {
        assert_eq!(
            ConfigWarning::InvalidDateRange.to_string(),
            "Invalid Date Range: End date must be after start date."
        );
    }
}
