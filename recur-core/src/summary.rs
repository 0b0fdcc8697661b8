//! Human-readable descriptions of a recurrence and its upcoming dates.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::recurrence::{MonthlyPattern, Pattern, RecurrenceConfig};

/// How many upcoming dates a summary lists by default.
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// strftime pattern behind [`format_date`].
pub const DEFAULT_DATE_FORMAT: &str = "%a, %b %-d, %Y";

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st, ...
pub fn ordinal(n: u32) -> String {
    if n == 0 {
        return n.to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Long form used in occurrence lists, e.g. "Mon, Jan 1, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Compact form used inside summary sentences, e.g. "1/9/2024".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// "Every 2 weeks on Monday, Wednesday starting 1/1/2024 until 3/1/2024"
pub fn describe(config: &RecurrenceConfig) -> String {
    let Some(start) = config.start_date else {
        return "No recurrence configured".to_string();
    };

    let interval = config.interval.get();
    let unit = config.frequency().unit();
    let every = if interval == 1 {
        format!("Every {unit}")
    } else {
        format!("Every {interval} {unit}s")
    };

    let detail = match &config.pattern {
        Pattern::Daily | Pattern::Yearly => None,
        Pattern::Weekly { selected_days } if selected_days.is_empty() => {
            Some("on selected days".to_string())
        }
        Pattern::Weekly { selected_days } => {
            let names: Vec<&str> = selected_days.iter().map(weekday_name).collect();
            Some(format!("on {}", names.join(", ")))
        }
        Pattern::Monthly { monthly_pattern } => monthly_pattern.map(|p| match p {
            MonthlyPattern::DayOfMonth { day } => format!("on day {day}"),
            MonthlyPattern::WeekOfMonth { week, day } => {
                format!("on the {} {}", ordinal(week), weekday_name(day))
            }
        }),
    };

    let mut text = every;
    if let Some(detail) = detail {
        text.push(' ');
        text.push_str(&detail);
    }
    text.push_str(&format!(" starting {}", short_date(start)));
    if let Some(end) = config.end_date {
        text.push_str(&format!(" until {}", short_date(end)));
    }
    text
}

/// Everything a consumer needs to show under a recurrence editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub text: String,
    pub count: usize,
    pub next: Option<NaiveDate>,
    pub upcoming: Vec<NaiveDate>,
}

impl Summary {
    /// Summarize `dates`, which should be the expansion of `config`.
    pub fn new(config: &RecurrenceConfig, dates: &[NaiveDate], preview_count: usize) -> Self {
        Summary {
            text: describe(config),
            count: dates.len(),
            next: dates.first().copied(),
            upcoming: dates.iter().take(preview_count).copied().collect(),
        }
    }
}
