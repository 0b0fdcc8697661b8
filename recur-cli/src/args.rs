//! Pattern flags shared by every subcommand, and their conversion into a
//! `RecurrenceConfig`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Month, NaiveDate, Weekday};
use clap::Args;
use recur_core::calendar::{parse_date, parse_weekday};
use recur_core::spec_file::load_spec;
use recur_core::summary::weekday_name;
use recur_core::{Frequency, Interval, MonthlyPattern, Pattern, RecurrenceConfig, WeekdaySet};

use crate::recur_config::RecurConfig;

#[derive(Args, Debug, Clone)]
pub struct PatternArgs {
    /// Read the recurrence from a TOML spec file (other flags override it)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Recurrence type: daily, weekly, monthly or yearly
    #[arg(short = 't', long = "type", value_parser = parse_frequency)]
    pub frequency: Option<Frequency>,

    /// Repeat every N units (values below 1 count as 1)
    #[arg(short, long, allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// First date (YYYY-MM-DD, or e.g. "tomorrow", "next monday", "march 20")
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date, inclusive (defaults to two years after the start)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Weekdays for weekly patterns, e.g. "mon,wed" or "1,3" (0 = Sunday)
    #[arg(short, long, value_delimiter = ',')]
    pub days: Vec<String>,

    /// Monthly: on this day of the month
    #[arg(long, conflicts_with_all = ["week_of_month", "nth_weekday"])]
    pub day_of_month: Option<i64>,

    /// Monthly: on the Nth (1-5) --weekday of the month
    #[arg(long, requires = "weekday", conflicts_with = "nth_weekday")]
    pub week_of_month: Option<i64>,

    /// Weekday used with --week-of-month
    #[arg(long, requires = "week_of_month")]
    pub weekday: Option<String>,

    /// Monthly: on the same weekday-of-month as the start date (e.g. 2nd Tuesday)
    #[arg(long)]
    pub nth_weekday: bool,
}

fn parse_frequency(s: &str) -> Result<Frequency, String> {
    s.parse().map_err(|e: recur_core::RecurError| e.to_string())
}

impl PatternArgs {
    /// Build the config: spec file first (if any), then flags on top.
    pub fn into_config(self, settings: &RecurConfig) -> Result<RecurrenceConfig> {
        let base = match &self.file {
            Some(path) => {
                let path = settings.resolve_spec_path(path);
                load_spec(&path)
                    .with_context(|| format!("Could not load spec file {}", path.display()))?
            }
            None => RecurrenceConfig::default(),
        };

        let start_date = match self.start.as_deref() {
            Some(s) => Some(parse_date_input(s)?),
            None => base.start_date,
        };
        let end_date = match self.end.as_deref() {
            Some(s) => Some(parse_date_input(s)?),
            None => base.end_date,
        };
        let interval = self.interval.map(Interval::lenient).unwrap_or(base.interval);

        let frequency = self.frequency.unwrap_or_else(|| base.frequency());
        let pattern = match frequency {
            Frequency::Daily => Pattern::Daily,
            Frequency::Yearly => Pattern::Yearly,
            Frequency::Weekly => Pattern::Weekly {
                selected_days: self.weekdays(&base)?,
            },
            Frequency::Monthly => Pattern::Monthly {
                monthly_pattern: self.monthly_pattern(&base, start_date)?,
            },
        };

        Ok(RecurrenceConfig {
            pattern,
            interval,
            start_date,
            end_date,
        })
    }

    fn weekdays(&self, base: &RecurrenceConfig) -> Result<WeekdaySet> {
        if self.days.is_empty() {
            return Ok(match base.pattern {
                Pattern::Weekly { selected_days } => selected_days,
                _ => WeekdaySet::EMPTY,
            });
        }

        let mut set = WeekdaySet::EMPTY;
        for day in &self.days {
            set = set.with(parse_weekday(day)?);
        }
        Ok(set)
    }

    fn monthly_pattern(
        &self,
        base: &RecurrenceConfig,
        start: Option<NaiveDate>,
    ) -> Result<Option<MonthlyPattern>> {
        if let Some(day) = self.day_of_month {
            return Ok(Some(MonthlyPattern::day_of_month(day)?));
        }
        if let (Some(week), Some(weekday)) = (self.week_of_month, self.weekday.as_deref()) {
            return Ok(Some(MonthlyPattern::week_of_month(
                week,
                parse_weekday(weekday)?,
            )?));
        }
        if self.nth_weekday {
            let start = start.context("--nth-weekday needs a start date")?;
            return Ok(Some(MonthlyPattern::week_of_month_from(start)));
        }

        Ok(match base.pattern {
            Pattern::Monthly { monthly_pattern } => monthly_pattern,
            _ => None,
        })
    }
}

/// Parse a date typed by the user: strict YYYY-MM-DD first, then natural
/// language ("tomorrow", "next friday", "march 20").
pub fn parse_date_input(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}

/// Expand abbreviated weekday and month names ("fri", "thurs", "sept"),
/// which fuzzydate only understands spelled out.
fn expand_abbreviations(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| expand_word(word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A word is expanded when its first three letters name a weekday or month
/// and the whole word is a prefix of that name.
fn expand_word(word: String) -> String {
    let Some(head) = word.get(..3) else {
        return word;
    };

    let full = head
        .parse::<Weekday>()
        .map(|day| weekday_name(day).to_lowercase())
        .or_else(|_| head.parse::<Month>().map(|month| month.name().to_lowercase()));

    match full {
        Ok(full) if full.starts_with(&word) => full,
        _ => word,
    }
}
