//! Terminal rendering for recur-core types.
//!
//! Extension traits that add colored output to core types using owo_colors.
//! Colors are dropped automatically when the stream is not a terminal.

use std::fmt::Write;

use chrono::NaiveDate;
use owo_colors::{OwoColorize, Stream, Style};
use recur_core::month_grid::{GridCell, MonthGrid, WEEKDAY_HEADERS};
use recur_core::summary::{Summary, format_date};
use recur_core::warnings::ConfigWarning;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn paint(text: &str, style: Style, stream: Stream) -> String {
    text.if_supports_color(stream, |t| t.style(style)).to_string()
}

fn cell(cell: &GridCell) -> String {
    let day = cell.date.format("%-d").to_string();
    let text = if cell.is_occurrence {
        format!("[{:>2}]", day)
    } else if cell.is_today {
        format!("({:>2})", day)
    } else {
        format!(" {:>2} ", day)
    };

    let style = if !cell.in_month {
        Style::new().dimmed()
    } else if cell.is_occurrence {
        Style::new().green().bold()
    } else if cell.is_today {
        Style::new().cyan()
    } else {
        Style::new()
    };

    paint(&text, style, Stream::Stdout)
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(8);

        lines.push(paint(&self.title(), Style::new().bold(), Stream::Stdout));

        let headers: String = WEEKDAY_HEADERS.iter().map(|h| format!(" {:>2} ", h)).collect();
        lines.push(paint(&headers, Style::new().dimmed(), Stream::Stdout));

        for week in self.weeks() {
            lines.push(week.iter().map(cell).collect());
        }

        lines.join("\n")
    }
}

impl Render for ConfigWarning {
    fn render(&self) -> String {
        paint(&format!("⚠ {}", self), Style::new().yellow(), Stream::Stderr)
    }
}

/// The summary block: description, count, next date and a short preview.
pub fn render_summary(summary: &Summary, date_format: &str) -> String {
    let mut lines = vec![paint(&summary.text, Style::new().bold(), Stream::Stdout)];

    let Some(next) = summary.next else {
        lines.push(paint("No upcoming occurrences", Style::new().dimmed(), Stream::Stdout));
        return lines.join("\n");
    };

    lines.push(format!(
        "{} upcoming {}",
        summary.count,
        pluralize("occurrence", summary.count)
    ));
    lines.push(format!("Next: {}", display_date(next, date_format)));

    if summary.count > 1 {
        lines.push(String::new());
        lines.push(format!("Next {} occurrences:", summary.upcoming.len()));
        lines.extend(summary.upcoming.iter().map(|d| {
            let date = display_date(*d, date_format);
            format!("   {}", paint(&date, Style::new().dimmed(), Stream::Stdout))
        }));
    }

    lines.join("\n")
}

/// One date per line in `date_format`.
pub fn render_date_list(dates: &[NaiveDate], date_format: &str) -> String {
    dates
        .iter()
        .map(|d| display_date(*d, date_format))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format with `date_format`, or the default long form if chrono rejects it.
fn display_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(date_format)) {
        Ok(()) => out,
        Err(_) => format_date(date),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recur_core::summary::DEFAULT_PREVIEW_COUNT;
    use recur_core::{Pattern, RecurrenceConfig, generate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn no_color() {
        owo_colors::set_override(false);
    }

    #[test]
    fn grid_marks_occurrences_and_today() {
        no_color();
        let occurrences = [date(2024, 1, 9)];
        let grid = MonthGrid::new(date(2024, 1, 1), &occurrences, date(2024, 1, 20));
        let out = grid.render();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "January 2024");
        assert_eq!(lines[1], " Su  Mo  Tu  We  Th  Fr  Sa ");
        // January 2024 starts on a Monday: one padding day from December.
        assert_eq!(lines[2], " 31   1   2   3   4   5   6 ");
        assert!(lines[3].contains("[ 9]"));
        assert!(lines[4].contains("(20)"));
    }

    #[test]
    fn summary_lists_upcoming_dates() {
        no_color();
        let config = RecurrenceConfig::new(Pattern::Daily)
            .starting(date(2024, 1, 1))
            .until(date(2024, 1, 10));
        let dates = generate(&config);
        let summary = Summary::new(&config, &dates, DEFAULT_PREVIEW_COUNT);

        let out = render_summary(&summary, "%Y-%m-%d");
        assert!(out.contains("10 upcoming occurrences"));
        assert!(out.contains("Next: 2024-01-01"));
        assert!(out.contains("Next 5 occurrences:"));
        assert!(out.contains("2024-01-05"));
        assert!(!out.contains("2024-01-06"));
    }

    #[test]
    fn single_occurrence_has_no_preview() {
        no_color();
        let config = RecurrenceConfig::new(Pattern::Yearly)
            .starting(date(2024, 1, 1))
            .until(date(2024, 6, 1));
        let dates = generate(&config);
        let out = render_summary(&Summary::new(&config, &dates, 5), "%Y-%m-%d");

        assert!(out.contains("1 upcoming occurrence"));
        assert!(!out.contains("occurrences:"));
    }

    #[test]
    fn empty_summary() {
        no_color();
        let config = RecurrenceConfig::new(Pattern::Daily);
        let out = render_summary(&Summary::new(&config, &[], 5), "%Y-%m-%d");
        assert!(out.contains("No upcoming occurrences"));
    }

    #[test]
    fn warning_includes_title_and_message() {
        no_color();
        let out = ConfigWarning::NoDaysSelected.render();
        assert!(out.contains(ConfigWarning::NoDaysSelected.title()));
        assert!(out.contains(ConfigWarning::NoDaysSelected.message()));
    }

    #[test]
    fn unsupported_format_falls_back_to_long_form() {
        let dates = [date(2024, 1, 1)];
        assert_eq!(render_date_list(&dates, "%Q"), "Mon, Jan 1, 2024");
    }

    #[test]
    fn date_list_uses_format() {
        let dates = [date(2024, 1, 1), date(2024, 1, 2)];
        assert_eq!(render_date_list(&dates, "%-m/%-d"), "1/1\n1/2");
    }
}
