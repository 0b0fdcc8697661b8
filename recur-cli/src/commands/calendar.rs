use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use recur_core::month_grid::MonthGrid;
use recur_core::{RecurrenceConfig, generate};
use tracing::debug;

use super::print_warnings;
use crate::render::Render;

pub fn run(config: RecurrenceConfig, month: Option<&str>, months: usize) -> Result<()> {
    print_warnings(&config);
    let dates = generate(&config);
    let today = Local::now().date_naive();

    let mut anchor = match month {
        Some(month) => parse_month(month)?,
        None => config.start_date.unwrap_or(today),
    };

    for i in 0..months.max(1) {
        let grid = MonthGrid::new(anchor, &dates, today);
        debug!(month = %grid.first_day(), occurrences = grid.occurrence_count(), "month_rendered");

        if i > 0 {
            println!();
        }
        println!("{}", grid.render());
        anchor = grid.next();
    }

    Ok(())
}

/// Parse "YYYY-MM" into the first day of that month.
fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month \"{}\", expected YYYY-MM", input))
}
