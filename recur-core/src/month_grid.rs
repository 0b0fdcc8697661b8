//! Month preview grid.
//!
//! Six Sunday-first weeks covering one month, padded with the tail of the
//! previous month and the head of the next one. Each cell knows whether it is
//! an occurrence so a consumer can highlight it.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{add_days, add_months, first_of_month, is_same_day, weekday_index};

/// Column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False for the padding days of the neighbouring months.
    pub in_month: bool,
    /// Only ever true for in-month days.
    pub is_occurrence: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    first: NaiveDate,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub const CELLS: usize = 42;

    /// Build the grid for the month containing `anchor`.
    pub fn new(anchor: NaiveDate, occurrences: &[NaiveDate], today: NaiveDate) -> Self {
        let first = first_of_month(anchor);
        let lead = i64::from(weekday_index(first.weekday()));
        let grid_start = add_days(first, -lead);

        let cells = (0..Self::CELLS as i64)
            .map(|offset| {
                let date = add_days(grid_start, offset);
                let in_month = date.year() == first.year() && date.month() == first.month();
                GridCell {
                    date,
                    in_month,
                    is_occurrence: in_month
                        && occurrences.iter().any(|d| is_same_day(*d, date)),
                    is_today: is_same_day(date, today),
                }
            })
            .collect();

        MonthGrid { first, cells }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// "January 2024"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn occurrence_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occurrence).count()
    }

    /// First day of the previous month, for navigation.
    pub fn prev(&self) -> NaiveDate {
        add_months(self.first, -1)
    }

    /// First day of the next month, for navigation.
    pub fn next(&self) -> NaiveDate {
        add_months(self.first, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_sunday_before_first() {
        // February 2024 starts on a Thursday
        let grid = MonthGrid::new(date(2024, 2, 14), &[], date(2000, 1, 1));
        assert_eq!(grid.cells().len(), MonthGrid::CELLS);
        assert_eq!(grid.first_day(), date(2024, 2, 1));
        assert_eq!(grid.cells()[0].date, date(2024, 1, 28));
        assert_eq!(grid.cells()[0].date.weekday(), Weekday::Sun);
        assert!(!grid.cells()[0].in_month);
        assert!(grid.cells()[4].in_month);
        assert_eq!(grid.cells()[41].date, date(2024, 3, 9));
        assert_eq!(grid.cells().iter().filter(|c| c.in_month).count(), 29);
        assert_eq!(grid.weeks().count(), 6);
    }

    #[test]
    fn month_starting_on_sunday_has_no_lead() {
        // September 2024 starts on a Sunday
        let grid = MonthGrid::new(date(2024, 9, 30), &[], date(2000, 1, 1));
        assert_eq!(grid.cells()[0].date, date(2024, 9, 1));
        assert!(grid.cells()[0].in_month);
    }

    #[test]
    fn occurrences_only_marked_in_month() {
        let occurrences = [date(2024, 1, 30), date(2024, 2, 13), date(2024, 3, 2)];
        let grid = MonthGrid::new(date(2024, 2, 1), &occurrences, date(2000, 1, 1));

        assert_eq!(grid.occurrence_count(), 1);
        let jan_30 = grid.cells().iter().find(|c| c.date == date(2024, 1, 30)).unwrap();
        assert!(!jan_30.is_occurrence);
        let feb_13 = grid.cells().iter().find(|c| c.date == date(2024, 2, 13)).unwrap();
        assert!(feb_13.is_occurrence);
    }

    #[test]
    fn today_is_flagged() {
        let today = date(2024, 2, 20);
        let grid = MonthGrid::new(date(2024, 2, 1), &[], today);
        let flagged: Vec<_> = grid.cells().iter().filter(|c| c.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, today);
    }

    #[test]
    fn navigation_and_title() {
        let grid = MonthGrid::new(date(2024, 1, 31), &[], date(2000, 1, 1));
        assert_eq!(grid.title(), "January 2024");
        assert_eq!(grid.prev(), date(2023, 12, 1));
        assert_eq!(grid.next(), date(2024, 2, 1));
    }
}
