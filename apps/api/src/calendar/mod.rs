//! Month-grid projection of calendar events.
//!
//! Pure read-side: the grid is recomputed on every request and never
//! mutates the underlying events. Events land in day cells by exact string
//! equality on the normalized `YYYY-MM-DD` key, never by parsed-date
//! comparison.

pub mod handlers;

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::models::syllabus::CalendarEvent;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A visible calendar month. `month` stays in 1..=12; navigation carries
/// into the adjacent year instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month in 1..=12")
    }

    fn days_in_month(&self) -> u32 {
        let next = self.next();
        next.first_day().pred_opt().expect("date within range").day()
    }
}

/// One real day in the grid, carrying the events dated exactly on it.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: String,
    pub events: Vec<CalendarEvent>,
}

/// A Sunday-first month grid. `cells` holds leading `None` padding so day 1
/// aligns under its weekday column, one cell per day, then trailing padding
/// to a full final week; its length is always a multiple of 7.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// Adjacent months for navigation; stepping past December or January
    /// carries into the neighboring year.
    pub prev: YearMonth,
    pub next: YearMonth,
    pub cells: Vec<Option<DayCell>>,
}

/// Picks the initially displayed month: the month of the earliest valid
/// event date, or the current month when there is nothing to show.
pub fn initial_month(events: &[CalendarEvent]) -> YearMonth {
    events
        .iter()
        .filter_map(|e| NaiveDate::parse_from_str(&e.date, "%Y-%m-%d").ok())
        .min()
        .map(YearMonth::from_date)
        .unwrap_or_else(YearMonth::current)
}

/// Projects a flat event list onto one visible month.
pub fn project(events: &[CalendarEvent], visible: YearMonth) -> MonthGrid {
    let mut by_date: HashMap<&str, Vec<CalendarEvent>> = HashMap::new();
    for event in events {
        by_date
            .entry(event.date.as_str())
            .or_default()
            .push(event.clone());
    }

    let leading = visible.first_day().weekday().num_days_from_sunday() as usize;
    let days = visible.days_in_month();

    let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(42);
    cells.resize(leading, None);

    for day in 1..=days {
        let date = format!("{:04}-{:02}-{:02}", visible.year, visible.month, day);
        let events = by_date.remove(date.as_str()).unwrap_or_default();
        cells.push(Some(DayCell { day, date, events }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    MonthGrid {
        year: visible.year,
        month: visible.month,
        label: visible.label(),
        prev: visible.prev(),
        next: visible.next(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::syllabus::EventType;

    fn event(date: &str, title: &str) -> CalendarEvent {
        CalendarEvent {
            date: date.to_string(),
            title: title.to_string(),
            event_type: EventType::Class,
            description: String::new(),
            week: None,
        }
    }

    #[test]
    fn test_grid_length_is_always_a_multiple_of_7() {
        for (year, month) in [(2024, 2), (2024, 9), (2024, 10), (2025, 1), (2025, 6)] {
            let grid = project(&[], YearMonth::new(year, month));
            assert_eq!(grid.cells.len() % 7, 0, "{year}-{month}");
        }
    }

    #[test]
    fn test_real_cells_are_days_1_through_n_in_order() {
        let grid = project(&[], YearMonth::new(2024, 9));
        let days: Vec<u32> = grid.cells.iter().flatten().map(|c| c.day).collect();
        assert_eq!(days, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_leading_padding_aligns_first_day_under_its_weekday() {
        // 2024-10-01 was a Tuesday: two leading empty cells (Sun, Mon).
        let grid = project(&[], YearMonth::new(2024, 10));
        assert!(grid.cells[0].is_none());
        assert!(grid.cells[1].is_none());
        assert_eq!(grid.cells[2].as_ref().unwrap().day, 1);
        // 31 days + 2 leading = 33, padded to 35
        assert_eq!(grid.cells.len(), 35);
    }

    #[test]
    fn test_september_2024_starts_on_sunday_with_no_padding() {
        let grid = project(&[], YearMonth::new(2024, 9));
        assert_eq!(grid.cells[0].as_ref().unwrap().day, 1);
        assert_eq!(grid.cells.len(), 35);
    }

    #[test]
    fn test_leap_february_has_29_cells() {
        let grid = project(&[], YearMonth::new(2024, 2));
        let days: Vec<u32> = grid.cells.iter().flatten().map(|c| c.day).collect();
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn test_events_group_on_their_day_in_insertion_order() {
        let events = vec![
            event("2024-10-15", "Quiz 3"),
            event("2024-10-01", "HW 4 due"),
            event("2024-10-15", "Reading ch. 7"),
        ];
        let grid = project(&events, YearMonth::new(2024, 10));
        let day15 = grid.cells[16].as_ref().unwrap();
        assert_eq!(day15.day, 15);
        assert_eq!(day15.events.len(), 2);
        assert_eq!(day15.events[0].title, "Quiz 3");
        assert_eq!(day15.events[1].title, "Reading ch. 7");
    }

    #[test]
    fn test_events_outside_the_month_do_not_appear() {
        let events = vec![event("2024-11-01", "Next month")];
        let grid = project(&events, YearMonth::new(2024, 10));
        assert!(grid.cells.iter().flatten().all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_initial_month_is_earliest_event_month() {
        let events = vec![
            event("2024-12-10", "Final"),
            event("2024-09-03", "First class"),
            event("2024-10-20", "Midterm"),
        ];
        assert_eq!(initial_month(&events), YearMonth::new(2024, 9));
    }

    #[test]
    fn test_initial_month_defaults_to_current_when_empty() {
        assert_eq!(initial_month(&[]), YearMonth::current());
    }

    #[test]
    fn test_initial_month_ignores_unparseable_dates() {
        let events = vec![event("garbage", "Broken")];
        assert_eq!(initial_month(&events), YearMonth::current());
    }

    #[test]
    fn test_navigation_carries_across_year_boundaries() {
        assert_eq!(YearMonth::new(2024, 1).prev(), YearMonth::new(2023, 12));
        assert_eq!(YearMonth::new(2024, 12).next(), YearMonth::new(2025, 1));
        assert_eq!(YearMonth::new(2024, 6).prev(), YearMonth::new(2024, 5));
        assert_eq!(YearMonth::new(2024, 6).next(), YearMonth::new(2024, 7));
    }

    #[test]
    fn test_grid_carries_adjacent_months_for_navigation() {
        let grid = project(&[], YearMonth::new(2025, 1));
        assert_eq!(grid.prev, YearMonth::new(2024, 12));
        assert_eq!(grid.next, YearMonth::new(2025, 2));
    }

    #[test]
    fn test_label_formats_month_and_year() {
        assert_eq!(YearMonth::new(2024, 9).label(), "September 2024");
    }
}
