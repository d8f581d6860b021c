//! Calendar projections over the task collection.
//!
//! # Invariants
//! - A month grid holds `GRID_DAYS` consecutive days starting on the
//!   Sunday on or before the first day of the anchor month.
//! - At the edges of the representable date range the grid is clamped to
//!   `NaiveDate::MIN` / `NaiveDate::MAX` instead of panicking.

use crate::model::task::Task;
use crate::model::Priority;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// Six full weeks.
pub const GRID_DAYS: usize = 42;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Builds the month grid for the month containing `anchor`.
pub fn month_grid(tasks: &[Task], anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarDay> {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(lead))
        .unwrap_or(NaiveDate::MIN);

    std::iter::successors(Some(start), |date| date.succ_opt())
        .take(GRID_DAYS)
        .map(|date| CalendarDay {
            date,
            is_current_month: date.month() == first.month() && date.year() == first.year(),
            is_today: date == today,
            tasks: tasks_due_on(tasks, date),
        })
        .collect()
}

/// Tasks whose due date is exactly `date`.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(date))
        .cloned()
        .collect()
}

pub fn priority_counts(tasks: &[Task]) -> PriorityCounts {
    tasks
        .iter()
        .fold(PriorityCounts::default(), |mut counts, task| {
            match task.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
            counts
        })
}

/// Moves `date` by `delta` months, clamping the day to the target month.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}
