use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
use taskflow_core::service::calendar::{
    month_grid, priority_counts, shift_month, tasks_due_on, GRID_DAYS,
};
use taskflow_core::{AppService, ManualClock, MemoryKeyValueStore, NewTask, Priority, Task};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn due_task(id: &str, priority: Priority, due: NaiveDate) -> Task {
    let mut input = NewTask::titled(format!("task {id}"));
    input.priority = priority;
    input.due_date = Some(due);
    Task::from_new(
        id.to_string(),
        input,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}

#[test]
fn grid_starts_on_sunday_and_spans_six_weeks() {
    let grid = month_grid(&[], date(2024, 2, 14), date(2024, 2, 14));

    assert_eq!(grid.len(), GRID_DAYS);
    assert_eq!(grid[0].date, date(2024, 1, 28));
    assert_eq!(grid[0].date.weekday(), Weekday::Sun);
    assert_eq!(grid[GRID_DAYS - 1].date, date(2024, 3, 9));
    assert!(!grid[0].is_current_month);
    assert!(grid[4].is_current_month);
    assert_eq!(grid.iter().filter(|day| day.is_current_month).count(), 29);
    assert_eq!(grid.iter().filter(|day| day.is_today).count(), 1);
}

#[test]
fn month_starting_on_sunday_has_no_leading_days() {
    let grid = month_grid(&[], date(2024, 9, 20), date(2020, 1, 1));

    assert_eq!(grid[0].date, date(2024, 9, 1));
    assert!(grid.iter().all(|day| !day.is_today));
}

#[test]
fn days_carry_their_due_tasks() {
    let tasks = vec![
        due_task("a", Priority::High, date(2024, 2, 14)),
        due_task("b", Priority::Low, date(2024, 2, 14)),
        due_task("c", Priority::Medium, date(2024, 2, 15)),
    ];

    let grid = month_grid(&tasks, date(2024, 2, 1), date(2024, 2, 14));
    let today = grid.iter().find(|day| day.is_today).unwrap();
    let ids: Vec<_> = today.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    assert_eq!(tasks_due_on(&tasks, date(2024, 2, 15)).len(), 1);
    assert!(tasks_due_on(&tasks, date(2024, 2, 16)).is_empty());
}

#[test]
fn priority_counts_tally_each_level() {
    let tasks = vec![
        due_task("a", Priority::High, date(2024, 2, 14)),
        due_task("b", Priority::High, date(2024, 2, 14)),
        due_task("c", Priority::Low, date(2024, 2, 14)),
    ];

    let counts = priority_counts(&tasks);
    assert_eq!((counts.high, counts.medium, counts.low), (2, 0, 1));
}

#[test]
fn shift_month_clamps_day_and_crosses_years() {
    assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(shift_month(date(2023, 3, 31), -1), date(2023, 2, 28));
    assert_eq!(shift_month(date(2024, 12, 15), 1), date(2025, 1, 15));
    assert_eq!(shift_month(date(2024, 1, 15), -1), date(2023, 12, 15));
    assert_eq!(shift_month(date(2024, 5, 5), 0), date(2024, 5, 5));
}

#[test]
fn grid_clamps_at_the_edges_of_the_date_range() {
    let earliest = month_grid(&[], NaiveDate::MIN, date(2024, 2, 14));
    assert_eq!(earliest[0].date, NaiveDate::MIN);
    assert_eq!(earliest.len(), GRID_DAYS);

    let latest = month_grid(&[], NaiveDate::MAX, date(2024, 2, 14));
    assert!(!latest.is_empty());
    assert_eq!(latest.last().unwrap().date, NaiveDate::MAX);
    assert!(latest.iter().all(|day| day.date <= NaiveDate::MAX));
}

#[test]
fn service_calendar_survives_extreme_selected_dates() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 14, 9, 0, 0).unwrap());
    let mut service = AppService::load(MemoryKeyValueStore::new(), &clock, "1").unwrap();

    service.set_selected_date(NaiveDate::MIN).unwrap();
    assert_eq!(service.calendar_month()[0].date, NaiveDate::MIN);

    service.set_selected_date(NaiveDate::MAX).unwrap();
    assert_eq!(service.calendar_month().last().unwrap().date, NaiveDate::MAX);
}
