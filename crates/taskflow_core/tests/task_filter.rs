use chrono::{NaiveDate, TimeZone, Utc};
use taskflow_core::{
    derive_visible_tasks, DatePreset, DateRange, FilterOptions, NewTask, Priority, Status, Task,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn task(id: &str, title: &str, priority: Priority, due: Option<NaiveDate>) -> Task {
    let mut input = NewTask::titled(title);
    input.priority = priority;
    input.due_date = due;
    Task::from_new(
        id.to_string(),
        input,
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
    )
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

#[test]
fn empty_criteria_keep_everything_in_order() {
    let tasks = vec![
        task("a", "Design wireframe", Priority::High, None),
        task("b", "Backup job", Priority::Low, None),
    ];

    let visible = derive_visible_tasks(&tasks, "   ", &FilterOptions::default());
    assert_eq!(ids(&visible), vec!["a", "b"]);
}

#[test]
fn search_matches_title_case_insensitively() {
    let tasks = vec![
        task("a", "Design wireframe", Priority::High, None),
        task("b", "Backup job", Priority::Low, None),
    ];

    let visible = derive_visible_tasks(&tasks, "design", &FilterOptions::default());
    assert_eq!(ids(&visible), vec!["a"]);

    let visible = derive_visible_tasks(&tasks, "  BACKUP ", &FilterOptions::default());
    assert_eq!(ids(&visible), vec!["b"]);
}

#[test]
fn search_matches_description_and_tags() {
    let mut described = task("a", "Quarterly", Priority::Medium, None);
    described.description = Some("Prepare Invoice summary".to_string());
    let mut tagged = task("b", "Cleanup", Priority::Medium, None);
    tagged.tags = vec!["Invoices".to_string()];
    let other = task("c", "Unrelated", Priority::Medium, None);

    let visible = derive_visible_tasks(
        &[described, tagged, other],
        "invoice",
        &FilterOptions::default(),
    );
    assert_eq!(ids(&visible), vec!["a", "b"]);
}

#[test]
fn priority_filter_with_empty_status_keeps_only_high() {
    let tasks = vec![
        task("a", "one", Priority::High, None),
        task("b", "two", Priority::Medium, None),
        task("c", "three", Priority::High, None),
        task("d", "four", Priority::Low, None),
    ];
    let filters = FilterOptions {
        priority: vec![Priority::High],
        status: Vec::new(),
        ..FilterOptions::default()
    };

    let visible = derive_visible_tasks(&tasks, "", &filters);
    assert_eq!(ids(&visible), vec!["a", "c"]);
}

#[test]
fn status_and_project_filters_combine() {
    let mut first = task("a", "one", Priority::High, None);
    first.project_id = Some("p1".to_string());
    let mut second = task("b", "two", Priority::High, None);
    second.project_id = Some("p1".to_string());
    second.status = Status::Completed;
    let mut third = task("c", "three", Priority::High, None);
    third.project_id = Some("p2".to_string());
    let orphan = task("d", "four", Priority::High, None);

    let filters = FilterOptions {
        status: vec![Status::Pending],
        projects: vec!["p1".to_string()],
        ..FilterOptions::default()
    };

    let visible = derive_visible_tasks(&[first, second, third, orphan], "", &filters);
    assert_eq!(ids(&visible), vec!["a"]);
}

#[test]
fn date_range_is_inclusive_and_drops_undated_tasks() {
    let tasks = vec![
        task("before", "x", Priority::Low, Some(date(2024, 2, 10))),
        task("start", "x", Priority::Low, Some(date(2024, 2, 11))),
        task("end", "x", Priority::Low, Some(date(2024, 2, 17))),
        task("after", "x", Priority::Low, Some(date(2024, 2, 18))),
        task("undated", "x", Priority::Low, None),
    ];
    let filters = FilterOptions {
        date_range: DateRange::for_preset(DatePreset::Week, date(2024, 2, 14)),
        ..FilterOptions::default()
    };

    let visible = derive_visible_tasks(&tasks, "", &filters);
    assert_eq!(ids(&visible), vec!["start", "end"]);
}

#[test]
fn default_month_preset_without_bounds_is_inactive() {
    let tasks = vec![task("undated", "x", Priority::Low, None)];

    let visible = derive_visible_tasks(&tasks, "", &FilterOptions::default());
    assert_eq!(ids(&visible), vec!["undated"]);
}

#[test]
fn half_specified_custom_range_is_inactive() {
    let tasks = vec![
        task("dated", "x", Priority::Low, Some(date(2024, 5, 1))),
        task("undated", "x", Priority::Low, None),
    ];
    let filters = FilterOptions {
        date_range: DateRange::custom(Some(date(2024, 1, 1)), None),
        ..FilterOptions::default()
    };

    let visible = derive_visible_tasks(&tasks, "", &filters);
    assert_eq!(ids(&visible), vec!["dated", "undated"]);
}

#[test]
fn inverted_custom_range_matches_nothing() {
    let tasks = vec![task("dated", "x", Priority::Low, Some(date(2024, 5, 1)))];
    let filters = FilterOptions {
        date_range: DateRange::custom(Some(date(2024, 6, 1)), Some(date(2024, 4, 1))),
        ..FilterOptions::default()
    };

    assert!(derive_visible_tasks(&tasks, "", &filters).is_empty());
}
