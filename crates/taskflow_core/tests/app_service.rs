use chrono::{Duration, NaiveDate, TimeZone, Utc};
use taskflow_core::db::open_db;
use taskflow_core::repo::kv_repo::read_value;
use taskflow_core::{
    AppService, Clock, DatePreset, DateRange, FilterOptions, KeyValueStore, ManualClock,
    MemoryKeyValueStore, MonthDirection, NewMessage, NewTask, Priority, ProjectPatch,
    SqliteKeyValueStore, StateKey, Status, TaskPatch, View,
};

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 14, 9, 0, 0).unwrap())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn service(clock: &ManualClock) -> AppService<MemoryKeyValueStore, &ManualClock> {
    AppService::load(MemoryKeyValueStore::new(), clock, "1").unwrap()
}

#[test]
fn first_load_uses_seed_defaults_without_writing() {
    let clock = clock();
    let service = service(&clock);

    assert_eq!(service.projects().len(), 3);
    assert_eq!(service.tasks().len(), 8);
    assert_eq!(service.users().len(), 5);
    assert_eq!(service.state().notifications, 2);
    assert_eq!(service.state().selected_date, date(2024, 2, 14));
    assert_eq!(service.state().active_view, View::Dashboard);
    assert_eq!(service.visible_tasks().len(), 8);
    assert!(service.store().keys().unwrap().is_empty());
}

#[test]
fn mutations_persist_only_changed_entries() {
    let clock = clock();
    let mut service = service(&clock);

    assert!(service.toggle_task("3").unwrap());

    let mut keys = service.store().keys().unwrap();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            StateKey::ActivityLogs.as_str().to_string(),
            StateKey::Tasks.as_str().to_string(),
        ]
    );
}

#[test]
fn unknown_ids_are_noops_that_touch_nothing() {
    let clock = clock();
    let mut service = service(&clock);
    let before = service.state().clone();

    assert!(!service.toggle_task("missing").unwrap());
    assert!(!service.delete_task("missing").unwrap());
    assert!(!service.mark_message_as_read("missing").unwrap());
    assert!(!service
        .update_project("missing", ProjectPatch::default())
        .unwrap());
    assert!(!service
        .update_task("missing", TaskPatch::default())
        .unwrap());

    assert_eq!(service.state(), &before);
    assert!(service.store().keys().unwrap().is_empty());
}

#[test]
fn deleted_task_ignores_later_operations() {
    let clock = clock();
    let mut service = service(&clock);

    assert!(service.delete_task("5").unwrap());
    let after_delete = service.state().clone();

    assert!(!service.toggle_task("5").unwrap());
    assert!(!service
        .update_task(
            "5",
            TaskPatch {
                title: Some("revived".into()),
                ..TaskPatch::default()
            },
        )
        .unwrap());
    assert!(!service.delete_task("5").unwrap());

    assert_eq!(service.state(), &after_delete);
    assert!(service.find_task("5").is_none());
}

#[test]
fn state_survives_reload_from_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("taskflow.db");
    let clock = clock();

    let task_id = {
        let conn = open_db(&db_path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        let mut service = AppService::load(store, &clock, "2").unwrap();
        let mut input = NewTask::titled("Ship sprint demo");
        input.priority = Priority::High;
        input.due_date = Some(date(2024, 2, 16));
        let id = service.add_task(input).unwrap();
        service.set_active_view(View::Calendar).unwrap();
        service.clear_notifications().unwrap();
        id
    };

    let conn = open_db(&db_path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let service = AppService::load(store, &clock, "2").unwrap();

    let task = service.find_task(&task_id).unwrap();
    assert_eq!(task.title, "Ship sprint demo");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(service.state().active_view, View::Calendar);
    assert_eq!(service.state().notifications, 0);
    let entry = service.activity_logs().last().unwrap();
    assert_eq!(entry.entity_id, task_id);
    assert_eq!(entry.user_id, "2");
}

#[test]
fn add_message_inserts_at_head_and_counts_once() {
    let clock = clock();
    let mut service = service(&clock);
    let notifications = service.state().notifications;

    let id = service
        .add_message(NewMessage::from_self("Standup moved to 10:00"))
        .unwrap();

    assert_eq!(service.messages()[0].id, id);
    assert_eq!(service.messages()[0].body, "Standup moved to 10:00");
    assert_eq!(service.state().notifications, notifications + 1);

    let stored: u32 = read_value(
        service.store(),
        StateKey::Notifications.as_str(),
        0,
    )
    .unwrap();
    assert_eq!(stored, notifications + 1);
}

#[test]
fn unread_and_pending_counts_follow_mutations() {
    let clock = clock();
    let mut service = service(&clock);
    assert_eq!(service.unread_message_count(), 2);
    assert_eq!(service.pending_task_count(), 5);

    service.mark_message_as_read("1").unwrap();
    service.toggle_task("4").unwrap();

    assert_eq!(service.unread_message_count(), 1);
    assert_eq!(service.pending_task_count(), 4);
}

#[test]
fn visible_tasks_follow_search_filters_and_task_changes() {
    let clock = clock();
    let mut service = service(&clock);

    service.set_search_query("design").unwrap();
    let ids: Vec<_> = service.visible_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    let filters = FilterOptions {
        priority: vec![Priority::High],
        ..FilterOptions::default()
    };
    service.apply_filters(filters).unwrap();
    let ids: Vec<_> = service.visible_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);

    service
        .update_task(
            "3",
            TaskPatch {
                priority: Some(Priority::High),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let ids: Vec<_> = service.visible_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    service.set_search_query("").unwrap();
    service.apply_filters(FilterOptions::default()).unwrap();
    assert_eq!(service.visible_tasks().len(), service.tasks().len());
}

#[test]
fn date_range_filter_uses_clock_relative_presets() {
    let clock = clock();
    let mut service = service(&clock);

    let filters = FilterOptions {
        date_range: DateRange::for_preset(DatePreset::Month, date(2024, 2, 14)),
        status: vec![Status::Pending, Status::InProgress],
        ..FilterOptions::default()
    };
    service.apply_filters(filters).unwrap();

    let ids: Vec<_> = service.visible_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
}

#[test]
fn project_update_is_logged_with_actor() {
    let clock = clock();
    let mut service = service(&clock);

    let changed = service
        .update_project(
            "3",
            ProjectPatch {
                completed_tasks: Some(30),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    assert!(changed);
    let project = service.find_project("3").unwrap();
    assert_eq!(project.progress, 100);
    assert_eq!(project.updated_at, clock.now());
    assert_eq!(service.activity_logs().last().unwrap().user_id, service.actor_id());
    assert_eq!(service.actor_id(), "1");
}

#[test]
fn month_navigation_clamps_and_resets() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 31, 8, 0, 0).unwrap());
    let mut service = AppService::load(MemoryKeyValueStore::new(), &clock, "1").unwrap();

    service.navigate_month(MonthDirection::Next).unwrap();
    assert_eq!(service.state().selected_date, date(2024, 2, 29));

    service.navigate_month(MonthDirection::Previous).unwrap();
    assert_eq!(service.state().selected_date, date(2024, 1, 29));

    let grid = service.calendar_month();
    assert_eq!(grid.len(), 42);
    assert!(grid.iter().any(|day| day.is_today && day.date == date(2024, 1, 31)));

    clock.advance(Duration::days(3));
    service.reset_selected_date().unwrap();
    assert_eq!(service.state().selected_date, date(2024, 2, 3));
}

#[test]
fn timers_credit_time_and_stop_on_teardown() {
    let clock = clock();
    let mut service = service(&clock);

    assert!(!service.toggle_timer("missing"));
    assert!(service.toggle_timer("1"));
    assert!(service.timer_active("1"));

    clock.advance(Duration::seconds(90));
    service.tick_timers();
    assert_eq!(service.timer_elapsed("1"), 90);

    clock.advance(Duration::seconds(5));
    assert!(!service.toggle_timer("1"));
    assert_eq!(service.timer_elapsed("1"), 95);

    assert!(service.toggle_timer("2"));
    service.teardown();
    assert!(!service.timer_active("2"));
}

#[test]
fn deleting_a_task_forgets_its_timer() {
    let clock = clock();
    let mut service = service(&clock);

    service.toggle_timer("6");
    clock.advance(Duration::seconds(10));
    service.tick_timers();
    assert!(service.delete_task("6").unwrap());

    assert!(!service.timer_active("6"));
    assert_eq!(service.timer_elapsed("6"), 0);
}
