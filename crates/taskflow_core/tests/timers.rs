use chrono::{DateTime, Duration, TimeZone, Utc};
use taskflow_core::{format_elapsed, TimerRegistry};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 14, 9, 0, 0).unwrap()
}

#[test]
fn only_one_timer_runs_per_task() {
    let mut timers = TimerRegistry::new();

    assert!(timers.start("1", start()));
    assert!(!timers.start("1", start() + Duration::seconds(3)));
    assert_eq!(timers.active_count(), 1);

    timers.tick(start() + Duration::seconds(10));
    assert_eq!(timers.elapsed("1"), 10);
}

#[test]
fn tick_credits_only_whole_seconds() {
    let mut timers = TimerRegistry::new();
    timers.start("1", start());

    timers.tick(start() + Duration::milliseconds(1_500));
    assert_eq!(timers.elapsed("1"), 1);

    timers.tick(start() + Duration::milliseconds(2_100));
    assert_eq!(timers.elapsed("1"), 2);
}

#[test]
fn pause_keeps_counter_and_resume_continues() {
    let mut timers = TimerRegistry::new();
    timers.start("1", start());

    assert!(timers.pause("1", start() + Duration::seconds(30)));
    assert!(!timers.is_active("1"));
    assert!(!timers.pause("1", start() + Duration::seconds(31)));

    timers.tick(start() + Duration::seconds(100));
    assert_eq!(timers.elapsed("1"), 30);

    assert!(timers.toggle("1", start() + Duration::seconds(100)));
    timers.tick(start() + Duration::seconds(130));
    assert_eq!(timers.elapsed("1"), 60);
    assert_eq!(format_elapsed(timers.elapsed("1")), "1m 0s");
}

#[test]
fn timers_run_independently() {
    let mut timers = TimerRegistry::new();
    timers.start("1", start());
    timers.start("2", start() + Duration::seconds(20));

    timers.tick(start() + Duration::seconds(50));
    assert_eq!(timers.elapsed("1"), 50);
    assert_eq!(timers.elapsed("2"), 30);
}

#[test]
fn cancel_all_stops_every_handle() {
    let mut timers = TimerRegistry::new();
    timers.start("1", start());
    timers.start("2", start());

    assert_eq!(timers.cancel_all(), 2);
    assert_eq!(timers.active_count(), 0);

    timers.tick(start() + Duration::seconds(60));
    assert_eq!(timers.elapsed("1"), 0);
}

#[test]
fn reset_forgets_counter() {
    let mut timers = TimerRegistry::new();
    timers.start("1", start());
    timers.pause("1", start() + Duration::seconds(12));

    timers.reset("1");
    assert_eq!(timers.elapsed("1"), 0);
    assert!(!timers.is_active("1"));
}
