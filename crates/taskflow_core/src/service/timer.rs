//! Per-task elapsed-time counters.
//!
//! # Responsibility
//! - Track which tasks have a running timer and how many seconds each one
//!   has accumulated.
//! - Credit whole seconds on `tick`, like a once-per-second interval.
//!
//! # Invariants
//! - At most one active handle exists per task id.
//! - Pausing cancels the handle; counters survive until `reset`.
//! - Dropping the registry cancels every remaining handle.

use crate::model::EntityId;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerHandle {
    /// Instant up to which elapsed time has been credited.
    credited_until: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    active: HashMap<EntityId, TimerHandle>,
    elapsed: HashMap<EntityId, u64>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a timer; returns `false` if one is already running for `id`.
    pub fn start(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        if self.active.contains_key(id) {
            return false;
        }
        self.active.insert(
            id.to_string(),
            TimerHandle {
                credited_until: now,
            },
        );
        debug!("event=timer_start module=timer status=ok task_id={id}");
        true
    }

    /// Credits elapsed seconds and cancels the handle.
    ///
    /// Returns `false` when no timer was running for `id`.
    pub fn pause(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(mut handle) = self.active.remove(id) else {
            return false;
        };
        let seconds = credit(&mut handle, now);
        *self.elapsed.entry(id.to_string()).or_default() += seconds;
        debug!(
            "event=timer_pause module=timer status=ok task_id={id} elapsed_s={}",
            self.elapsed(id)
        );
        true
    }

    /// Starts a stopped timer or pauses a running one; returns whether the
    /// timer is running afterwards.
    pub fn toggle(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        if self.is_active(id) {
            self.pause(id, now);
            false
        } else {
            self.start(id, now)
        }
    }

    /// Credits whole elapsed seconds to every running timer.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for (id, handle) in &mut self.active {
            let seconds = credit(handle, now);
            if seconds > 0 {
                *self.elapsed.entry(id.clone()).or_default() += seconds;
            }
        }
    }

    pub fn elapsed(&self, id: &str) -> u64 {
        self.elapsed.get(id).copied().unwrap_or(0)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cancels the handle and forgets the counter for `id`.
    pub fn reset(&mut self, id: &str) {
        self.active.remove(id);
        self.elapsed.remove(id);
    }

    /// Cancels every running handle without crediting partial time.
    ///
    /// Returns the number of handles cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.active.len();
        self.active.clear();
        cancelled
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        let cancelled = self.cancel_all();
        if cancelled > 0 {
            debug!("event=timer_teardown module=timer status=ok cancelled={cancelled}");
        }
    }
}

fn credit(handle: &mut TimerHandle, now: DateTime<Utc>) -> u64 {
    let seconds = (now - handle.credited_until).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    handle.credited_until += Duration::seconds(seconds);
    seconds as u64
}

/// Renders seconds as `"{minutes}m {seconds}s"`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
