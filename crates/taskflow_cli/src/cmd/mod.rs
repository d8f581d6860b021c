//! Subcommand arguments and handlers.
//!
//! Handlers are generic over the store and clock so they run unchanged
//! against SQLite in the binary and an in-memory store in tests.

pub mod activity;
pub mod calendar;
pub mod filter;
pub mod message;
pub mod project;
pub mod task;
pub mod view;

use chrono::{Datelike, NaiveDate};
use taskflow_core::{DatePreset, Priority, Status, View};

pub(crate) fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority `{value}`; use high, medium or low"))
}

pub(crate) fn parse_status(value: &str) -> Result<Status, String> {
    Status::parse(value).ok_or_else(|| {
        format!("unknown status `{value}`; use pending, in-progress, completed or overdue")
    })
}

pub(crate) fn parse_view(value: &str) -> Result<View, String> {
    View::parse(value).ok_or_else(|| {
        format!(
            "unknown view `{value}`; use dashboard, projects, mytask, calendar, time, reports or settings"
        )
    })
}

pub(crate) fn parse_preset(value: &str) -> Result<DatePreset, String> {
    DatePreset::parse(value)
        .ok_or_else(|| format!("unknown date range `{value}`; use today, week, month or custom"))
}

/// Four-digit years only; dates are persisted and projected into calendar grids.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}` (expected YYYY-MM-DD): {err}"))?;
    if !(1..=9999).contains(&date.year()) {
        return Err(format!("date `{value}` is out of range; use a year from 1 to 9999"));
    }
    Ok(date)
}

/// `YYYY-MM-DD` or `-` when unset.
pub(crate) fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string())
}
