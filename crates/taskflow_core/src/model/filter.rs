//! Filter criteria for the visible task list.
//!
//! # Responsibility
//! - Hold the accepted status/priority/project sets and the date range.
//! - Resolve named date presets into concrete inclusive bounds.
//!
//! # Invariants
//! - A date range only filters when both `start` and `end` are set.
//! - A `custom` range stays unbounded until both dates are supplied.

use crate::model::{EntityId, Priority, Status};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePreset {
    Today,
    Week,
    Month,
    Custom,
}

impl DatePreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Custom => "custom",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub preset: Option<DatePreset>,
}

impl DateRange {
    /// Resolves a named preset relative to `today`.
    ///
    /// `Custom` resolves to an unbounded custom range; use
    /// [`DateRange::custom`] once both dates are known.
    pub fn for_preset(preset: DatePreset, today: NaiveDate) -> Self {
        let bounds = match preset {
            DatePreset::Today => Some((today, today)),
            DatePreset::Week => {
                let back = u64::from(today.weekday().num_days_from_sunday());
                let start = today
                    .checked_sub_days(Days::new(back))
                    .unwrap_or(NaiveDate::MIN);
                let end = start
                    .checked_add_days(Days::new(6))
                    .unwrap_or(NaiveDate::MAX);
                Some((start, end))
            }
            DatePreset::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                Some((start, end))
            }
            DatePreset::Custom => None,
        };

        Self {
            start: bounds.map(|(start, _)| start),
            end: bounds.map(|(_, end)| end),
            preset: Some(preset),
        }
    }

    /// Builds a custom range; bounds are applied only when both are given.
    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Self {
                start: Some(start),
                end: Some(end),
                preset: Some(DatePreset::Custom),
            },
            _ => Self {
                start: None,
                end: None,
                preset: Some(DatePreset::Custom),
            },
        }
    }

    /// Returns the inclusive bounds when the range is active.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub status: Vec<Status>,
    #[serde(default)]
    pub priority: Vec<Priority>,
    #[serde(default)]
    pub projects: Vec<EntityId>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl Default for FilterOptions {
    /// No criteria and an unbounded `month` preset, the state after
    /// "clear all".
    fn default() -> Self {
        Self {
            status: Vec::new(),
            priority: Vec::new(),
            projects: Vec::new(),
            date_range: DateRange {
                start: None,
                end: None,
                preset: Some(DatePreset::Month),
            },
        }
    }
}

impl FilterOptions {
    /// Number of selected set criteria, shown as a badge count.
    ///
    /// The date range is not counted.
    pub fn active_count(&self) -> usize {
        self.status.len() + self.priority.len() + self.projects.len()
    }

    /// Adds `value` when absent, removes it when present.
    pub fn toggle_status(&mut self, value: Status) {
        toggle_member(&mut self.status, value);
    }

    pub fn toggle_priority(&mut self, value: Priority) {
        toggle_member(&mut self.priority, value);
    }

    pub fn toggle_project(&mut self, value: EntityId) {
        toggle_member(&mut self.projects, value);
    }
}

fn toggle_member<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(index) = values.iter().position(|existing| *existing == value) {
        values.remove(index);
    } else {
        values.push(value);
    }
}
