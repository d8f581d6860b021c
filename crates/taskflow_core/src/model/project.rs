//! Project record and partial-update model.
//!
//! # Invariants
//! - `total_tasks >= 1`.
//! - `progress == round(completed_tasks / total_tasks * 100)`, capped at 100,
//!   whenever either count changes.

use crate::model::{EntityId, Priority, Status};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub company: String,
    /// Short glyph shown next to the project name.
    pub logo: String,
    /// Percentage in `0..=100`, derived from the task counts.
    pub progress: u8,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub priority: Priority,
    pub status: Status,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Re-derives `progress` from the counts, repairing `total_tasks` first.
    pub fn recompute_progress(&mut self) {
        self.total_tasks = self.total_tasks.max(1);
        self.progress = progress_percent(self.completed_tasks, self.total_tasks);
    }
}

/// Computes `round(completed / total * 100)` with half-up rounding.
///
/// A zero total is treated as 1. The result is capped at 100.
pub fn progress_percent(completed: u32, total: u32) -> u8 {
    let total = u64::from(total.max(1));
    let completed = u64::from(completed);
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(100) as u8
}

/// Parses a completed-task count from user input, falling back to 0.
pub fn parse_completed_count(input: &str) -> u32 {
    input.trim().parse().unwrap_or(0)
}

/// Parses a total-task count from user input, falling back to 1.
///
/// Zero is lifted to 1 so the result always satisfies `total_tasks >= 1`.
pub fn parse_total_count(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(1).max(1)
}

/// Field-wise partial update for a project.
///
/// `None` leaves the field untouched. `description` uses a nested option so
/// callers can clear it with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub logo: Option<String>,
    pub completed_tasks: Option<u32>,
    pub total_tasks: Option<u32>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<NaiveDate>,
    pub platforms: Option<Vec<String>>,
    pub team_members: Option<Vec<String>>,
    pub description: Option<Option<String>>,
}

impl ProjectPatch {
    /// Returns a copy of `project` with the patch merged in.
    ///
    /// Progress is recomputed only when a count is part of the patch.
    pub fn merged_into(&self, project: &Project, now: DateTime<Utc>) -> Project {
        let mut next = project.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(company) = &self.company {
            next.company = company.clone();
        }
        if let Some(logo) = &self.logo {
            next.logo = logo.clone();
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(due_date) = self.due_date {
            next.due_date = due_date;
        }
        if let Some(platforms) = &self.platforms {
            next.platforms = platforms.clone();
        }
        if let Some(team_members) = &self.team_members {
            next.team_members = team_members.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }

        let counts_changed = self.completed_tasks.is_some() || self.total_tasks.is_some();
        if let Some(completed) = self.completed_tasks {
            next.completed_tasks = completed;
        }
        if let Some(total) = self.total_tasks {
            next.total_tasks = total;
        }
        if counts_changed {
            next.recompute_progress();
        }

        next.updated_at = now;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_completed_count, parse_total_count, progress_percent};

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percent(18, 24), 75);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(0, 5), 0);
    }

    #[test]
    fn progress_is_capped_and_tolerates_zero_total() {
        assert_eq!(progress_percent(30, 20), 100);
        assert_eq!(progress_percent(1, 0), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn count_parsers_fall_back_to_safe_defaults() {
        assert_eq!(parse_completed_count(" 12 "), 12);
        assert_eq!(parse_completed_count("abc"), 0);
        assert_eq!(parse_completed_count("-3"), 0);
        assert_eq!(parse_total_count(""), 1);
        assert_eq!(parse_total_count("0"), 1);
        assert_eq!(parse_total_count("20"), 20);
    }
}
