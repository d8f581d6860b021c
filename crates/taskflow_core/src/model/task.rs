//! Task record, creation input and partial-update model.
//!
//! # Invariants
//! - `completed == true` iff a toggle last moved the task to `Completed`.
//! - `project_id` and `assigned_to` are weak references; a dangling id is
//!   tolerated and simply matches nothing.

use crate::model::{EntityId, Priority, Status};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_id: Option<EntityId>,
    /// Estimated effort in hours.
    #[serde(default)]
    pub estimated_time: Option<f32>,
    /// Logged effort in hours.
    #[serde(default)]
    pub actual_time: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assigned_to: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a stored task from creation input.
    pub fn from_new(id: EntityId, input: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            priority: input.priority,
            status: input.status,
            due_date: input.due_date,
            project_id: input.project_id,
            estimated_time: input.estimated_time,
            actual_time: input.actual_time,
            tags: input.tags,
            assigned_to: input.assigned_to,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with completion flipped and status realigned.
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let completed = !self.completed;
        Self {
            completed,
            status: if completed {
                Status::Completed
            } else {
                Status::Pending
            },
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Creation input for a task. Id and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<EntityId>,
    pub estimated_time: Option<f32>,
    pub actual_time: Option<f32>,
    pub tags: Vec<String>,
    pub assigned_to: Option<EntityId>,
}

impl NewTask {
    /// Pending, medium-priority task with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            status: Status::Pending,
            due_date: None,
            project_id: None,
            estimated_time: None,
            actual_time: None,
            tags: Vec::new(),
            assigned_to: None,
        }
    }
}

/// Field-wise partial update for a task.
///
/// Clearable fields use a nested option: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<Option<NaiveDate>>,
    pub project_id: Option<Option<EntityId>>,
    pub estimated_time: Option<Option<f32>>,
    pub actual_time: Option<Option<f32>>,
    pub tags: Option<Vec<String>>,
    pub assigned_to: Option<Option<EntityId>>,
}

impl TaskPatch {
    /// Returns a copy of `task` with the patch merged in and `updated_at`
    /// stamped.
    pub fn merged_into(&self, task: &Task, now: DateTime<Utc>) -> Task {
        let mut next = task.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(completed) = self.completed {
            next.completed = completed;
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
        if let Some(project_id) = &self.project_id {
            next.project_id = project_id.clone();
        }
        if let Some(estimated_time) = self.estimated_time {
            next.estimated_time = estimated_time;
        }
        if let Some(actual_time) = self.actual_time {
            next.actual_time = actual_time;
        }
        if let Some(tags) = &self.tags {
            next.tags = tags.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            next.assigned_to = assigned_to.clone();
        }
        next.updated_at = now;
        next
    }
}
