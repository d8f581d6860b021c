//! Activity log model.
//!
//! # Responsibility
//! - Describe audit entries appended by entity mutations.
//! - Enforce the size cap on the in-memory log.
//!
//! # Invariants
//! - Entries are ordered oldest first.
//! - The log never holds more than `ACTIVITY_LOG_CAPACITY` entries; the
//!   oldest entries are evicted first.

use crate::model::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of retained activity entries.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Task,
    Project,
    User,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
    Completed,
    Uncompleted,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Completed => "completed",
            Self::Uncompleted => "uncompleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: EntityId,
    pub action: ActivityAction,
    pub entity_type: EntityType,
    pub entity_id: EntityId,
    /// Actor that triggered the mutation.
    pub user_id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

/// Appends `entry` and evicts from the front until the cap holds.
pub fn push_capped(logs: &mut Vec<ActivityLog>, entry: ActivityLog) {
    logs.push(entry);
    if logs.len() > ACTIVITY_LOG_CAPACITY {
        let overflow = logs.len() - ACTIVITY_LOG_CAPACITY;
        logs.drain(..overflow);
    }
}
