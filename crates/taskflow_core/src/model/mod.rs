//! Domain model for the dashboard state.
//!
//! # Responsibility
//! - Define the records held by the application state container.
//! - Provide the shared enums (priority, status) used across records.
//!
//! # Invariants
//! - Every record is identified by a string `EntityId`.
//! - Project/task references are weak (by id), never owning.

use serde::{Deserialize, Serialize};

pub mod activity;
pub mod filter;
pub mod message;
pub mod project;
pub mod task;
pub mod user;
pub mod view;

/// Stable identifier for every record in the state container.
pub type EntityId = String;

/// Priority shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses the lowercase wire name; returns `None` for unknown input.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Lifecycle status shared by projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Parses the kebab-case wire name; `in_progress` is accepted as well.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in-progress" | "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}
