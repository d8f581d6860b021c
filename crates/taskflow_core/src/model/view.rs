//! Sidebar navigation targets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Projects,
    #[serde(rename = "mytask")]
    MyTask,
    Calendar,
    Time,
    Reports,
    Settings,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Projects => "projects",
            Self::MyTask => "mytask",
            Self::Calendar => "calendar",
            Self::Time => "time",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "projects" => Some(Self::Projects),
            "mytask" | "tasks" => Some(Self::MyTask),
            "calendar" => Some(Self::Calendar),
            "time" => Some(Self::Time),
            "reports" => Some(Self::Reports),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}
