//! Core state container for the TaskFlow dashboard.
//! This crate is the single source of truth for dashboard invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::activity::{ActivityAction, ActivityLog, EntityType, ACTIVITY_LOG_CAPACITY};
pub use model::filter::{DatePreset, DateRange, FilterOptions};
pub use model::message::{Message, NewMessage, Sender};
pub use model::project::{Project, ProjectPatch};
pub use model::task::{NewTask, Task, TaskPatch};
pub use model::user::User;
pub use model::view::View;
pub use model::{EntityId, Priority, Status};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::app_service::{AppService, MonthDirection};
pub use service::calendar::{CalendarDay, PriorityCounts};
pub use service::state::{reduce, Action, ActionContext, AppState, StateKey};
pub use service::task_filter::derive_visible_tasks;
pub use service::timer::{format_elapsed, TimerRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
