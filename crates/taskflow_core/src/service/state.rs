//! Application state, actions and the pure reducer.
//!
//! # Responsibility
//! - Hold every collection and UI scalar of the dashboard in one struct.
//! - Apply `Action`s functionally: `reduce(&state, action, ctx)` returns a
//!   new state and never mutates its input.
//! - Map each state entry to its stable persistence key.
//!
//! # Invariants
//! - Actions on unknown ids return a state equal to the input.
//! - Entity mutations append exactly one activity entry, capped at
//!   `ACTIVITY_LOG_CAPACITY`.
//! - Task/project mutations stamp `updated_at` with `ctx.now`.

use crate::model::activity::{push_capped, ActivityAction, ActivityLog, EntityType};
use crate::model::filter::FilterOptions;
use crate::model::message::{Message, NewMessage};
use crate::model::project::{Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::user::User;
use crate::model::view::View;
use crate::model::EntityId;
use crate::repo::kv_repo::{read_value, write_value, KeyValueStore, RepoResult};
use crate::seed;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stable persistence key for each state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Projects,
    Tasks,
    Messages,
    Users,
    ActivityLogs,
    ActiveView,
    SearchQuery,
    SelectedDate,
    Notifications,
    Filters,
}

impl StateKey {
    pub const ALL: [StateKey; 10] = [
        Self::Projects,
        Self::Tasks,
        Self::Messages,
        Self::Users,
        Self::ActivityLogs,
        Self::ActiveView,
        Self::SearchQuery,
        Self::SelectedDate,
        Self::Notifications,
        Self::Filters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "taskflow-projects",
            Self::Tasks => "taskflow-tasks",
            Self::Messages => "taskflow-messages",
            Self::Users => "taskflow-users",
            Self::ActivityLogs => "taskflow-activity-logs",
            Self::ActiveView => "taskflow-active-view",
            Self::SearchQuery => "taskflow-search",
            Self::SelectedDate => "taskflow-selected-date",
            Self::Notifications => "taskflow-notifications",
            Self::Filters => "taskflow-filters",
        }
    }
}

/// Single source of truth for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    /// Most recent first.
    pub messages: Vec<Message>,
    pub users: Vec<User>,
    /// Oldest first.
    pub activity_logs: Vec<ActivityLog>,
    pub active_view: View,
    pub search_query: String,
    pub selected_date: NaiveDate,
    pub notifications: u32,
    pub filters: FilterOptions,
}

impl AppState {
    /// First-load state built from the seed fixtures.
    pub fn seeded(today: NaiveDate) -> Self {
        Self {
            projects: seed::projects(),
            tasks: seed::tasks(),
            messages: seed::messages(),
            users: seed::users(),
            activity_logs: Vec::new(),
            active_view: View::default(),
            search_query: String::new(),
            selected_date: today,
            notifications: seed::INITIAL_NOTIFICATIONS,
            filters: FilterOptions::default(),
        }
    }

    /// Reads every entry from `store`, using `defaults` for missing keys.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, defaults: AppState) -> RepoResult<Self> {
        Ok(Self {
            projects: read_value(store, StateKey::Projects.as_str(), defaults.projects)?,
            tasks: read_value(store, StateKey::Tasks.as_str(), defaults.tasks)?,
            messages: read_value(store, StateKey::Messages.as_str(), defaults.messages)?,
            users: read_value(store, StateKey::Users.as_str(), defaults.users)?,
            activity_logs: read_value(
                store,
                StateKey::ActivityLogs.as_str(),
                defaults.activity_logs,
            )?,
            active_view: read_value(store, StateKey::ActiveView.as_str(), defaults.active_view)?,
            search_query: read_value(
                store,
                StateKey::SearchQuery.as_str(),
                defaults.search_query,
            )?,
            selected_date: read_value(
                store,
                StateKey::SelectedDate.as_str(),
                defaults.selected_date,
            )?,
            notifications: read_value(
                store,
                StateKey::Notifications.as_str(),
                defaults.notifications,
            )?,
            filters: read_value(store, StateKey::Filters.as_str(), defaults.filters)?,
        })
    }

    /// Writes the entry identified by `key` to `store`.
    pub fn persist_entry<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        key: StateKey,
    ) -> RepoResult<()> {
        let name = key.as_str();
        match key {
            StateKey::Projects => write_value(store, name, &self.projects),
            StateKey::Tasks => write_value(store, name, &self.tasks),
            StateKey::Messages => write_value(store, name, &self.messages),
            StateKey::Users => write_value(store, name, &self.users),
            StateKey::ActivityLogs => write_value(store, name, &self.activity_logs),
            StateKey::ActiveView => write_value(store, name, &self.active_view),
            StateKey::SearchQuery => write_value(store, name, &self.search_query),
            StateKey::SelectedDate => write_value(store, name, &self.selected_date),
            StateKey::Notifications => write_value(store, name, &self.notifications),
            StateKey::Filters => write_value(store, name, &self.filters),
        }
    }

    /// Whether the entry identified by `key` is equal in both states.
    pub fn same_entry(&self, other: &AppState, key: StateKey) -> bool {
        match key {
            StateKey::Projects => self.projects == other.projects,
            StateKey::Tasks => self.tasks == other.tasks,
            StateKey::Messages => self.messages == other.messages,
            StateKey::Users => self.users == other.users,
            StateKey::ActivityLogs => self.activity_logs == other.activity_logs,
            StateKey::ActiveView => self.active_view == other.active_view,
            StateKey::SearchQuery => self.search_query == other.search_query,
            StateKey::SelectedDate => self.selected_date == other.selected_date,
            StateKey::Notifications => self.notifications == other.notifications,
            StateKey::Filters => self.filters == other.filters,
        }
    }
}

/// State mutation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateProject { id: EntityId, patch: ProjectPatch },
    AddTask(NewTask),
    UpdateTask { id: EntityId, patch: TaskPatch },
    DeleteTask { id: EntityId },
    ToggleTask { id: EntityId },
    AddMessage(NewMessage),
    MarkMessageAsRead { id: EntityId },
    ApplyFilters(FilterOptions),
    ClearNotifications,
    SetActiveView(View),
    SetSearchQuery(String),
    SetSelectedDate(NaiveDate),
}

impl Action {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateProject { .. } => "project_update",
            Self::AddTask(_) => "task_create",
            Self::UpdateTask { .. } => "task_update",
            Self::DeleteTask { .. } => "task_delete",
            Self::ToggleTask { .. } => "task_toggle",
            Self::AddMessage(_) => "message_create",
            Self::MarkMessageAsRead { .. } => "message_read",
            Self::ApplyFilters(_) => "filters_apply",
            Self::ClearNotifications => "notifications_clear",
            Self::SetActiveView(_) => "view_set",
            Self::SetSearchQuery(_) => "search_set",
            Self::SetSelectedDate(_) => "date_select",
        }
    }

    /// State entries this action may change.
    pub fn touched_keys(&self) -> &'static [StateKey] {
        match self {
            Self::UpdateProject { .. } => &[StateKey::Projects, StateKey::ActivityLogs],
            Self::AddTask(_)
            | Self::UpdateTask { .. }
            | Self::DeleteTask { .. }
            | Self::ToggleTask { .. } => &[StateKey::Tasks, StateKey::ActivityLogs],
            Self::AddMessage(_) => &[StateKey::Messages, StateKey::Notifications],
            Self::MarkMessageAsRead { .. } => &[StateKey::Messages],
            Self::ApplyFilters(_) => &[StateKey::Filters],
            Self::ClearNotifications => &[StateKey::Notifications],
            Self::SetActiveView(_) => &[StateKey::ActiveView],
            Self::SetSearchQuery(_) => &[StateKey::SearchQuery],
            Self::SetSelectedDate(_) => &[StateKey::SelectedDate],
        }
    }
}

/// Ambient inputs of a reduction.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub now: DateTime<Utc>,
    /// User recorded as the actor in activity entries.
    pub actor_id: &'a str,
}

/// Applies `action` to `state` and returns the resulting state.
pub fn reduce(state: &AppState, action: Action, ctx: &ActionContext<'_>) -> AppState {
    let mut next = state.clone();
    match action {
        Action::UpdateProject { id, patch } => {
            let Some(index) = next.projects.iter().position(|project| project.id == id) else {
                return next;
            };
            let updated = patch.merged_into(&next.projects[index], ctx.now);
            let details = format!("project `{}` updated", updated.name);
            next.projects[index] = updated;
            log_activity(
                &mut next,
                ctx,
                ActivityAction::Updated,
                EntityType::Project,
                id,
                details,
            );
        }
        Action::AddTask(input) => {
            let id = next_entity_id(ctx.now, |candidate| {
                next.tasks.iter().any(|task| task.id == candidate)
            });
            let task = Task::from_new(id.clone(), input, ctx.now);
            let details = format!("task `{}` created", task.title);
            next.tasks.push(task);
            log_activity(
                &mut next,
                ctx,
                ActivityAction::Created,
                EntityType::Task,
                id,
                details,
            );
        }
        Action::UpdateTask { id, patch } => {
            let Some(index) = next.tasks.iter().position(|task| task.id == id) else {
                return next;
            };
            let updated = patch.merged_into(&next.tasks[index], ctx.now);
            let details = format!("task `{}` updated", updated.title);
            next.tasks[index] = updated;
            log_activity(
                &mut next,
                ctx,
                ActivityAction::Updated,
                EntityType::Task,
                id,
                details,
            );
        }
        Action::DeleteTask { id } => {
            let Some(index) = next.tasks.iter().position(|task| task.id == id) else {
                return next;
            };
            let removed = next.tasks.remove(index);
            let details = format!("task `{}` deleted", removed.title);
            log_activity(
                &mut next,
                ctx,
                ActivityAction::Deleted,
                EntityType::Task,
                id,
                details,
            );
        }
        Action::ToggleTask { id } => {
            let Some(index) = next.tasks.iter().position(|task| task.id == id) else {
                return next;
            };
            let toggled = next.tasks[index].toggled(ctx.now);
            let action = if toggled.completed {
                ActivityAction::Completed
            } else {
                ActivityAction::Uncompleted
            };
            let details = format!("task `{}` {}", toggled.title, action.as_str());
            next.tasks[index] = toggled;
            log_activity(&mut next, ctx, action, EntityType::Task, id, details);
        }
        Action::AddMessage(input) => {
            let id = next_entity_id(ctx.now, |candidate| {
                next.messages.iter().any(|message| message.id == candidate)
            });
            next.messages.insert(0, Message::from_new(id, input, ctx.now));
            next.notifications = next.notifications.saturating_add(1);
        }
        Action::MarkMessageAsRead { id } => {
            if let Some(message) = next.messages.iter_mut().find(|message| message.id == id) {
                message.unread = false;
            }
        }
        Action::ApplyFilters(filters) => next.filters = filters,
        Action::ClearNotifications => next.notifications = 0,
        Action::SetActiveView(view) => next.active_view = view,
        Action::SetSearchQuery(query) => next.search_query = query,
        Action::SetSelectedDate(date) => next.selected_date = date,
    }
    next
}

/// Returns an id derived from the creation instant (epoch milliseconds),
/// bumped until `is_taken` rejects it no longer.
pub fn next_entity_id(now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> EntityId {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !is_taken(&id) {
            return id;
        }
        candidate += 1;
    }
}

fn log_activity(
    state: &mut AppState,
    ctx: &ActionContext<'_>,
    action: ActivityAction,
    entity_type: EntityType,
    entity_id: EntityId,
    details: String,
) {
    let id = next_entity_id(ctx.now, |candidate| {
        state.activity_logs.iter().any(|entry| entry.id == candidate)
    });
    push_capped(
        &mut state.activity_logs,
        ActivityLog {
            id,
            action,
            entity_type,
            entity_id,
            user_id: ctx.actor_id.to_string(),
            timestamp: ctx.now,
            details,
        },
    );
}
