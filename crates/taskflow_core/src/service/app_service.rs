//! Application state container.
//!
//! # Responsibility
//! - Own the current `AppState`, the key-value store and the clock.
//! - Route every mutation through the pure reducer, persist the entries it
//!   changed and keep the visible-task view current.
//! - Own the per-task timers for the lifetime of the container.
//!
//! # Invariants
//! - In-memory state only advances after every changed entry was written.
//! - Operations on unknown ids leave state and storage untouched.
//! - `visible_tasks` always equals `derive_visible_tasks` over the current
//!   tasks, search query and filters.

use crate::clock::Clock;
use crate::model::activity::ActivityLog;
use crate::model::filter::FilterOptions;
use crate::model::message::{Message, NewMessage};
use crate::model::project::{Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::user::User;
use crate::model::view::View;
use crate::model::EntityId;
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::service::calendar::{month_grid, shift_month, tasks_due_on, CalendarDay};
use crate::service::state::{reduce, Action, ActionContext, AppState, StateKey};
use crate::service::task_filter::derive_visible_tasks;
use crate::service::timer::TimerRegistry;
use chrono::NaiveDate;
use log::{debug, info};

/// Direction for calendar month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDirection {
    Previous,
    Next,
}

/// State container facade over a key-value store.
pub struct AppService<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    actor_id: EntityId,
    state: AppState,
    visible_tasks: Vec<Task>,
    timers: TimerRegistry,
}

impl<S: KeyValueStore, C: Clock> AppService<S, C> {
    /// Loads state from `store`, falling back to seed data for missing keys.
    ///
    /// `actor_id` is recorded as the user of every activity entry.
    pub fn load(store: S, clock: C, actor_id: impl Into<EntityId>) -> RepoResult<Self> {
        let defaults = AppState::seeded(clock.today());
        let state = AppState::load(&store, defaults)?;
        Ok(Self::with_state(store, clock, actor_id, state))
    }

    /// Builds a container around an explicit state without reading `store`.
    pub fn with_state(store: S, clock: C, actor_id: impl Into<EntityId>, state: AppState) -> Self {
        let visible_tasks = derive_visible_tasks(&state.tasks, &state.search_query, &state.filters);
        let actor_id = actor_id.into();
        info!(
            "event=state_load module=service status=ok actor={} projects={} tasks={} messages={}",
            actor_id,
            state.projects.len(),
            state.tasks.len(),
            state.messages.len()
        );
        Self {
            store,
            clock,
            actor_id,
            state,
            visible_tasks,
            timers: TimerRegistry::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    /// Current date according to the injected clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Applies `action`; returns whether any state entry changed.
    pub fn dispatch(&mut self, action: Action) -> RepoResult<bool> {
        let name = action.name();
        let touched = action.touched_keys();
        let ctx = ActionContext {
            now: self.clock.now(),
            actor_id: &self.actor_id,
        };
        let next = reduce(&self.state, action, &ctx);

        let changed: Vec<StateKey> = touched
            .iter()
            .copied()
            .filter(|key| !self.state.same_entry(&next, *key))
            .collect();
        if changed.is_empty() {
            debug!("event={name} module=service status=noop");
            return Ok(false);
        }

        for key in &changed {
            next.persist_entry(&self.store, *key)?;
        }

        let refresh_view = changed.iter().any(|key| {
            matches!(
                key,
                StateKey::Tasks | StateKey::SearchQuery | StateKey::Filters
            )
        });
        self.state = next;
        if refresh_view {
            self.visible_tasks = derive_visible_tasks(
                &self.state.tasks,
                &self.state.search_query,
                &self.state.filters,
            );
        }

        info!(
            "event={} module=service status=ok keys={}",
            name,
            changed
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(",")
        );
        Ok(true)
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> RepoResult<bool> {
        self.dispatch(Action::UpdateProject {
            id: id.to_string(),
            patch,
        })
    }

    /// Creates a task and returns its id.
    pub fn add_task(&mut self, task: NewTask) -> RepoResult<EntityId> {
        let before = self.state.tasks.len();
        self.dispatch(Action::AddTask(task))?;
        let id = self
            .state
            .tasks
            .get(before)
            .map(|task| task.id.clone())
            .unwrap_or_default();
        Ok(id)
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> RepoResult<bool> {
        self.dispatch(Action::UpdateTask {
            id: id.to_string(),
            patch,
        })
    }

    /// Removes a task and forgets its timer.
    pub fn delete_task(&mut self, id: &str) -> RepoResult<bool> {
        let deleted = self.dispatch(Action::DeleteTask { id: id.to_string() })?;
        if deleted {
            self.timers.reset(id);
        }
        Ok(deleted)
    }

    pub fn toggle_task(&mut self, id: &str) -> RepoResult<bool> {
        self.dispatch(Action::ToggleTask { id: id.to_string() })
    }

    /// Prepends a message, bumps the notification counter and returns the
    /// new message id.
    pub fn add_message(&mut self, message: NewMessage) -> RepoResult<EntityId> {
        self.dispatch(Action::AddMessage(message))?;
        Ok(self
            .state
            .messages
            .first()
            .map(|message| message.id.clone())
            .unwrap_or_default())
    }

    pub fn mark_message_as_read(&mut self, id: &str) -> RepoResult<bool> {
        self.dispatch(Action::MarkMessageAsRead { id: id.to_string() })
    }

    /// Replaces the filter set wholesale.
    pub fn apply_filters(&mut self, filters: FilterOptions) -> RepoResult<bool> {
        self.dispatch(Action::ApplyFilters(filters))
    }

    pub fn clear_notifications(&mut self) -> RepoResult<bool> {
        self.dispatch(Action::ClearNotifications)
    }

    pub fn set_active_view(&mut self, view: View) -> RepoResult<bool> {
        self.dispatch(Action::SetActiveView(view))
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> RepoResult<bool> {
        self.dispatch(Action::SetSearchQuery(query.into()))
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) -> RepoResult<bool> {
        self.dispatch(Action::SetSelectedDate(date))
    }

    /// Moves the selected date one month back or forward.
    pub fn navigate_month(&mut self, direction: MonthDirection) -> RepoResult<bool> {
        let delta = match direction {
            MonthDirection::Previous => -1,
            MonthDirection::Next => 1,
        };
        let target = shift_month(self.state.selected_date, delta);
        self.set_selected_date(target)
    }

    /// Selects today's date.
    pub fn reset_selected_date(&mut self) -> RepoResult<bool> {
        let today = self.clock.today();
        self.set_selected_date(today)
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn activity_logs(&self) -> &[ActivityLog] {
        &self.state.activity_logs
    }

    /// Tasks matching the current search query and filters.
    pub fn visible_tasks(&self) -> &[Task] {
        &self.visible_tasks
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.state.projects.iter().find(|project| project.id == id)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.state.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.state.users.iter().find(|user| user.id == id)
    }

    pub fn pending_task_count(&self) -> usize {
        self.state.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn unread_message_count(&self) -> usize {
        self.state
            .messages
            .iter()
            .filter(|message| message.unread)
            .count()
    }

    /// Month grid around the selected date.
    pub fn calendar_month(&self) -> Vec<CalendarDay> {
        month_grid(
            &self.state.tasks,
            self.state.selected_date,
            self.clock.today(),
        )
    }

    pub fn tasks_due_on(&self, date: NaiveDate) -> Vec<Task> {
        tasks_due_on(&self.state.tasks, date)
    }

    /// Starts or pauses the timer of an existing task; returns whether it
    /// is running afterwards. Unknown task ids are ignored.
    pub fn toggle_timer(&mut self, task_id: &str) -> bool {
        if self.find_task(task_id).is_none() {
            return false;
        }
        self.timers.toggle(task_id, self.clock.now())
    }

    /// Credits elapsed whole seconds to every running timer.
    pub fn tick_timers(&mut self) {
        self.timers.tick(self.clock.now());
    }

    pub fn timer_elapsed(&self, task_id: &str) -> u64 {
        self.timers.elapsed(task_id)
    }

    pub fn timer_active(&self, task_id: &str) -> bool {
        self.timers.is_active(task_id)
    }

    /// Cancels every running timer.
    pub fn teardown(&mut self) {
        let cancelled = self.timers.cancel_all();
        debug!("event=service_teardown module=service status=ok timers_cancelled={cancelled}");
    }
}
