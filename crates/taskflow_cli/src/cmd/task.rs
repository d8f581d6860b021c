//! `taskflow task`: create, edit, toggle and list tasks.

use crate::cmd::{date_or_dash, parse_date, parse_priority, parse_status};
use crate::output::{check_mark, kv, render, render_outcome, OutputMode};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use taskflow_core::{
    AppService, Clock, KeyValueStore, NewTask, Priority, Status, Task, TaskPatch,
};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks matching the saved search and filters.
    List {
        /// Ignore the saved search and filters.
        #[arg(long)]
        all: bool,
    },
    /// Show one task.
    Show { id: String },
    /// Create a task.
    Add(TaskAddArgs),
    /// Update task fields.
    Update(TaskUpdateArgs),
    /// Delete a task.
    Delete { id: String },
    /// Flip a task between completed and pending.
    Toggle { id: String },
}

#[derive(Args, Debug)]
pub struct TaskAddArgs {
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_priority, default_value = "medium")]
    pub priority: Priority,

    #[arg(long, value_parser = parse_status, default_value = "pending")]
    pub status: Status,

    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    #[arg(long)]
    pub project: Option<String>,

    /// Estimated effort in hours.
    #[arg(long)]
    pub estimate: Option<f32>,

    /// Tag to attach; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// User id of the assignee.
    #[arg(long)]
    pub assignee: Option<String>,
}

impl TaskAddArgs {
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.status == Status::Completed,
            priority: self.priority,
            status: self.status,
            due_date: self.due,
            project_id: self.project.clone(),
            estimated_time: self.estimate,
            actual_time: None,
            tags: self.tags.clone(),
            assigned_to: self.assignee.clone(),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct TaskUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,

    #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,

    /// Remove the due date.
    #[arg(long)]
    pub clear_due: bool,

    #[arg(long)]
    pub project: Option<String>,

    /// Estimated effort in hours.
    #[arg(long)]
    pub estimate: Option<f32>,

    /// Logged effort in hours.
    #[arg(long)]
    pub actual: Option<f32>,

    /// Replace all tags; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Remove every tag.
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    #[arg(long)]
    pub assignee: Option<String>,
}

impl TaskUpdateArgs {
    pub fn to_patch(&self) -> TaskPatch {
        let due_date = if self.clear_due {
            Some(None)
        } else {
            self.due.map(Some)
        };
        let tags = if self.clear_tags {
            Some(Vec::new())
        } else if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.clone())
        };
        TaskPatch {
            title: self.title.clone(),
            description: self.description.clone().map(Some),
            priority: self.priority,
            status: self.status,
            due_date,
            project_id: self.project.clone().map(Some),
            estimated_time: self.estimate.map(Some),
            actual_time: self.actual.map(Some),
            tags,
            assigned_to: self.assignee.clone().map(Some),
            ..TaskPatch::default()
        }
    }
}

pub fn run<S: KeyValueStore, C: Clock>(
    command: TaskCommand,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    match command {
        TaskCommand::List { all } => {
            let tasks = if all {
                service.tasks()
            } else {
                service.visible_tasks()
            };
            render(mode, tasks, |tasks, w| write_task_lines(w, tasks))
        }
        TaskCommand::Show { id } => match service.find_task(&id) {
            Some(task) => {
                let assignee = task
                    .assigned_to
                    .as_deref()
                    .and_then(|user_id| service.find_user(user_id))
                    .map(|user| format!("{} {}", user.avatar, user.name));
                render(mode, task, |task, w| {
                    kv(w, "id", &task.id)?;
                    kv(w, "title", format!("{} {}", check_mark(task.completed), task.title))?;
                    kv(w, "description", task.description.as_deref().unwrap_or("-"))?;
                    kv(w, "priority", task.priority.as_str())?;
                    kv(w, "status", task.status.as_str())?;
                    kv(w, "due", date_or_dash(task.due_date))?;
                    kv(w, "project", task.project_id.as_deref().unwrap_or("-"))?;
                    kv(w, "assignee", assignee.as_deref().unwrap_or("-"))?;
                    kv(w, "tags", task.tags.join(", "))?;
                    kv(w, "effort", format_effort(task))
                })
            }
            None => render_outcome(mode, false, &format!("task `{id}` not found")),
        },
        TaskCommand::Add(args) => {
            let id = service.add_task(args.to_new_task())?;
            let payload = json!({ "changed": true, "id": id });
            render(mode, &payload, |_, w| writeln!(w, "created task `{id}`"))
        }
        TaskCommand::Update(args) => {
            let changed = service.update_task(&args.id, args.to_patch())?;
            render_outcome(mode, changed, &format!("task `{}` updated", args.id))
        }
        TaskCommand::Delete { id } => {
            let changed = service.delete_task(&id)?;
            render_outcome(mode, changed, &format!("task `{id}` deleted"))
        }
        TaskCommand::Toggle { id } => {
            let changed = service.toggle_task(&id)?;
            let state = service
                .find_task(&id)
                .map(|task| task.status.as_str())
                .unwrap_or("missing");
            render_outcome(mode, changed, &format!("task `{id}` is now {state}"))
        }
    }
}

pub(crate) fn write_task_lines(w: &mut dyn Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "no tasks");
    }
    for task in tasks {
        writeln!(
            w,
            "{} {:<14} {:<36} {:<6} {:<11} due {}",
            check_mark(task.completed),
            task.id,
            task.title,
            task.priority.as_str(),
            task.status.as_str(),
            date_or_dash(task.due_date)
        )?;
    }
    Ok(())
}

fn format_effort(task: &Task) -> String {
    match (task.estimated_time, task.actual_time) {
        (None, None) => "-".to_string(),
        (estimated, actual) => format!(
            "{}h logged of {}h",
            actual.unwrap_or(0.0),
            estimated.map(|hours| hours.to_string()).unwrap_or_else(|| "?".to_string())
        ),
    }
}
