//! `taskflow project`: list and update projects.

use crate::cmd::{parse_date, parse_priority, parse_status};
use crate::output::{kv, render, render_outcome, OutputMode};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::io::Write;
use taskflow_core::model::project::{parse_completed_count, parse_total_count};
use taskflow_core::{AppService, Clock, KeyValueStore, Priority, ProjectPatch, Status};

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List every project with its progress.
    List,
    /// Show one project.
    Show { id: String },
    /// Update project fields; progress follows the task counts.
    Update(ProjectUpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProjectUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Completed task count; unparsable input counts as 0.
    #[arg(long)]
    pub completed: Option<String>,

    /// Total task count; unparsable or zero input counts as 1.
    #[arg(long)]
    pub total: Option<String>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,

    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    #[arg(long)]
    pub clear_description: bool,
}

impl ProjectUpdateArgs {
    pub fn to_patch(&self) -> ProjectPatch {
        let description = if self.clear_description {
            Some(None)
        } else {
            self.description.clone().map(Some)
        };
        ProjectPatch {
            name: self.name.clone(),
            company: self.company.clone(),
            completed_tasks: self.completed.as_deref().map(parse_completed_count),
            total_tasks: self.total.as_deref().map(parse_total_count),
            priority: self.priority,
            status: self.status,
            due_date: self.due,
            description,
            ..ProjectPatch::default()
        }
    }
}

pub fn run<S: KeyValueStore, C: Clock>(
    command: ProjectCommand,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    match command {
        ProjectCommand::List => render(mode, service.projects(), |projects, w| {
            for project in projects {
                writeln!(
                    w,
                    "{:<4} {} {:<24} {:>3}% ({}/{}) {:<8} {:<12} due {}",
                    project.id,
                    project.logo,
                    project.name,
                    project.progress,
                    project.completed_tasks,
                    project.total_tasks,
                    project.priority.as_str(),
                    project.status.as_str(),
                    project.due_date
                )?;
            }
            Ok(())
        }),
        ProjectCommand::Show { id } => match service.find_project(&id) {
            Some(project) => render(mode, project, |project, w| {
                kv(w, "id", &project.id)?;
                kv(w, "name", format!("{} {}", project.logo, project.name))?;
                kv(w, "company", &project.company)?;
                kv(
                    w,
                    "progress",
                    format!(
                        "{}% ({}/{})",
                        project.progress, project.completed_tasks, project.total_tasks
                    ),
                )?;
                kv(w, "priority", project.priority.as_str())?;
                kv(w, "status", project.status.as_str())?;
                kv(w, "due", project.due_date.to_string())?;
                kv(w, "platforms", project.platforms.join(", "))?;
                kv(w, "team", project.team_members.join(" "))?;
                kv(w, "description", project.description.as_deref().unwrap_or("-"))
            }),
            None => render_outcome(mode, false, &format!("project `{id}` not found")),
        },
        ProjectCommand::Update(args) => {
            let changed = service.update_project(&args.id, args.to_patch())?;
            render_outcome(mode, changed, &format!("project `{}` updated", args.id))
        }
    }
}
