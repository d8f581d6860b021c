//! `taskflow search` and `taskflow filter`: the saved task view criteria.

use crate::cmd::task::write_task_lines;
use crate::cmd::{date_or_dash, parse_date, parse_preset, parse_priority, parse_status};
use crate::output::{kv, render, OutputMode};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write;
use taskflow_core::{
    AppService, Clock, DatePreset, DateRange, FilterOptions, KeyValueStore, Priority, Status, Task,
};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text matched against titles, descriptions and tags. Empty clears.
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// Show the saved filters.
    Show,
    /// Replace the saved filters.
    Set(FilterSetArgs),
    /// Flip individual criteria on or off, keeping the rest.
    Toggle(FilterToggleArgs),
    /// Reset every criterion.
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct FilterSetArgs {
    /// Status to keep; repeat for several.
    #[arg(long, value_parser = parse_status)]
    pub status: Vec<Status>,

    /// Priority to keep; repeat for several.
    #[arg(long, value_parser = parse_priority)]
    pub priority: Vec<Priority>,

    /// Project id to keep; repeat for several.
    #[arg(long)]
    pub project: Vec<String>,

    /// Due-date range: today, week, month or custom.
    #[arg(long, value_parser = parse_preset)]
    pub range: Option<DatePreset>,

    /// Custom range start (inclusive).
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Custom range end (inclusive).
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl FilterSetArgs {
    /// Builds the filter set; presets resolve relative to `today`.
    pub fn to_filters(&self, today: NaiveDate) -> Result<FilterOptions> {
        let date_range = match (self.range, self.from, self.to) {
            (Some(DatePreset::Custom), start, end) | (None, start @ Some(_), end)
            | (None, start, end @ Some(_)) => DateRange::custom(start, end),
            (Some(preset), None, None) => DateRange::for_preset(preset, today),
            (Some(preset), _, _) => {
                bail!("--from/--to only apply to a custom range, not `{}`", preset.as_str())
            }
            (None, None, None) => FilterOptions::default().date_range,
        };
        Ok(FilterOptions {
            status: dedup(&self.status),
            priority: dedup(&self.priority),
            projects: dedup(&self.project),
            date_range,
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct FilterToggleArgs {
    /// Status to add, or remove if already kept.
    #[arg(long, value_parser = parse_status)]
    pub status: Vec<Status>,

    /// Priority to add, or remove if already kept.
    #[arg(long, value_parser = parse_priority)]
    pub priority: Vec<Priority>,

    /// Project id to add, or remove if already kept.
    #[arg(long)]
    pub project: Vec<String>,
}

impl FilterToggleArgs {
    /// Applies each toggle in order on top of `current`.
    pub fn apply_to(self, current: &FilterOptions) -> FilterOptions {
        let mut filters = current.clone();
        for status in self.status {
            filters.toggle_status(status);
        }
        for priority in self.priority {
            filters.toggle_priority(priority);
        }
        for project in self.project {
            filters.toggle_project(project);
        }
        filters
    }
}

fn dedup<T: Clone + PartialEq>(values: &[T]) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(value.clone());
        }
    }
    unique
}

#[derive(Serialize)]
struct FilterReport<'a> {
    search_query: &'a str,
    filters: &'a FilterOptions,
    active_count: usize,
    visible_tasks: &'a [Task],
}

pub fn run_search<S: KeyValueStore, C: Clock>(
    args: SearchArgs,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    service.set_search_query(args.query)?;
    render(mode, service.visible_tasks(), |tasks, w| write_task_lines(w, tasks))
}

pub fn run<S: KeyValueStore, C: Clock>(
    command: FilterCommand,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    match command {
        FilterCommand::Show => {}
        FilterCommand::Set(args) => {
            let filters = args.to_filters(service.today())?;
            service.apply_filters(filters)?;
        }
        FilterCommand::Toggle(args) => {
            let filters = args.apply_to(&service.state().filters);
            service.apply_filters(filters)?;
        }
        FilterCommand::Clear => {
            service.apply_filters(FilterOptions::default())?;
        }
    }

    let state = service.state();
    let report = FilterReport {
        search_query: &state.search_query,
        filters: &state.filters,
        active_count: state.filters.active_count(),
        visible_tasks: service.visible_tasks(),
    };
    render(mode, &report, |report, w| {
        let joined = |values: Vec<&str>| {
            if values.is_empty() {
                "any".to_string()
            } else {
                values.join(", ")
            }
        };
        let filters = report.filters;
        kv(w, "search", if report.search_query.is_empty() { "-" } else { report.search_query })?;
        kv(w, "status", joined(filters.status.iter().map(|s| s.as_str()).collect()))?;
        kv(w, "priority", joined(filters.priority.iter().map(|p| p.as_str()).collect()))?;
        kv(w, "projects", joined(filters.projects.iter().map(String::as_str).collect()))?;
        kv(
            w,
            "due range",
            format!(
                "{} {} .. {}",
                filters.date_range.preset.map(DatePreset::as_str).unwrap_or("-"),
                date_or_dash(filters.date_range.start),
                date_or_dash(filters.date_range.end)
            ),
        )?;
        kv(w, "active", report.active_count.to_string())?;
        writeln!(w)?;
        write_task_lines(w, report.visible_tasks)
    })
}
