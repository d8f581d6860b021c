//! `taskflow calendar`: month grid around the selected date.

use crate::cmd::parse_date;
use crate::cmd::task::write_task_lines;
use crate::output::{render, OutputMode};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use taskflow_core::service::calendar::priority_counts;
use taskflow_core::{AppService, CalendarDay, Clock, KeyValueStore, MonthDirection, PriorityCounts};

const WEEKDAY_HEADER: &str = "  Sun   Mon   Tue   Wed   Thu   Fri   Sat";

#[derive(Args, Debug, Default)]
pub struct CalendarArgs {
    /// Move one month back.
    #[arg(long, conflicts_with_all = ["next", "today", "date"])]
    pub prev: bool,

    /// Move one month forward.
    #[arg(long, conflicts_with_all = ["today", "date"])]
    pub next: bool,

    /// Jump back to today.
    #[arg(long, conflicts_with = "date")]
    pub today: bool,

    /// Select a specific date.
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct CalendarReport<'a> {
    selected_date: NaiveDate,
    days: &'a [CalendarDay],
    selected_tasks: &'a [taskflow_core::Task],
    selected_counts: PriorityCounts,
}

pub fn run<S: KeyValueStore, C: Clock>(
    args: CalendarArgs,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    if args.prev {
        service.navigate_month(MonthDirection::Previous)?;
    } else if args.next {
        service.navigate_month(MonthDirection::Next)?;
    } else if args.today {
        service.reset_selected_date()?;
    } else if let Some(date) = args.date {
        service.set_selected_date(date)?;
    }

    let selected_date = service.state().selected_date;
    let days = service.calendar_month();
    let selected_tasks = service.tasks_due_on(selected_date);
    let report = CalendarReport {
        selected_date,
        days: &days,
        selected_tasks: &selected_tasks,
        selected_counts: priority_counts(&selected_tasks),
    };

    render(mode, &report, |report, w| {
        writeln!(w, "{}", report.selected_date.format("%B %Y"))?;
        writeln!(w, "{WEEKDAY_HEADER}")?;
        for week in report.days.chunks(7) {
            let line: Vec<String> = week.iter().map(day_cell).collect();
            writeln!(w, "{}", line.join(""))?;
        }
        writeln!(w)?;
        let counts = report.selected_counts;
        writeln!(
            w,
            "{}: {} high, {} medium, {} low",
            report.selected_date, counts.high, counts.medium, counts.low
        )?;
        write_task_lines(w, report.selected_tasks)
    })
}

/// Six-column cell: marker, day number and task count.
fn day_cell(day: &CalendarDay) -> String {
    use chrono::Datelike;

    let marker = if day.is_today { '>' } else { ' ' };
    let number = if day.is_current_month {
        format!("{:>2}", day.date.day())
    } else {
        " .".to_string()
    };
    let count = match day.tasks.len() {
        0 => "   ".to_string(),
        n if n > 9 => "+9 ".to_string(),
        n => format!("+{n} "),
    };
    format!("{marker}{number}{count}")
}
