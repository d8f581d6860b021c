//! `taskflow` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the database.
//! - Route each subcommand to the state container.
//!
//! # Invariants
//! - Every subcommand except `version` runs against one `AppService`
//!   whose timers are torn down before exit.

#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{CliConfig, GlobalArgs};
use log::{error, info};
use output::{render, OutputMode};
use serde_json::json;
use std::io::Write;
use std::process::ExitCode;
use taskflow_core::db::open_db;
use taskflow_core::{
    core_version, init_logging, AppService, Clock, KeyValueStore, SqliteKeyValueStore,
    SystemClock,
};

#[derive(Parser, Debug)]
#[command(
    name = "taskflow",
    version,
    about = "TaskFlow: projects, tasks and messages from the terminal",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List, show and update projects.
    #[command(subcommand)]
    Project(cmd::project::ProjectCommand),

    /// Create, edit, toggle and list tasks.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n    taskflow task add \"Review PR\" --priority high --due 2024-03-01\n    taskflow task toggle 1712345678901\n    taskflow task list --all"
    )]
    Task(cmd::task::TaskCommand),

    /// Read and send messages.
    #[command(subcommand)]
    Message(cmd::message::MessageCommand),

    /// Set the search query and print matching tasks.
    Search(cmd::filter::SearchArgs),

    /// Show, replace, toggle or clear the saved task filters.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n    taskflow filter set --priority high --range week\n    taskflow filter set --from 2024-02-01 --to 2024-02-15\n    taskflow filter toggle --status pending\n    taskflow filter clear"
    )]
    Filter(cmd::filter::FilterCommand),

    /// Show or clear the notification counter.
    Notifications(cmd::activity::NotificationsArgs),

    /// Print the month grid around the selected date.
    Calendar(cmd::calendar::CalendarArgs),

    /// Print recent activity.
    Activity(cmd::activity::ActivityArgs),

    /// Show or switch the active dashboard view.
    View(cmd::view::ViewArgs),

    /// Print version information.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mode = OutputMode::from_json_flag(cli.global.json);
    if let Commands::Version = cli.command {
        let payload = json!({ "taskflow": core_version() });
        return render(mode, &payload, |_, w| {
            writeln!(w, "taskflow {}", core_version())
        });
    }

    let config = CliConfig::resolve(&cli.global)?;
    init_logging(&config.log).context("failed to start logging")?;

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create `{}`", parent.display()))?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open database `{}`", config.db_path.display()))?;
    let store = SqliteKeyValueStore::try_new(&conn).context("database schema check failed")?;
    let mut service =
        AppService::load(store, SystemClock, config.user.clone()).context("cannot load state")?;
    info!(
        "event=cli_run module=cli status=start db={} user={}",
        config.db_path.display(),
        service.actor_id()
    );

    let result = execute(cli.command, &mut service, mode);
    service.teardown();
    result
}

fn execute<S: KeyValueStore, C: Clock>(
    command: Commands,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    match command {
        Commands::Project(command) => cmd::project::run(command, service, mode),
        Commands::Task(command) => cmd::task::run(command, service, mode),
        Commands::Message(command) => cmd::message::run(command, service, mode),
        Commands::Search(args) => cmd::filter::run_search(args, service, mode),
        Commands::Filter(command) => cmd::filter::run(command, service, mode),
        Commands::Notifications(args) => cmd::activity::run_notifications(args, service, mode),
        Commands::Calendar(args) => cmd::calendar::run(args, service, mode),
        Commands::Activity(args) => cmd::activity::run_activity(args, service, mode),
        Commands::View(args) => cmd::view::run(args, service, mode),
        Commands::Version => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Commands};
    use crate::output::OutputMode;
    use chrono::{TimeZone, Utc};
    use clap::{CommandFactory, Parser};
    use taskflow_core::{AppService, ManualClock, MemoryKeyValueStore, Priority, View};

    fn service(clock: &ManualClock) -> AppService<MemoryKeyValueStore, &ManualClock> {
        AppService::load(MemoryKeyValueStore::new(), clock, "1").unwrap()
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 14, 9, 0, 0).unwrap())
    }

    fn run(service: &mut AppService<MemoryKeyValueStore, &ManualClock>, args: &[&str]) {
        let mut argv = vec!["taskflow", "--json"];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        execute(cli.command, service, OutputMode::Json).unwrap();
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["taskflow", "task", "list", "--json", "--user", "4"]);
        assert!(cli.global.json);
        assert_eq!(cli.global.user.as_deref(), Some("4"));
        assert!(matches!(cli.command, Commands::Task(_)));
    }

    #[test]
    fn task_commands_drive_the_service() {
        let clock = clock();
        let mut service = service(&clock);

        run(&mut service, &["task", "add", "Plan retro", "--priority", "high"]);
        let added = service.tasks().last().unwrap().clone();
        assert_eq!(added.title, "Plan retro");
        assert_eq!(added.priority, Priority::High);

        run(&mut service, &["task", "toggle", added.id.as_str()]);
        assert!(service.find_task(&added.id).unwrap().completed);

        run(&mut service, &["task", "delete", added.id.as_str()]);
        assert!(service.find_task(&added.id).is_none());
        assert_eq!(service.activity_logs().len(), 3);
    }

    #[test]
    fn filter_and_search_commands_update_visible_tasks() {
        let clock = clock();
        let mut service = service(&clock);

        run(&mut service, &["filter", "set", "--priority", "high"]);
        assert!(service
            .visible_tasks()
            .iter()
            .all(|task| task.priority == Priority::High));

        run(&mut service, &["search", "backup"]);
        assert_eq!(service.visible_tasks().len(), 1);

        run(&mut service, &["filter", "clear"]);
        run(&mut service, &["search"]);
        assert_eq!(service.visible_tasks().len(), service.tasks().len());
    }

    #[test]
    fn filter_toggle_flips_criteria_without_resetting_others() {
        let clock = clock();
        let mut service = service(&clock);

        run(&mut service, &["filter", "set", "--priority", "high", "--range", "week"]);
        let range = service.state().filters.date_range.clone();

        run(&mut service, &["filter", "toggle", "--priority", "low", "--project", "2"]);
        let filters = &service.state().filters;
        assert_eq!(filters.priority, vec![Priority::High, Priority::Low]);
        assert_eq!(filters.projects, vec!["2".to_string()]);
        assert_eq!(filters.date_range, range);
        assert_eq!(filters.active_count(), 3);

        run(&mut service, &["filter", "toggle", "--priority", "low", "--project", "2"]);
        assert_eq!(service.state().filters.priority, vec![Priority::High]);
        assert_eq!(service.state().filters.active_count(), 1);
    }

    #[test]
    fn message_view_and_notification_commands() {
        let clock = clock();
        let mut service = service(&clock);

        run(&mut service, &["message", "send", "On it"]);
        assert_eq!(service.messages()[0].body, "On it");
        assert_eq!(service.state().notifications, 3);

        run(&mut service, &["notifications", "--clear"]);
        assert_eq!(service.state().notifications, 0);

        run(&mut service, &["view", "calendar"]);
        assert_eq!(service.state().active_view, View::Calendar);

        run(&mut service, &["calendar", "--next"]);
        assert_eq!(
            service.state().selected_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
    }

    #[test]
    fn project_update_applies_counts() {
        let clock = clock();
        let mut service = service(&clock);

        run(
            &mut service,
            &["project", "update", "2", "--completed", "10", "--total", "20"],
        );
        assert_eq!(service.find_project("2").unwrap().progress, 50);
    }
}
