//! Runtime configuration for the `taskflow` binary.
//!
//! # Responsibility
//! - Declare the global flags and their environment fallbacks.
//! - Resolve defaults under the platform data directory.
//!
//! # Invariants
//! - Resolved paths are absolute.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use taskflow_core::{default_log_level, LogConfig};

const APP_DIR_NAME: &str = "taskflow";
const DB_FILE_NAME: &str = "taskflow.db";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_USER_ID: &str = "1";

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// SQLite database file.
    #[arg(long, global = true, env = "TASKFLOW_DB")]
    pub db: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, global = true, env = "TASKFLOW_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, global = true, env = "TASKFLOW_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// User id recorded in the activity log.
    #[arg(long, global = true, env = "TASKFLOW_USER")]
    pub user: Option<String>,

    /// Emit JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log: LogConfig,
    pub user: String,
}

impl CliConfig {
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read the working directory")?;
        let data_dir = || -> Result<PathBuf> {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| anyhow!("unable to resolve the user data directory; pass --db and --log-dir"))
        };
        Self::resolve_with(args, &cwd, data_dir)
    }

    fn resolve_with(
        args: &GlobalArgs,
        cwd: &Path,
        data_dir: impl Fn() -> Result<PathBuf>,
    ) -> Result<Self> {
        let db_path = match &args.db {
            Some(path) => absolutize(path, cwd),
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match &args.log_dir {
            Some(path) => absolutize(path, cwd),
            None => data_dir()?.join(LOG_DIR_NAME),
        };
        let level = args
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        let user = args
            .user
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
            .to_string();

        let mut log = LogConfig::new(level, log_dir);
        log.echo_warnings = true;

        Ok(Self { db_path, log, user })
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
