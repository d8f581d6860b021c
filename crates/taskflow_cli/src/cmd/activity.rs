//! `taskflow activity` and `taskflow notifications`.

use crate::output::{render, OutputMode};
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::io::Write;
use taskflow_core::{AppService, Clock, KeyValueStore};

#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// Number of entries to show, newest first.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct NotificationsArgs {
    /// Reset the counter to zero.
    #[arg(long)]
    pub clear: bool,
}

pub fn run_activity<S: KeyValueStore, C: Clock>(
    args: ActivityArgs,
    service: &AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    let entries: Vec<_> = service
        .activity_logs()
        .iter()
        .rev()
        .take(args.limit)
        .collect();
    render(mode, &entries, |entries, w| {
        if entries.is_empty() {
            return writeln!(w, "no activity yet");
        }
        for entry in entries {
            let actor = service
                .find_user(&entry.user_id)
                .map(|user| user.name.as_str())
                .unwrap_or(entry.user_id.as_str());
            writeln!(
                w,
                "{} {:<11} {:<7} {:<14} {} ({})",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.action.as_str(),
                entry.entity_type.as_str(),
                entry.entity_id,
                entry.details,
                actor
            )?;
        }
        Ok(())
    })
}

pub fn run_notifications<S: KeyValueStore, C: Clock>(
    args: NotificationsArgs,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    if args.clear {
        service.clear_notifications()?;
    }
    let payload = json!({
        "notifications": service.state().notifications,
        "unread_messages": service.unread_message_count(),
        "pending_tasks": service.pending_task_count(),
    });
    render(mode, &payload, |_, w| {
        writeln!(w, "notifications:   {}", service.state().notifications)?;
        writeln!(w, "unread messages: {}", service.unread_message_count())?;
        writeln!(w, "pending tasks:   {}", service.pending_task_count())
    })
}
