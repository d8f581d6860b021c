//! `taskflow message`: inbox listing, sending and read receipts.

use crate::output::{render, render_outcome, OutputMode};
use anyhow::{bail, Result};
use clap::Subcommand;
use serde_json::json;
use std::io::Write;
use taskflow_core::{AppService, Clock, KeyValueStore, NewMessage};

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    /// List messages, newest first.
    List {
        /// Only unread messages.
        #[arg(long)]
        unread: bool,
    },
    /// Send a message as the local user.
    Send { body: String },
    /// Mark a message as read.
    Read { id: String },
}

pub fn run<S: KeyValueStore, C: Clock>(
    command: MessageCommand,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    match command {
        MessageCommand::List { unread } => {
            let messages: Vec<_> = service
                .messages()
                .iter()
                .filter(|message| !unread || message.unread)
                .collect();
            render(mode, &messages, |messages, w| {
                if messages.is_empty() {
                    return writeln!(w, "no messages");
                }
                for message in messages {
                    writeln!(
                        w,
                        "{} {:<14} {} {:<16} {:>4}  {}",
                        if message.unread { "*" } else { " " },
                        message.id,
                        message.sender.avatar,
                        message.sender.name,
                        message.timestamp,
                        message.body
                    )?;
                }
                Ok(())
            })
        }
        MessageCommand::Send { body } => {
            let body = body.trim();
            if body.is_empty() {
                bail!("message body cannot be empty");
            }
            let id = service.add_message(NewMessage::from_self(body))?;
            let payload = json!({
                "changed": true,
                "id": id,
                "notifications": service.state().notifications,
            });
            render(mode, &payload, |_, w| writeln!(w, "sent message `{id}`"))
        }
        MessageCommand::Read { id } => {
            let changed = service.mark_message_as_read(&id)?;
            render_outcome(mode, changed, &format!("message `{id}` marked as read"))
        }
    }
}
