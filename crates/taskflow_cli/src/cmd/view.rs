//! `taskflow view`: show or switch the active dashboard view.

use crate::cmd::parse_view;
use crate::output::{render, OutputMode};
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::io::Write;
use taskflow_core::{AppService, Clock, KeyValueStore, View};

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// View to activate; omit to print the current one.
    #[arg(value_parser = parse_view)]
    pub view: Option<View>,
}

pub fn run<S: KeyValueStore, C: Clock>(
    args: ViewArgs,
    service: &mut AppService<S, C>,
    mode: OutputMode,
) -> Result<()> {
    let changed = match args.view {
        Some(view) => service.set_active_view(view)?,
        None => false,
    };
    let view = service.state().active_view;
    let payload = json!({ "changed": changed, "view": view });
    render(mode, &payload, |_, w| writeln!(w, "{}", view.as_str()))
}
