//! Human and JSON rendering shared by every subcommand.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Writes `value` as pretty JSON or through the `human` formatter.
pub fn render<T, F>(mode: OutputMode, value: &T, human: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, mode, value, human)
}

fn render_to<T, F>(out: &mut dyn Write, mode: OutputMode, value: &T, human: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        human(value, out)?;
    }
    Ok(())
}

/// Reports the outcome of a mutation.
///
/// Unknown ids are not errors; they are reported as unchanged.
pub fn render_outcome(mode: OutputMode, changed: bool, message: &str) -> Result<()> {
    let payload = json!({ "changed": changed, "message": message });
    render(mode, &payload, |_, w| {
        if changed {
            writeln!(w, "{message}")
        } else {
            writeln!(w, "{message} (no change)")
        }
    })
}

pub fn check_mark(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Left-aligned `key: value` line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}
