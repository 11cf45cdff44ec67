//! Shared output layer for human/JSON parity across commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: readable text for humans, stable JSON for machines.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON, one object per result.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` to stdout: pretty JSON in [`OutputMode::Json`], otherwise
/// via the provided human formatter.
pub fn render<T, F>(mode: OutputMode, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        human(value, &mut out)?;
    }
    Ok(())
}
