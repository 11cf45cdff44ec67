#![forbid(unsafe_code)]

mod output;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use seriate_core::{Item, cycles, order};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use output::{OutputMode, render};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "seriate: deterministic dependency orderer",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            self.format.unwrap_or(OutputMode::Human)
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a dependency-respecting order for the items in FILE.
    Order {
        /// JSON file holding an array of items; reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// List dependency cycles among the items without computing an order.
    Cycles {
        /// JSON file holding an array of items; reads stdin when omitted.
        file: Option<PathBuf>,
    },
}

/// Log filter comes from `SERIATE_LOG` when set, else from `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SERIATE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Read and parse the item collection from `file`, or stdin when absent.
fn read_items(file: Option<&Path>) -> Result<Vec<Item>> {
    let (raw, source) = match file {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            (buf, "stdin".to_string())
        }
    };
    let items: Vec<Item> =
        serde_json::from_str(&raw).with_context(|| format!("parsing items from {source}"))?;
    debug!(items = items.len(), %source, "parsed item collection");
    Ok(items)
}

#[derive(Debug, Serialize)]
struct OrderReport {
    /// Indices into the input collection, dependencies first.
    order: Vec<usize>,
    /// The same sequence projected onto item ids.
    ids: Vec<String>,
}

fn cmd_order(file: Option<&Path>, mode: OutputMode) -> Result<()> {
    let items = read_items(file)?;
    let sequence = order(&items)?;
    let report = OrderReport {
        ids: sequence.iter().map(|&i| items[i].id.clone()).collect(),
        order: sequence,
    };
    render(mode, &report, |report, out| {
        for (pos, id) in report.ids.iter().enumerate() {
            writeln!(out, "{:>4}. {id}", pos + 1)?;
        }
        Ok(())
    })
}

fn cmd_cycles(file: Option<&Path>, mode: OutputMode) -> Result<()> {
    let items = read_items(file)?;
    let found = cycles::find_cycles(&items);
    render(mode, &found, |found, out| {
        if found.is_empty() {
            writeln!(out, "no cycles")?;
            return Ok(());
        }
        for members in found {
            let mut path = members.join(" -> ");
            if let Some(first) = members.first() {
                path.push_str(" -> ");
                path.push_str(first);
            }
            writeln!(out, "{path}")?;
        }
        Ok(())
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mode = cli.output_mode();

    match &cli.command {
        Commands::Order { file } => cmd_order(file.as_deref(), mode),
        Commands::Cycles { file } => cmd_cycles(file.as_deref(), mode),
    }
}
