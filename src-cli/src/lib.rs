//! Lookout command-line shell
//!
//! This is the thin host that loads configuration, builds the analyzer
//! registry and prints JSON for the menu and open commands.
//! Core logic lives in the `crates/` directory.

pub mod commands;
pub mod error;
pub mod state;

use anyhow::{Context, Result};
use commands::{Cli, Invocation, USAGE};
use error::ErrorReport;
use lookout_indicator::defang;
use serde::Serialize;
use state::AppState;
use std::io::Write;
use tracing::{error, info, warn};

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,lookout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("serializing output")?;
    writeln!(out)?;
    Ok(())
}

/// Execute one parsed invocation, writing its result to `out`.
pub async fn execute(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.invocation {
        Invocation::Help => writeln!(out, "{USAGE}")?,
        Invocation::Version => writeln!(out, "lookout {}", env!("CARGO_PKG_VERSION"))?,
        Invocation::Defang(text) => writeln!(out, "{}", defang(text))?,
        Invocation::Menu(text) => {
            let state = AppState::load(cli.config.as_deref())?;
            print_json(out, &commands::menu(&state, text)?)?;
        }
        Invocation::Open(menu_id) => {
            let state = AppState::load(cli.config.as_deref())?;
            print_json(out, &commands::open(&state, menu_id).await)?;
        }
    }
    Ok(())
}

/// Parse `args` (without the program name), run, and report failures as JSON.
///
/// Returns `false` when the invocation failed.
pub async fn run(args: Vec<String>) -> bool {
    let mut stdout = std::io::stdout();
    let result = match Cli::parse(args) {
        Ok(cli) => {
            info!(command = ?cli.invocation, "starting lookout v{}", env!("CARGO_PKG_VERSION"));
            execute(&cli, &mut stdout).await
        }
        Err(usage) => Err(usage.into()),
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            report_failure(&mut stdout, &err);
            false
        }
    }
}

/// Log `err` and print its JSON report to `out`.
fn report_failure(out: &mut impl Write, err: &anyhow::Error) {
    error!(error = %format!("{err:#}"), "command failed");
    if let Err(write_err) = print_json(out, &ErrorReport::from(err)) {
        warn!(error = %write_err, "failed to write error report");
    }
}
