//! `taskai` command-line entry point.
//!
//! Tracing is opt-in through `RUST_LOG`; logs go to standard error so they
//! never mix with command output.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use taskai::cli::Cli;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => return report(&err),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match runtime.block_on(cli.run(&mut out)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn init_tracing() {
    // Ignore empty or oversized filters rather than failing startup.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(trimmed).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn report(err: &dyn std::error::Error) -> ExitCode {
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "error: {err}").is_err() {
        return ExitCode::from(2);
    }
    ExitCode::FAILURE
}
