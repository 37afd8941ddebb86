//! embed-probe binary: `embed-probe [BASE_URL]`, exit code 0 when all checks pass, 1 otherwise.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use embed_probe::{init_tracing, Cli};

/// Single-threaded runtime; requests are awaited one after another.
fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            // --help / --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_tracing() {
        eprintln!("{}", e);
    }

    match build_runtime() {
        Ok(runtime) => runtime.block_on(cli.run()),
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
