//! # spdx-validator entry point
//!
//! Parses arguments, installs the tracing subscriber and maps the outcome
//! to an exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use spdxv_cli::validate::{run_validate, ValidateArgs, EXIT_ERROR};

/// Validate SPDX 2.2 manifests and, with `--recursive`, every manifest
/// they dynamically link against.
#[derive(Parser, Debug)]
#[command(name = "spdx-validator", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    validate: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match (cli.verbose, cli.validate.debug) {
        (0, false) => "warn",
        (1, false) => "info",
        (0..=2, _) => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "spdx-validator starting");

    let mut stdout = std::io::stdout().lock();
    match run_validate(&cli.validate, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
