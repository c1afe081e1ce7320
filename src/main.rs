//! pg-migrate
//!
//! Compiles a JSON-Schema style model into a PostgreSQL migration script and
//! applies it, or prints it with `--dry-run`.

use clap::Parser;
use migrator_cli::{Cli, ConnectionDefaults};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let defaults = ConnectionDefaults::from_env();
    match migrator_cli::run(cli, &defaults).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => migrator_cli::report_error(&error),
    }
}
