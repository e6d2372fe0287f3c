//! descent CLI - parachute descent and friction pull calculator.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use descent::cli::{run_cli, Args};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {e}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(version = %descent::version(), "descent starting");
    run_cli(args)
}
