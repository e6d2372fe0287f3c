//! CLI argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parachute descent and friction pull calculator.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "descent", author, version, about, long_about = None)]
pub struct Args {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Terminal velocity and descent time for one canopy area
    Parachute {
        /// Canopy area; must be one of the configured options.
        #[arg(long)]
        area: f64,
        /// Scenario YAML file (defaults to the preset).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Built-in preset used when no file is given.
        #[arg(long, default_value = "skydiver")]
        preset: String,
    },
    /// Force needed to pull a block at constant speed
    Friction {
        /// Surface key (plastic, metal, sandpaper, carpet).
        #[arg(long, default_value = "metal")]
        surface: String,
        /// Block mass in kilograms.
        #[arg(long)]
        mass: Option<f64>,
    },
    /// Step the drag model until the body lands
    Simulate {
        /// Scenario YAML file (defaults to the preset).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Built-in preset used when no file is given.
        #[arg(long, default_value = "skydiver")]
        preset: String,
        /// Override the selected canopy area.
        #[arg(long)]
        area: Option<f64>,
        /// Override the step limit.
        #[arg(long)]
        max_steps: Option<u64>,
    },
    /// List the friction lookup table
    Surfaces,
}
