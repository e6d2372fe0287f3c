//! CLI module for descent.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{evaluate_friction, evaluate_parachute, load_config, run_cli, run_simulation};
pub use output::{
    render_friction, render_landing, render_parachute, render_surfaces, FAILURE_EXIT_CODE,
};
