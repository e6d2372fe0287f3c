//! CLI command handlers.
//!
//! Each handler is split into a pure evaluation returning
//! [`DescentResult`] and the printing done by [`run_cli`], so the
//! evaluations can be tested without capturing stdout.

use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, error};

use super::output::{
    render_friction, render_landing, render_parachute, render_surfaces, FAILURE_EXIT_CODE,
};
use super::{Args, Command};
use crate::config::SimulationConfig;
use crate::engine::{DescentSimulation, LandingReport};
use crate::error::DescentResult;
use crate::model::{DescentOutcome, FrictionSurface, PullOutcome};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    debug!(command = ?args.command, "dispatching");
    match args.command {
        Command::Parachute {
            area,
            config,
            preset,
        } => {
            let result = load_config(config.as_deref(), &preset)
                .and_then(|config| evaluate_parachute(&config, area));
            report(render_parachute(area, &result), &result)
        }
        Command::Friction { surface, mass } => {
            let result = evaluate_friction(&surface, mass);
            report(render_friction(&surface, &result), &result)
        }
        Command::Simulate {
            config,
            preset,
            area,
            max_steps,
        } => {
            let result = load_config(config.as_deref(), &preset)
                .and_then(|config| run_simulation(config, area, max_steps));
            report(render_landing(&result), &result)
        }
        Command::Surfaces => {
            print!("{}", render_surfaces());
            ExitCode::SUCCESS
        }
    }
}

fn report<T>(rendered: String, result: &DescentResult<T>) -> ExitCode {
    print!("{rendered}");
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

/// Load a scenario from `path`, or the named preset when no path is given.
///
/// # Errors
///
/// Returns I/O, parse, or validation errors from the file, or a config
/// error for an unknown preset.
pub fn load_config(path: Option<&Path>, preset: &str) -> DescentResult<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::load(path),
        None => SimulationConfig::preset(preset),
    }
}

/// Terminal velocity and descent time for `area`.
///
/// # Errors
///
/// Returns [`crate::DescentError::Domain`] if `area` is not an offered
/// option or the formulas are undefined.
pub fn evaluate_parachute(config: &SimulationConfig, area: f64) -> DescentResult<DescentOutcome> {
    config.with_area(area)?.descent_parameters().evaluate()
}

/// Required pulling force on `surface`, for the friction block preset
/// with an optional mass override.
///
/// # Errors
///
/// Returns [`crate::DescentError::UnknownSurface`] for an unknown key, or
/// a domain error for a non-positive mass.
pub fn evaluate_friction(surface: &str, mass: Option<f64>) -> DescentResult<PullOutcome> {
    let mut params = SimulationConfig::friction_block().friction_parameters();
    params.surface = surface.parse::<FrictionSurface>()?;
    if let Some(mass) = mass {
        params.mass = mass;
    }
    params.evaluate()
}

/// Run the stepped descent to the floor.
///
/// # Errors
///
/// Returns a validation error for the overrides, a guard violation, or a
/// config error if the body does not land within the step limit.
pub fn run_simulation(
    mut config: SimulationConfig,
    area: Option<f64>,
    max_steps: Option<u64>,
) -> DescentResult<LandingReport> {
    if let Some(area) = area {
        config = config.with_area(area)?;
    }
    if let Some(max_steps) = max_steps {
        config.timestep.max_steps = max_steps;
    }
    let mut simulation = DescentSimulation::new(config)?;
    simulation.run_to_landing()
}
