//! CLI output formatting.
//!
//! Renderers return strings so the CLI output can be asserted on directly.
//! A failed computation renders every figure as the sentinel.

use std::fmt::Write as _;

use crate::display::DisplayValue;
use crate::engine::LandingReport;
use crate::error::DescentResult;
use crate::model::{DescentOutcome, FrictionSurface, PullOutcome};

/// Exit code for a failed computation.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Render the `parachute` command result.
#[must_use]
pub fn render_parachute(area: f64, result: &DescentResult<DescentOutcome>) -> String {
    let (velocity, time) = match result {
        Ok(outcome) => (
            DisplayValue::from_f64(outcome.terminal_velocity),
            DisplayValue::from_f64(outcome.total_time_seconds),
        ),
        Err(_) => (DisplayValue::Invalid, DisplayValue::Invalid),
    };
    format!(
        "Canopy area:       {}\nTerminal velocity: {}\nDescent time:      {}\n",
        DisplayValue::from_f64(area),
        velocity.with_unit("m/s"),
        time.with_unit("s"),
    )
}

/// Render the `friction` command result.
#[must_use]
pub fn render_friction(surface: &str, result: &DescentResult<PullOutcome>) -> String {
    match result {
        Ok(outcome) => format!(
            "Surface:        {} (μ = {})\nRequired force: {}\n",
            outcome.surface,
            outcome.surface.coefficient(),
            DisplayValue::from_f64(outcome.required_force_newtons).with_unit("N"),
        ),
        Err(_) => format!(
            "Surface:        {}\nRequired force: {}\n",
            surface.trim(),
            DisplayValue::Invalid.with_unit("N"),
        ),
    }
}

/// Render the `simulate` command result.
#[must_use]
pub fn render_landing(result: &DescentResult<LandingReport>) -> String {
    let (elapsed, impact, steps) = match result {
        Ok(report) => (
            DisplayValue::from_f64(report.elapsed),
            DisplayValue::from_f64(report.impact_velocity),
            report.steps.to_string(),
        ),
        Err(_) => (
            DisplayValue::Invalid,
            DisplayValue::Invalid,
            crate::display::SENTINEL.to_string(),
        ),
    };
    format!(
        "Landing time:    {}\nImpact velocity: {}\nSteps:           {steps}\n",
        elapsed.with_unit("s"),
        impact.with_unit("m/s"),
    )
}

/// Render the friction lookup table.
#[must_use]
pub fn render_surfaces() -> String {
    let mut out = String::from("Surface     μ\n");
    for surface in FrictionSurface::ALL {
        let _ = writeln!(out, "{:<11} {:.2}", surface.key(), surface.coefficient());
    }
    out
}
