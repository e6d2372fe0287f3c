//! Dimension-checked entry points over the descent formulas.
//!
//! Callers that already hold `uom` quantities use these instead of the raw
//! `f64` functions, so a density can never be passed where an area belongs.

use uom::si::acceleration::meter_per_second_squared;
use uom::si::area::square_meter;
use uom::si::f64::{Acceleration, Area, Force, Length, Mass, MassDensity, Time, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

use crate::error::DescentResult;
use crate::model::descent;

/// Standard gravity at sea level (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Air density at sea level, 15 °C (kg/m³).
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

/// Terminal velocity for SI quantities.
///
/// # Errors
///
/// Same conditions as [`descent::compute_terminal_velocity`].
pub fn terminal_velocity(
    mass: Mass,
    gravity: Acceleration,
    air_density: MassDensity,
    area: Area,
    drag_coefficient: f64,
) -> DescentResult<Velocity> {
    let v = descent::compute_terminal_velocity(
        mass.get::<kilogram>(),
        gravity.get::<meter_per_second_squared>(),
        air_density.get::<kilogram_per_cubic_meter>(),
        area.get::<square_meter>(),
        drag_coefficient,
    )?;
    Ok(Velocity::new::<meter_per_second>(v))
}

/// Descent time for SI quantities.
///
/// # Errors
///
/// Same conditions as [`descent::compute_descent_time`].
pub fn descent_time(height: Length, velocity: Velocity) -> DescentResult<Time> {
    let t = descent::compute_descent_time(
        height.get::<meter>(),
        velocity.get::<meter_per_second>(),
    )?;
    Ok(Time::new::<second>(t))
}

/// Required pulling force for SI quantities.
///
/// # Errors
///
/// Same conditions as [`descent::try_compute_required_force`].
pub fn required_force(
    friction_coefficient: f64,
    mass: Mass,
    gravity: Acceleration,
) -> DescentResult<Force> {
    let f = descent::try_compute_required_force(
        friction_coefficient,
        mass.get::<kilogram>(),
        gravity.get::<meter_per_second_squared>(),
    )?;
    Ok(Force::new::<newton>(f))
}
