//! Closed-form descent and friction formulas.
//!
//! # Governing Equations
//!
//! ```text
//! Terminal velocity: v_t = √(2·m·g / (ρ·A·C_d))
//! Descent time:      t   = h / v
//! Pulling force:     F   = μ·m·g
//! ```
//!
//! Every function is pure: same inputs, same output, no state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DescentError, DescentResult};
use crate::model::surface::FrictionSurface;

fn require_finite(parameter: &'static str, value: f64) -> DescentResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DescentError::domain(parameter, value, "must be finite"))
    }
}

fn require_positive(parameter: &'static str, value: f64) -> DescentResult<f64> {
    let value = require_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DescentError::domain(parameter, value, "must be positive"))
    }
}

/// Compute terminal velocity: `√(2·m·g / (ρ·A·C_d))`.
///
/// # Errors
///
/// Returns [`DescentError::Domain`] if any input is non-finite, or if
/// mass, gravity, air density, area or drag coefficient is not positive.
pub fn compute_terminal_velocity(
    mass: f64,
    gravity: f64,
    air_density: f64,
    area: f64,
    drag_coefficient: f64,
) -> DescentResult<f64> {
    let mass = require_positive("mass", mass)?;
    let gravity = require_positive("gravity", gravity)?;
    let air_density = require_positive("air_density", air_density)?;
    let area = require_positive("area", area)?;
    let drag_coefficient = require_positive("drag_coefficient", drag_coefficient)?;

    let resistance = air_density * area * drag_coefficient;
    let velocity = ((2.0 * mass * gravity) / resistance).sqrt();

    // Subnormal resistance can still overflow the quotient
    if !velocity.is_finite() {
        return Err(DescentError::domain(
            "area",
            area,
            "drag term too small, velocity overflows",
        ));
    }

    debug!(mass, gravity, air_density, area, drag_coefficient, velocity, "terminal velocity");
    Ok(velocity)
}

/// Compute descent time at constant velocity: `h / v`.
///
/// # Errors
///
/// Returns [`DescentError::Domain`] if velocity is not positive or height
/// is negative or non-finite.
pub fn compute_descent_time(height: f64, velocity: f64) -> DescentResult<f64> {
    let height = require_finite("height", height)?;
    if height < 0.0 {
        return Err(DescentError::domain("height", height, "must not be negative"));
    }
    let velocity = require_positive("velocity", velocity)?;
    Ok(height / velocity)
}

/// Compute the force needed to slide a block at constant speed: `μ·m·g`.
///
/// Unchecked; see [`try_compute_required_force`] for validated input.
#[must_use]
pub fn compute_required_force(friction_coefficient: f64, mass: f64, gravity: f64) -> f64 {
    friction_coefficient * mass * gravity
}

/// Checked variant of [`compute_required_force`].
///
/// # Errors
///
/// Returns [`DescentError::Domain`] for a negative coefficient, a
/// non-positive mass or gravity, or any non-finite input.
pub fn try_compute_required_force(
    friction_coefficient: f64,
    mass: f64,
    gravity: f64,
) -> DescentResult<f64> {
    let friction_coefficient = require_finite("friction_coefficient", friction_coefficient)?;
    if friction_coefficient < 0.0 {
        return Err(DescentError::domain(
            "friction_coefficient",
            friction_coefficient,
            "must not be negative",
        ));
    }
    let mass = require_positive("mass", mass)?;
    let gravity = require_positive("gravity", gravity)?;
    Ok(compute_required_force(friction_coefficient, mass, gravity))
}

/// Map `value` from `[min_value, max_value]` onto `[min_pixels, max_pixels]`.
///
/// Inputs outside the value range clamp to the pixel bounds. A degenerate
/// value range (`max_value <= min_value`) acts as a step at `min_value`.
/// `NaN` maps to `min_pixels`.
#[must_use]
pub fn map_value_to_pixel_size(
    value: f64,
    min_value: f64,
    max_value: f64,
    min_pixels: f64,
    max_pixels: f64,
) -> f64 {
    if value.is_nan() || value <= min_value {
        return min_pixels;
    }
    if value >= max_value {
        return max_pixels;
    }
    let fraction = (value - min_value) / (max_value - min_value);
    let pixels = min_pixels + fraction * (max_pixels - min_pixels);
    let (low, high) = (min_pixels.min(max_pixels), min_pixels.max(max_pixels));
    if pixels < low {
        low
    } else if pixels > high {
        high
    } else {
        pixels
    }
}

/// Inputs for the parachute descent computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentParameters {
    /// Canopy area (m², or canvas units squared).
    pub area: f64,
    /// Falling mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Air density (kg/m³).
    pub air_density: f64,
    /// Dimensionless drag coefficient.
    pub drag_coefficient: f64,
    /// Height to descend (m).
    pub descent_height: f64,
}

impl DescentParameters {
    /// Evaluate terminal velocity and total descent time.
    ///
    /// # Errors
    ///
    /// Propagates any [`DescentError::Domain`] from the formulas.
    pub fn evaluate(&self) -> DescentResult<DescentOutcome> {
        let terminal_velocity = compute_terminal_velocity(
            self.mass,
            self.gravity,
            self.air_density,
            self.area,
            self.drag_coefficient,
        )?;
        let total_time_seconds = compute_descent_time(self.descent_height, terminal_velocity)?;
        Ok(DescentOutcome {
            terminal_velocity,
            total_time_seconds,
        })
    }
}

/// Derived result of a parachute computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentOutcome {
    /// Terminal velocity.
    pub terminal_velocity: f64,
    /// Time to cover the descent height at terminal velocity.
    pub total_time_seconds: f64,
}

/// Inputs for the friction pull computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionParameters {
    /// Surface the block slides on.
    pub surface: FrictionSurface,
    /// Block mass (kg).
    pub mass: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
}

impl FrictionParameters {
    /// Evaluate the required pulling force.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Domain`] for a non-positive mass or gravity.
    pub fn evaluate(&self) -> DescentResult<PullOutcome> {
        let required_force_newtons =
            try_compute_required_force(self.surface.coefficient(), self.mass, self.gravity)?;
        debug!(surface = %self.surface, required_force_newtons, "required force");
        Ok(PullOutcome {
            surface: self.surface,
            required_force_newtons,
        })
    }
}

/// Derived result of a friction pull computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullOutcome {
    /// Surface the force was computed for.
    pub surface: FrictionSurface,
    /// Force needed to keep the block sliding (N).
    pub required_force_newtons: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn skydiver() -> DescentParameters {
        DescentParameters {
            area: 3.0,
            mass: 100.0,
            gravity: 9.81,
            air_density: 1.225,
            drag_coefficient: 1.5,
            descent_height: 500.0,
        }
    }

    #[test]
    fn test_equation_terminal_velocity() {
        // v = √(2·100·9.81 / (1.225·3·1.5)) = √(1962 / 5.5125)
        let v = compute_terminal_velocity(100.0, 9.81, 1.225, 3.0, 1.5).expect("valid");
        let expected = (1962.0_f64 / 5.5125).sqrt();
        assert!((v - expected).abs() < EPSILON);
        assert!((v - 18.866).abs() < 1e-3, "v = {v}");
    }

    #[test]
    fn test_skydiver_scenario() {
        let outcome = skydiver().evaluate().expect("valid");
        assert!((outcome.terminal_velocity - 18.866).abs() < 1e-3);
        assert!((outcome.total_time_seconds - 26.503).abs() < 1e-3);
        assert!(
            (outcome.total_time_seconds * outcome.terminal_velocity - 500.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_small_canopy_scenario() {
        // One square metre at C_d 1.4 gives ~33.8 m/s and ~14.79 s over 500 m
        let params = DescentParameters {
            area: 1.0,
            drag_coefficient: 1.4,
            ..skydiver()
        };
        let outcome = params.evaluate().expect("valid");
        assert!((outcome.terminal_velocity - 33.8).abs() < 0.05);
        assert!((outcome.total_time_seconds - 14.79).abs() < 0.01);
    }

    #[test]
    fn test_terminal_velocity_rejects_zero_area() {
        let err = compute_terminal_velocity(100.0, 9.81, 1.225, 0.0, 1.5).unwrap_err();
        assert!(err.is_domain_error());
        assert!(err.to_string().contains("area"));
    }

    #[test]
    fn test_terminal_velocity_rejects_negative_inputs() {
        for (mass, gravity, rho, area, cd) in [
            (-1.0, 9.81, 1.225, 3.0, 1.5),
            (100.0, -9.81, 1.225, 3.0, 1.5),
            (100.0, 9.81, -1.225, 3.0, 1.5),
            (100.0, 9.81, 1.225, -3.0, 1.5),
            (100.0, 9.81, 1.225, 3.0, 0.0),
        ] {
            let result = compute_terminal_velocity(mass, gravity, rho, area, cd);
            assert!(result.is_err(), "accepted {mass} {gravity} {rho} {area} {cd}");
        }
    }

    #[test]
    fn test_terminal_velocity_rejects_non_finite() {
        assert!(compute_terminal_velocity(f64::NAN, 9.81, 1.225, 3.0, 1.5).is_err());
        assert!(compute_terminal_velocity(100.0, f64::INFINITY, 1.225, 3.0, 1.5).is_err());
    }

    #[test]
    fn test_terminal_velocity_overflow_is_domain_error() {
        let err = compute_terminal_velocity(1e300, 1e10, 1e-300, 1e-300, 1e-10).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_descent_time() {
        let t = compute_descent_time(500.0, 25.0).expect("valid");
        assert!((t - 20.0).abs() < EPSILON);
        assert!((compute_descent_time(0.0, 5.0).expect("valid")).abs() < EPSILON);
    }

    #[test]
    fn test_descent_time_rejects_bad_input() {
        assert!(compute_descent_time(500.0, 0.0).is_err());
        assert!(compute_descent_time(500.0, -2.0).is_err());
        assert!(compute_descent_time(-1.0, 2.0).is_err());
        assert!(compute_descent_time(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_required_force_metal() {
        let force = compute_required_force(0.25, 0.5, 9.81);
        assert!((force - 1.226_25).abs() < EPSILON);
        assert_eq!(format!("{force:.2}"), "1.23");
    }

    #[test]
    fn test_try_required_force() {
        assert!(try_compute_required_force(0.25, 0.5, 9.81).is_ok());
        assert!(try_compute_required_force(0.0, 0.5, 9.81).is_ok());
        assert!(try_compute_required_force(-0.1, 0.5, 9.81).is_err());
        assert!(try_compute_required_force(0.25, 0.0, 9.81).is_err());
        assert!(try_compute_required_force(0.25, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_pixel_mapping_interpolates() {
        // Canopy width of the canvas demo: 1.5 px per unit of area
        let px = map_value_to_pixel_size(50.0, 0.0, 100.0, 0.0, 150.0);
        assert!((px - 75.0).abs() < EPSILON);
    }

    #[test]
    fn test_pixel_mapping_clamps() {
        assert!((map_value_to_pixel_size(-5.0, 0.0, 10.0, 20.0, 120.0) - 20.0).abs() < EPSILON);
        assert!((map_value_to_pixel_size(15.0, 0.0, 10.0, 20.0, 120.0) - 120.0).abs() < EPSILON);
        assert!((map_value_to_pixel_size(f64::NAN, 0.0, 10.0, 20.0, 120.0) - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_pixel_mapping_degenerate_range() {
        assert!((map_value_to_pixel_size(5.0, 5.0, 5.0, 10.0, 90.0) - 10.0).abs() < EPSILON);
        assert!((map_value_to_pixel_size(6.0, 5.0, 5.0, 10.0, 90.0) - 90.0).abs() < EPSILON);
    }

    #[test]
    fn test_friction_parameters_evaluate() {
        let params = FrictionParameters {
            surface: FrictionSurface::Metal,
            mass: 0.5,
            gravity: 9.81,
        };
        let outcome = params.evaluate().expect("valid");
        assert_eq!(outcome.surface, FrictionSurface::Metal);
        assert!((outcome.required_force_newtons - 1.226_25).abs() < EPSILON);
    }

    #[test]
    fn test_friction_parameters_reject_zero_mass() {
        let params = FrictionParameters {
            surface: FrictionSurface::Carpet,
            mass: 0.0,
            gravity: 9.81,
        };
        assert!(params.evaluate().is_err());
    }
}
