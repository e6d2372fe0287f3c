//! Time-stepped descent under quadratic drag.
//!
//! # Governing Equations
//!
//! ```text
//! Drag:         F_d = ½·ρ·v²·A·C_d
//! Acceleration: a   = (m·g − F_d) / m
//! Update:       v ← v + a·Δt,  y ← y + v·Δt   (semi-implicit Euler)
//! ```
//!
//! Released from rest, `v` rises monotonically toward the closed-form
//! terminal velocity `√(2·m·g / (ρ·A·C_d))`. At the floor the body stops:
//! position is clamped and velocity drops to zero.
//!
//! The canopy area is read on every step, so changing it mid-flight (a
//! slider moved while the animation runs) takes effect on the next step.
//! Opening a larger canopy above the new terminal velocity decelerates the
//! body toward it; no step ends faster than the step began unless it is
//! still below terminal velocity.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::engine::guard::DescentGuard;
use crate::error::{DescentError, DescentResult};
use crate::model::{compute_terminal_velocity, DescentParameters};

/// Snapshot of a descent run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentState {
    /// Position in render coordinates (grows downward).
    pub position: f64,
    /// Downward velocity.
    pub velocity: f64,
    /// Simulated time since release.
    pub elapsed: f64,
    /// Steps taken.
    pub step_count: u64,
    /// Whether the body has reached the floor.
    pub landed: bool,
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Still in the air.
    Falling {
        /// Position after the step.
        position: f64,
        /// Velocity after the step.
        velocity: f64,
    },
    /// Reached the floor on this step.
    Landed(LandingReport),
    /// Step requested after landing; nothing changed.
    AlreadyLanded,
}

/// Summary of a completed descent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingReport {
    /// Time from release to touchdown.
    pub elapsed: f64,
    /// Velocity just before touchdown.
    pub impact_velocity: f64,
    /// Steps taken.
    pub steps: u64,
}

/// Quadratic drag `½·ρ·v·|v|·A·C_d`, signed against the direction of motion.
#[must_use]
pub fn drag_force(params: &DescentParameters, velocity: f64) -> f64 {
    0.5 * params.air_density * velocity * velocity.abs() * params.area * params.drag_coefficient
}

/// Downward acceleration `(m·g − F_d) / m` at the given velocity.
#[must_use]
pub fn net_acceleration(params: &DescentParameters, velocity: f64) -> f64 {
    (params.mass * params.gravity - drag_force(params, velocity)) / params.mass
}

/// Stepped simulation of one parachute descent.
#[derive(Debug, Clone)]
pub struct DescentSimulation {
    config: SimulationConfig,
    state: DescentState,
    terminal_velocity: f64,
    guard: DescentGuard,
}

impl DescentSimulation {
    /// Create a simulation at the release point, at rest.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation failure, if any.
    pub fn new(config: SimulationConfig) -> DescentResult<Self> {
        Self::with_guard(config, DescentGuard::default())
    }

    /// Create a simulation with a custom guard.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation failure, if any.
    pub fn with_guard(config: SimulationConfig, guard: DescentGuard) -> DescentResult<Self> {
        config.check()?;
        let terminal_velocity = Self::terminal_velocity_for(&config)?;
        let state = Self::initial_state(&config);
        Ok(Self {
            config,
            state,
            terminal_velocity,
            guard,
        })
    }

    fn terminal_velocity_for(config: &SimulationConfig) -> DescentResult<f64> {
        compute_terminal_velocity(
            config.mass,
            config.gravity,
            config.air_density,
            config.area,
            config.drag_coefficient,
        )
    }

    const fn initial_state(config: &SimulationConfig) -> DescentState {
        DescentState {
            position: config.start_position,
            velocity: 0.0,
            elapsed: 0.0,
            step_count: 0,
            landed: false,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> DescentState {
        self.state
    }

    /// Restore a previously captured snapshot.
    pub fn restore(&mut self, state: DescentState) {
        self.state = state;
    }

    /// Closed-form terminal velocity for the current area.
    #[must_use]
    pub const fn terminal_velocity(&self) -> f64 {
        self.terminal_velocity
    }

    /// Fraction of the drop covered, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.config.descent_height <= 0.0 {
            return 1.0;
        }
        ((self.state.position - self.config.start_position) / self.config.descent_height)
            .clamp(0.0, 1.0)
    }

    /// Rendered canopy width for the current area.
    #[must_use]
    pub fn canopy_width(&self) -> f64 {
        self.config.canopy_width()
    }

    /// Whether the body has reached the floor.
    #[must_use]
    pub const fn is_landed(&self) -> bool {
        self.state.landed
    }

    /// Change the canopy area; applies from the next step.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Domain`] if the area is not an offered option.
    pub fn set_area(&mut self, area: f64) -> DescentResult<()> {
        let config = self.config.with_area(area)?;
        self.terminal_velocity = Self::terminal_velocity_for(&config)?;
        self.config = config;
        debug!(area, terminal_velocity = self.terminal_velocity, "area changed");
        Ok(())
    }

    /// Drag force at the given velocity (opposes motion).
    #[must_use]
    pub fn drag_force(&self, velocity: f64) -> f64 {
        drag_force(&self.config.descent_parameters(), velocity)
    }

    /// Advance by one timestep.
    ///
    /// # Errors
    ///
    /// Returns a guard violation if the new state is non-finite or
    /// overspeeds.
    pub fn step(&mut self) -> DescentResult<StepOutcome> {
        if self.state.landed {
            return Ok(StepOutcome::AlreadyLanded);
        }

        let dt = self.config.timestep.dt;
        let acceleration = net_acceleration(&self.config.descent_parameters(), self.state.velocity);

        let mut next = self.state;
        next.velocity += acceleration * dt;
        next.position += next.velocity * dt;
        next.elapsed += dt;
        next.step_count += 1;

        // Above v_t (after a larger canopy opened) drag may only slow the body
        let speed_limit = self.terminal_velocity.max(self.state.velocity);
        self.guard.check(&next, speed_limit)?;

        let floor = self.config.floor_position();
        if next.position >= floor {
            let report = LandingReport {
                elapsed: next.elapsed,
                impact_velocity: next.velocity,
                steps: next.step_count,
            };
            next.position = floor;
            next.velocity = 0.0;
            next.landed = true;
            self.state = next;
            info!(
                elapsed = report.elapsed,
                impact_velocity = report.impact_velocity,
                steps = report.steps,
                "landed"
            );
            return Ok(StepOutcome::Landed(report));
        }

        self.state = next;
        Ok(StepOutcome::Falling {
            position: next.position,
            velocity: next.velocity,
        })
    }

    /// Step until landing.
    ///
    /// # Errors
    ///
    /// Returns a guard violation, or [`DescentError::Config`] if the body
    /// has not landed within `timestep.max_steps`.
    pub fn run_to_landing(&mut self) -> DescentResult<LandingReport> {
        let max_steps = self.config.timestep.max_steps;
        while self.state.step_count < max_steps {
            match self.step()? {
                StepOutcome::Landed(report) => return Ok(report),
                StepOutcome::AlreadyLanded => {
                    return Ok(LandingReport {
                        elapsed: self.state.elapsed,
                        impact_velocity: 0.0,
                        steps: self.state.step_count,
                    })
                }
                StepOutcome::Falling { .. } => {}
            }
        }
        Err(DescentError::config(format!(
            "descent did not land within {max_steps} steps"
        )))
    }

    /// Return to the release point, at rest. The selected area is kept.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
    }
}
