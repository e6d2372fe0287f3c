//! Demo 2: Friction Pull
//!
//! # Governing Equations
//!
//! ```text
//! Kinetic friction: F_f = μ·m·g
//! Motion:           a   = (F − F_f) / m     while sliding
//! ```
//!
//! # EDD Cycle
//!
//! 1. **Equation**: pulling with exactly F = μ·m·g gives zero net force
//! 2. **Implementation**: explicit Euler on the block's velocity
//! 3. **Verification**: the block keeps its initial speed
//! 4. **Falsification**: pulling with less than μ·m·g stops the block

use super::{CriterionStatus, EddDemo, FalsificationStatus};
use crate::config::SimulationConfig;
use crate::error::DescentResult;
use crate::model::{FrictionSurface, PullOutcome};
use serde::{Deserialize, Serialize};

/// Block pulled across a surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrictionPullDemo {
    /// Surface under the block.
    pub surface: FrictionSurface,
    /// Block mass.
    pub mass: f64,
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Force applied along the surface.
    pub applied_force: f64,
    /// Current velocity (never negative; friction cannot reverse motion).
    pub velocity: f64,
    /// Distance travelled.
    pub position: f64,
    /// Current simulation time.
    pub time: f64,
    /// Speed at start.
    pub initial_velocity: f64,
    /// Number of steps taken.
    pub step_count: u64,
    /// Relative speed tolerance.
    pub tolerance: f64,
}

impl FrictionPullDemo {
    /// Create a demo pulled with exactly the required force.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a non-positive mass or gravity.
    pub fn new(config: &SimulationConfig) -> DescentResult<Self> {
        let PullOutcome {
            surface,
            required_force_newtons,
        } = config.friction_parameters().evaluate()?;
        Ok(Self {
            surface,
            mass: config.mass,
            gravity: config.gravity,
            applied_force: required_force_newtons,
            velocity: 0.2,
            position: 0.0,
            time: 0.0,
            initial_velocity: 0.2,
            step_count: 0,
            tolerance: 1e-9,
        })
    }

    /// Friction force opposing a sliding block.
    #[must_use]
    pub fn friction_force(&self) -> f64 {
        self.surface.coefficient() * self.mass * self.gravity
    }

    /// Change the pulling force.
    pub fn set_applied_force(&mut self, force: f64) {
        self.applied_force = force;
    }

    /// Move to another surface, keeping the applied force.
    pub fn set_surface(&mut self, surface: FrictionSurface) {
        self.surface = surface;
    }

    /// Relative change of speed since the start.
    #[must_use]
    pub fn speed_drift(&self) -> f64 {
        (self.velocity - self.initial_velocity).abs() / self.initial_velocity.max(1.0)
    }

    /// Whether the block is at rest.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.velocity <= 0.0
    }
}

impl EddDemo for FrictionPullDemo {
    fn name(&self) -> &'static str {
        "Friction Pull"
    }

    fn step(&mut self, dt: f64) {
        let net = self.applied_force - self.friction_force();
        // A resting block only moves once the pull beats friction
        if self.is_static() && net <= 0.0 {
            self.velocity = 0.0;
        } else {
            self.velocity = (self.velocity + net / self.mass * dt).max(0.0);
        }
        self.position += self.velocity * dt;
        self.time += dt;
        self.step_count += 1;
    }

    fn verify_equation(&self) -> bool {
        self.speed_drift() <= self.tolerance
    }

    fn get_falsification_status(&self) -> FalsificationStatus {
        let drift = self.speed_drift();
        let passed = drift <= self.tolerance;

        FalsificationStatus {
            verified: passed,
            criteria: vec![CriterionStatus {
                id: "FP-CONSTANT-SPEED".to_string(),
                name: "Required force keeps speed constant".to_string(),
                passed,
                value: drift,
                threshold: self.tolerance,
            }],
            message: if passed {
                format!(
                    "Constant speed on {}: F = {:.2} N",
                    self.surface, self.applied_force
                )
            } else {
                format!(
                    "FALSIFIED: speed drift = {drift:.2e} with F = {:.2} N vs friction {:.2} N",
                    self.applied_force,
                    self.friction_force()
                )
            },
        }
    }

    fn reset(&mut self) {
        self.velocity = self.initial_velocity;
        self.position = 0.0;
        self.time = 0.0;
        self.step_count = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn block() -> FrictionPullDemo {
        FrictionPullDemo::new(&SimulationConfig::friction_block()).expect("valid preset")
    }

    #[test]
    fn test_equation_required_force() {
        let demo = block();
        assert!((demo.applied_force - 0.25 * 0.5 * 9.81).abs() < 1e-12);
        assert!((demo.applied_force - demo.friction_force()).abs() < 1e-12);
    }

    #[test]
    fn test_required_force_keeps_speed() {
        let mut demo = block();
        for _ in 0..1000 {
            demo.step(0.01);
        }
        assert!(demo.verify_equation(), "drift = {}", demo.speed_drift());
        assert!((demo.position - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_falsification_weak_pull_stops_block() {
        let mut demo = block();
        demo.set_applied_force(demo.friction_force() * 0.5);
        for _ in 0..1000 {
            demo.step(0.01);
        }
        assert!(demo.is_static());
        let status = demo.get_falsification_status();
        assert!(!status.verified);
        assert!(status.message.contains("FALSIFIED"));
    }

    #[test]
    fn test_strong_pull_accelerates() {
        let mut demo = block();
        demo.set_applied_force(demo.friction_force() * 2.0);
        demo.step(0.1);
        assert!(demo.velocity > demo.initial_velocity);
        assert!(!demo.verify_equation());
    }

    #[test]
    fn test_rougher_surface_needs_more_force() {
        let mut demo = block();
        demo.set_surface(FrictionSurface::Carpet);
        demo.step(0.5);
        assert!(demo.velocity < demo.initial_velocity);
    }

    #[test]
    fn test_resting_block_stays_put_under_weak_pull() {
        let mut demo = block();
        demo.velocity = 0.0;
        demo.set_applied_force(demo.friction_force() * 0.9);
        demo.step(0.1);
        assert!(demo.is_static());
        assert!(demo.position.abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut demo = block();
        demo.set_applied_force(0.0);
        demo.step(1.0);
        demo.reset();
        assert!((demo.velocity - 0.2).abs() < f64::EPSILON);
        assert_eq!(demo.step_count, 0);
        assert_eq!(demo.name(), "Friction Pull");
    }
}
