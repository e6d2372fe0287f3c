//! Equation-driven demos.
//!
//! Each demo pairs a closed-form equation with a stepped simulation and
//! reports whether the simulation still agrees with the equation:
//!
//! 1. **Equation** - the governing formula
//! 2. **Implementation** - the stepped simulation
//! 3. **Verification** - simulation and formula agree within tolerance
//! 4. **Falsification** - conditions under which they stop agreeing
//!
//! # Demos
//!
//! 1. [`parachute`] - stepped fall converges to `√(2mg / ρAC_d)`
//! 2. [`friction_pull`] - pulling with `μmg` keeps a block at constant speed

pub mod friction_pull;
pub mod parachute;

pub use friction_pull::FrictionPullDemo;
pub use parachute::ParachuteDemo;

use serde::{Deserialize, Serialize};

/// Common trait for all demos.
pub trait EddDemo {
    /// Demo name for display.
    fn name(&self) -> &'static str;

    /// Advance the simulation by one timestep.
    fn step(&mut self, dt: f64);

    /// Check if the governing equation is currently verified.
    fn verify_equation(&self) -> bool;

    /// Get the current falsification status.
    fn get_falsification_status(&self) -> FalsificationStatus;

    /// Reset the demo to initial conditions.
    fn reset(&mut self);
}

/// Falsification status for a demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FalsificationStatus {
    /// Whether the equation is currently verified.
    pub verified: bool,
    /// List of falsification criteria and their status.
    pub criteria: Vec<CriterionStatus>,
    /// Overall message.
    pub message: String,
}

/// Status of a single falsification criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionStatus {
    /// Criterion ID (e.g., "PC-TERMINAL").
    pub id: String,
    /// Criterion name.
    pub name: String,
    /// Whether it passed.
    pub passed: bool,
    /// Current value.
    pub value: f64,
    /// Threshold for passing.
    pub threshold: f64,
}
