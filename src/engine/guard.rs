//! Stop-on-error inspection of the stepped simulation.
//!
//! Runs after every step. Two checks:
//!
//! 1. **Non-finite values**: NaN or Inf in position or velocity
//! 2. **Overspeed**: drag pulls speed toward terminal velocity and never
//!    past it, so a step may not end faster than the larger of terminal
//!    velocity and the speed it started from; exceeding that limit means
//!    the timestep is too coarse for the drag term
//!
//! Overspeed is graduated: within `warning_fraction` of the tolerance the
//! guard logs and continues, beyond the tolerance it stops the run.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::dynamics::DescentState;
use crate::error::{DescentError, DescentResult};

/// Severity of a guard finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationSeverity {
    /// Within tolerance.
    Acceptable,
    /// Approaching the tolerance (log, continue).
    Warning,
    /// Tolerance exceeded (stop).
    Critical,
    /// Non-finite state (stop).
    Fatal,
}

/// Guard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Check for NaN/Inf after every step.
    pub check_finite: bool,
    /// Check that speed stays at or below the speed limit.
    pub check_overspeed: bool,
    /// Allowed relative overshoot above the speed limit.
    pub overspeed_tolerance: f64,
    /// Warn once overshoot passes this fraction of the tolerance.
    pub warning_fraction: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            check_finite: true,
            check_overspeed: true,
            overspeed_tolerance: 1e-6,
            warning_fraction: 0.8,
        }
    }
}

/// Guard for a single descent run.
#[derive(Debug, Clone, Default)]
pub struct DescentGuard {
    config: GuardConfig,
}

impl DescentGuard {
    /// Create a guard with the given configuration.
    #[must_use]
    pub const fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Guard configuration.
    #[must_use]
    pub const fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Classify a relative overshoot above the speed limit.
    #[must_use]
    pub fn classify_overspeed(&self, overshoot: f64) -> ViolationSeverity {
        let tolerance = self.config.overspeed_tolerance;
        if !overshoot.is_finite() {
            ViolationSeverity::Fatal
        } else if overshoot > tolerance {
            ViolationSeverity::Critical
        } else if overshoot > tolerance * self.config.warning_fraction {
            ViolationSeverity::Warning
        } else {
            ViolationSeverity::Acceptable
        }
    }

    /// Inspect a state after a step.
    ///
    /// # Errors
    ///
    /// - `NonFiniteValue` if position or velocity is NaN/Inf
    /// - `ConstraintViolation` if speed exceeds `speed_limit` beyond
    ///   tolerance
    pub fn check(&self, state: &DescentState, speed_limit: f64) -> DescentResult<()> {
        if self.config.check_finite {
            Self::check_finite(state)?;
        }
        if self.config.check_overspeed {
            self.check_overspeed(state, speed_limit)?;
        }
        Ok(())
    }

    fn check_finite(state: &DescentState) -> DescentResult<()> {
        for (location, value) in [
            ("position", state.position),
            ("velocity", state.velocity),
            ("elapsed", state.elapsed),
        ] {
            if !value.is_finite() {
                warn!(location, value, "non-finite state");
                return Err(DescentError::NonFiniteValue {
                    location: location.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_overspeed(&self, state: &DescentState, speed_limit: f64) -> DescentResult<()> {
        let overshoot = (state.velocity - speed_limit) / speed_limit;
        match self.classify_overspeed(overshoot) {
            ViolationSeverity::Acceptable => Ok(()),
            ViolationSeverity::Warning => {
                warn!(overshoot, step = state.step_count, "approaching overspeed tolerance");
                Ok(())
            }
            ViolationSeverity::Critical | ViolationSeverity::Fatal => {
                warn!(overshoot, step = state.step_count, "overspeed, stopping run");
                Err(DescentError::ConstraintViolation {
                    name: "overspeed".to_string(),
                    violation: overshoot,
                    tolerance: self.config.overspeed_tolerance,
                })
            }
        }
    }
}
