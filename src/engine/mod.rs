//! Time-driven side of the model.
//!
//! - [`dynamics`]: per-step drag integration of a falling body
//! - [`guard`]: stop-on-error checks run after every step
//! - [`timer`]: the single delayed callback a presentation layer needs
//! - [`animation`]: explicit running/paused/landed state for a UI

pub mod animation;
pub mod dynamics;
pub mod guard;
pub mod timer;

use serde::{Deserialize, Serialize};

pub use animation::{AnimationPhase, AnimationState, StartOutcome};
pub use dynamics::{
    drag_force, net_acceleration, DescentSimulation, DescentState, LandingReport, StepOutcome,
};
pub use guard::{DescentGuard, GuardConfig};
pub use timer::{AnimationTimer, TimerId, TimerStatus};

use crate::error::{DescentError, DescentResult};

/// Simulation time representation.
///
/// Fixed-point nanoseconds so that timer deadlines compare exactly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct SimTime {
    /// Time in nanoseconds from simulation start.
    nanos: u64,
}

impl SimTime {
    /// Zero time (simulation start).
    pub const ZERO: Self = Self { nanos: 0 };

    /// Create time from seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Domain`] if seconds is negative, not finite,
    /// or too large to represent.
    pub fn from_secs(secs: f64) -> DescentResult<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(DescentError::domain(
                "seconds",
                secs,
                "time must be finite and non-negative",
            ));
        }
        let nanos = (secs * 1_000_000_000.0).round();
        if nanos >= u64::MAX as f64 {
            return Err(DescentError::domain("seconds", secs, "time out of range"));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nanos = nanos as u64;
        Ok(Self { nanos })
    }

    /// Create time from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    /// Create time from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Get time as seconds (f64).
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Get time as nanoseconds.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Subtract, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_sub(rhs.nanos),
        }
    }
}

impl std::ops::Add for SimTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos),
        }
    }
}

impl std::ops::Sub for SimTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl std::fmt::Display for SimTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}
