//! # descent
//!
//! Parachute descent and friction-pull physics for educational animations.
//!
//! - Closed-form models: terminal velocity, descent time, required pull
//!   force, value-to-pixel mapping
//! - Stepped drag integration that lands on a floor
//! - Explicit animation state (start/stop/reset, one completion timer)
//! - Equation-driven demos that check the stepped model against the formulas
//!
//! ## Example
//!
//! ```rust
//! use descent::prelude::*;
//!
//! let config = SimulationConfig::builder()
//!     .area(3.0)
//!     .build();
//! let outcome = config.descent_parameters().evaluate().unwrap();
//! assert_eq!(format_two_decimals(outcome.terminal_velocity), "18.87");
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
)]

pub mod config;
pub mod demos;
pub mod display;
pub mod engine;
pub mod error;
pub mod model;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{Scenario, SimulationConfig, SimulationConfigBuilder};
    pub use crate::demos::{EddDemo, FrictionPullDemo, ParachuteDemo};
    pub use crate::display::{format_two_decimals, DisplayValue, SENTINEL};
    pub use crate::engine::{
        AnimationPhase, AnimationState, DescentSimulation, SimTime, StartOutcome, StepOutcome,
    };
    pub use crate::error::{DescentError, DescentResult};
    pub use crate::model::{
        compute_descent_time, compute_required_force, compute_terminal_velocity,
        map_value_to_pixel_size, DescentParameters, FrictionSurface,
    };
}

/// Re-export for public API
pub use error::{DescentError, DescentResult};

/// Crate version and build hash, as embedded by the build script.
#[must_use]
pub fn version() -> String {
    format!(
        "{} ({})",
        env!("DESCENT_VERSION"),
        env!("DESCENT_GIT_HASH")
    )
}
