//! Descent model: the closed-form physics behind every scenario.
//!
//! - [`descent`]: terminal velocity, descent time, pulling force, pixel mapping
//! - [`surface`]: friction coefficient lookup table
//! - [`units`]: the same formulas over `uom` quantities

pub mod descent;
pub mod surface;
pub mod units;

pub use descent::{
    compute_descent_time, compute_required_force, compute_terminal_velocity,
    map_value_to_pixel_size, try_compute_required_force, DescentOutcome, DescentParameters,
    FrictionParameters, PullOutcome,
};
pub use surface::FrictionSurface;
