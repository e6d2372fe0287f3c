//! Error types for descent.
//!
//! Every fallible operation returns `Result<T, DescentError>`. Invalid
//! physical input is rejected before any arithmetic runs, so `NaN` and
//! `Infinity` never leave the model.

use thiserror::Error;

/// Result type alias for descent operations.
pub type DescentResult<T> = Result<T, DescentError>;

/// Unified error type for all descent operations.
#[derive(Debug, Error)]
pub enum DescentError {
    // ===== Domain Errors =====
    /// Invalid physical input (non-positive area, mass, density, ...).
    #[error("Domain error: {parameter} = {value} is invalid ({reason})")]
    Domain {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// Unknown friction surface key.
    #[error("Domain error: unknown friction surface '{0}'")]
    UnknownSurface(String),

    // ===== Guard Violations =====
    /// Stepped simulation produced NaN or Inf.
    #[error("Guard: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Physical bound exceeded during stepping.
    #[error("Guard: constraint '{name}' violated by {violation:.6e} (tolerance: {tolerance:.6e})")]
    ConstraintViolation {
        /// Name of the violated constraint.
        name: String,
        /// Amount of violation.
        violation: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DescentError {
    /// Create a domain error for a rejected parameter.
    #[must_use]
    pub fn domain(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::Domain {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was raised by the stepping guard (stop the run).
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. } | Self::ConstraintViolation { .. }
        )
    }

    /// Check if this error stems from invalid physical input.
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain { .. } | Self::UnknownSurface(_))
    }
}
