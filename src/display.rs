//! Formatting of model results for display.
//!
//! Values are shown with two decimals. Anything that is not a finite
//! number, or a computation that failed, renders as [`SENTINEL`] so that
//! `NaN` and `inf` never reach a label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DescentResult;

/// Text shown in place of an invalid result.
pub const SENTINEL: &str = "--";

/// A value ready to be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DisplayValue {
    /// A finite number.
    Value(f64),
    /// No valid result.
    Invalid,
}

impl DisplayValue {
    /// Wrap a raw number; non-finite numbers become `Invalid`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Invalid
        }
    }

    /// Wrap a computation result; errors become `Invalid`.
    #[must_use]
    pub fn from_result(result: &DescentResult<f64>) -> Self {
        match result {
            Ok(value) => Self::from_f64(*value),
            Err(_) => Self::Invalid,
        }
    }

    /// The number, if valid.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Invalid => None,
        }
    }

    /// Format with a unit suffix, e.g. `"14.79 s"`.
    #[must_use]
    pub fn with_unit(self, unit: &str) -> String {
        match self {
            Self::Value(_) => format!("{self} {unit}"),
            Self::Invalid => SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::Invalid => f.write_str(SENTINEL),
        }
    }
}

/// Format a number with two decimals, or the sentinel if it is not finite.
#[must_use]
pub fn format_two_decimals(value: f64) -> String {
    DisplayValue::from_f64(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DescentError;

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_two_decimals(14.7928), "14.79");
        assert_eq!(format_two_decimals(1.226_25), "1.23");
        assert_eq!(format_two_decimals(0.0), "0.00");
    }

    #[test]
    fn test_non_finite_is_sentinel() {
        assert_eq!(format_two_decimals(f64::NAN), SENTINEL);
        assert_eq!(format_two_decimals(f64::INFINITY), SENTINEL);
        assert_eq!(format_two_decimals(f64::NEG_INFINITY), SENTINEL);
    }

    #[test]
    fn test_from_result() {
        let ok: DescentResult<f64> = Ok(33.8);
        assert_eq!(DisplayValue::from_result(&ok), DisplayValue::Value(33.8));

        let err: DescentResult<f64> = Err(DescentError::domain("area", 0.0, "must be positive"));
        assert_eq!(DisplayValue::from_result(&err), DisplayValue::Invalid);
        assert_eq!(DisplayValue::from_result(&err).to_string(), "--");
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(DisplayValue::Value(26.503).with_unit("s"), "26.50 s");
        assert_eq!(DisplayValue::Invalid.with_unit("s"), "--");
    }

    #[test]
    fn test_value_accessor() {
        assert_eq!(DisplayValue::Value(2.0).value(), Some(2.0));
        assert_eq!(DisplayValue::Invalid.value(), None);
    }
}
