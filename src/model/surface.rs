//! Kinetic friction lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DescentError;

/// Surface a block can be pulled across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrictionSurface {
    /// Smooth plastic (μ = 0.1).
    Plastic,
    /// Sheet metal (μ = 0.25).
    #[default]
    Metal,
    /// Sandpaper (μ = 0.5).
    Sandpaper,
    /// Carpet (μ = 0.8).
    Carpet,
}

impl FrictionSurface {
    /// Every surface, ordered by increasing coefficient.
    pub const ALL: [Self; 4] = [Self::Plastic, Self::Metal, Self::Sandpaper, Self::Carpet];

    /// Kinetic friction coefficient for this surface.
    #[must_use]
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Plastic => 0.1,
            Self::Metal => 0.25,
            Self::Sandpaper => 0.5,
            Self::Carpet => 0.8,
        }
    }

    /// Lookup key used by UI controls.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Metal => "metal",
            Self::Sandpaper => "sandpaper",
            Self::Carpet => "carpet",
        }
    }
}

impl fmt::Display for FrictionSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FrictionSurface {
    type Err = DescentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|surface| surface.key() == key)
            .ok_or_else(|| DescentError::UnknownSurface(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table() {
        assert!((FrictionSurface::Plastic.coefficient() - 0.1).abs() < f64::EPSILON);
        assert!((FrictionSurface::Metal.coefficient() - 0.25).abs() < f64::EPSILON);
        assert!((FrictionSurface::Sandpaper.coefficient() - 0.5).abs() < f64::EPSILON);
        assert!((FrictionSurface::Carpet.coefficient() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_is_sorted_by_coefficient() {
        let coefficients: Vec<f64> = FrictionSurface::ALL.iter().map(|s| s.coefficient()).collect();
        assert!(coefficients.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("metal".parse::<FrictionSurface>().unwrap(), FrictionSurface::Metal);
        assert_eq!(" Carpet ".parse::<FrictionSurface>().unwrap(), FrictionSurface::Carpet);
        for surface in FrictionSurface::ALL {
            assert_eq!(surface.key().parse::<FrictionSurface>().unwrap(), surface);
        }
    }

    #[test]
    fn test_parse_unknown_key() {
        let err = "ice".parse::<FrictionSurface>().unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&FrictionSurface::Sandpaper).unwrap();
        assert_eq!(json, "\"sandpaper\"");
        let surface: FrictionSurface = serde_yaml::from_str("plastic").unwrap();
        assert_eq!(surface, FrictionSurface::Plastic);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrictionSurface::Metal.to_string(), "metal");
    }
}
