//! Scenario configuration with YAML schema and validation.
//!
//! One [`SimulationConfig`] parameterizes every scenario: the parachute
//! drop, the canvas toy soldier and the friction block differ only in
//! their constants. Validation runs in two passes:
//! - Schema: serde types plus `validator` ranges
//! - Semantic: the physics formulas must accept the values

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

use crate::error::{DescentError, DescentResult};
use crate::model::{
    map_value_to_pixel_size, DescentParameters, FrictionParameters, FrictionSurface,
};
use crate::model::units::{SEA_LEVEL_AIR_DENSITY, STANDARD_GRAVITY};

/// Tolerance when matching a selected area against the offered options.
const AREA_MATCH_TOLERANCE: f64 = 1e-9;

/// Which physical situation the configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Object falling under a canopy.
    #[default]
    Parachute,
    /// Block pulled across a surface.
    Friction,
}

/// Top-level scenario configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Scenario kind.
    #[serde(default)]
    pub scenario: Scenario,

    /// Falling or sliding mass.
    #[validate(range(min = 0.0))]
    pub mass: f64,

    /// Gravitational acceleration.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Air density.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_air_density")]
    pub air_density: f64,

    /// Drag coefficient of the canopy.
    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,

    /// Currently selected canopy area.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_area")]
    pub area: f64,

    /// Discrete area choices offered to the user. Empty accepts any area.
    #[serde(default)]
    pub area_options: Vec<f64>,

    /// Distance from release to the ground.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_descent_height")]
    pub descent_height: f64,

    /// Position of the release point in render coordinates.
    #[serde(default)]
    pub start_position: f64,

    /// Surface for the friction scenario.
    #[serde(default)]
    pub surface: FrictionSurface,

    /// Stepping configuration for the time-stepped simulation.
    #[validate(nested)]
    #[serde(default)]
    pub timestep: TimestepConfig,

    /// Area to canopy-width mapping for rendering.
    #[validate(nested)]
    #[serde(default)]
    pub pixel_mapping: PixelMapping,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}

const fn default_air_density() -> f64 {
    SEA_LEVEL_AIR_DENSITY
}

const fn default_drag_coefficient() -> f64 {
    1.5
}

const fn default_area() -> f64 {
    3.0
}

const fn default_descent_height() -> f64 {
    500.0
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> DescentResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scenario");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> DescentResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> DescentResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn check(&self) -> DescentResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder starting from [`SimulationConfig::skydiver`].
    #[must_use]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Validate constraints the schema cannot express.
    fn validate_semantic(&self) -> DescentResult<()> {
        if self.area_options.iter().any(|a| !a.is_finite() || *a <= 0.0) {
            return Err(DescentError::config("area options must be positive"));
        }

        match self.scenario {
            Scenario::Parachute => {
                self.validate_area_selection(self.area)?;
                self.descent_parameters().evaluate()?;
            }
            Scenario::Friction => {
                self.friction_parameters().evaluate()?;
            }
        }

        let dt = self.timestep.dt;
        if dt <= 0.0 {
            return Err(DescentError::config("Timestep must be positive"));
        }
        if self.timestep.max_steps == 0 {
            return Err(DescentError::config("max_steps must be at least 1"));
        }

        Ok(())
    }

    /// Check that `area` is one of the offered options.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Domain`] if the area is not positive or is
    /// not in `area_options`.
    pub fn validate_area_selection(&self, area: f64) -> DescentResult<f64> {
        if !area.is_finite() || area <= 0.0 {
            return Err(DescentError::domain("area", area, "must be positive"));
        }
        if self.area_options.is_empty()
            || self
                .area_options
                .iter()
                .any(|option| (option - area).abs() <= AREA_MATCH_TOLERANCE)
        {
            Ok(area)
        } else {
            Err(DescentError::domain(
                "area",
                area,
                format!("not one of the offered options {:?}", self.area_options),
            ))
        }
    }

    /// Return a copy with a different selected area.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Domain`] if the area is not an offered option.
    pub fn with_area(&self, area: f64) -> DescentResult<Self> {
        let area = self.validate_area_selection(area)?;
        Ok(Self {
            area,
            ..self.clone()
        })
    }

    /// Parameters for the parachute formulas.
    #[must_use]
    pub const fn descent_parameters(&self) -> DescentParameters {
        DescentParameters {
            area: self.area,
            mass: self.mass,
            gravity: self.gravity,
            air_density: self.air_density,
            drag_coefficient: self.drag_coefficient,
            descent_height: self.descent_height,
        }
    }

    /// Parameters for the friction formula.
    #[must_use]
    pub const fn friction_parameters(&self) -> FrictionParameters {
        FrictionParameters {
            surface: self.surface,
            mass: self.mass,
            gravity: self.gravity,
        }
    }

    /// Rendered canopy width for the selected area.
    #[must_use]
    pub fn canopy_width(&self) -> f64 {
        self.pixel_mapping.map(self.area)
    }

    /// Position of the ground in render coordinates.
    #[must_use]
    pub fn floor_position(&self) -> f64 {
        self.start_position + self.descent_height
    }

    /// 100 kg skydiver, 3 m² canopy, 500 m drop at sea level.
    #[must_use]
    pub fn skydiver() -> Self {
        Self {
            schema_version: default_schema_version(),
            name: "Skydiver".to_string(),
            scenario: Scenario::Parachute,
            mass: 100.0,
            gravity: STANDARD_GRAVITY,
            air_density: SEA_LEVEL_AIR_DENSITY,
            drag_coefficient: 1.5,
            area: 3.0,
            area_options: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            descent_height: 500.0,
            start_position: 0.0,
            surface: FrictionSurface::default(),
            timestep: TimestepConfig {
                dt: 0.01,
                max_steps: 100_000,
            },
            pixel_mapping: PixelMapping {
                min_value: 1.0,
                max_value: 5.0,
                min_pixels: 40.0,
                max_pixels: 200.0,
            },
        }
    }

    /// Toy soldier on a 400 px canvas, units of pixels and frames.
    ///
    /// Released at y = 50 and landing at y = 300; canopy width is 1.5 px
    /// per unit of area.
    #[must_use]
    pub fn toy_soldier() -> Self {
        Self {
            schema_version: default_schema_version(),
            name: "Toy soldier".to_string(),
            scenario: Scenario::Parachute,
            mass: 10.0,
            gravity: 0.15,
            air_density: 0.01,
            drag_coefficient: 1.0,
            area: 50.0,
            area_options: (1..=10).map(|i| f64::from(i) * 10.0).collect(),
            descent_height: 250.0,
            start_position: 50.0,
            surface: FrictionSurface::default(),
            timestep: TimestepConfig {
                dt: 1.0,
                max_steps: 10_000,
            },
            pixel_mapping: PixelMapping {
                min_value: 0.0,
                max_value: 100.0,
                min_pixels: 0.0,
                max_pixels: 150.0,
            },
        }
    }

    /// Half-kilogram block on sheet metal.
    #[must_use]
    pub fn friction_block() -> Self {
        Self {
            name: "Friction block".to_string(),
            scenario: Scenario::Friction,
            mass: 0.5,
            surface: FrictionSurface::Metal,
            area_options: Vec::new(),
            ..Self::skydiver()
        }
    }

    /// Look up a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`DescentError::Config`] for an unknown preset name.
    pub fn preset(name: &str) -> DescentResult<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "skydiver" => Ok(Self::skydiver()),
            "toy-soldier" => Ok(Self::toy_soldier()),
            "friction-block" => Ok(Self::friction_block()),
            other => Err(DescentError::config(format!("unknown preset '{other}'"))),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::skydiver()
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    base: Option<SimulationConfig>,
    area: Option<f64>,
    mass: Option<f64>,
    drag_coefficient: Option<f64>,
    descent_height: Option<f64>,
    surface: Option<FrictionSurface>,
    timestep: Option<f64>,
}

impl SimulationConfigBuilder {
    /// Start from a preset instead of the skydiver defaults.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // SimulationConfig owns heap data
    pub fn base(mut self, config: SimulationConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Set the canopy area.
    #[must_use]
    pub const fn area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    /// Set the mass.
    #[must_use]
    pub const fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Set the drag coefficient.
    #[must_use]
    pub const fn drag_coefficient(mut self, cd: f64) -> Self {
        self.drag_coefficient = Some(cd);
        self
    }

    /// Set the descent height.
    #[must_use]
    pub const fn descent_height(mut self, height: f64) -> Self {
        self.descent_height = Some(height);
        self
    }

    /// Set the friction surface.
    #[must_use]
    pub const fn surface(mut self, surface: FrictionSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Set the timestep.
    #[must_use]
    pub const fn timestep(mut self, dt: f64) -> Self {
        self.timestep = Some(dt);
        self
    }

    /// Build the configuration without validating it.
    #[must_use]
    pub fn build(self) -> SimulationConfig {
        let mut config = self.base.unwrap_or_default();

        if let Some(area) = self.area {
            config.area = area;
        }
        if let Some(mass) = self.mass {
            config.mass = mass;
        }
        if let Some(cd) = self.drag_coefficient {
            config.drag_coefficient = cd;
        }
        if let Some(height) = self.descent_height {
            config.descent_height = height;
        }
        if let Some(surface) = self.surface {
            config.surface = surface;
        }
        if let Some(dt) = self.timestep {
            config.timestep.dt = dt;
        }

        config
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn try_build(self) -> DescentResult<SimulationConfig> {
        let config = self.build();
        config.check()?;
        Ok(config)
    }
}

/// Timestep configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct TimestepConfig {
    /// Fixed timestep (seconds, or frames for canvas presets).
    #[validate(range(min = 0.000_001, max = 1.0))]
    #[serde(default = "default_timestep")]
    pub dt: f64,
    /// Step limit before a run is abandoned.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

const fn default_timestep() -> f64 {
    0.01
}

const fn default_max_steps() -> u64 {
    100_000
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            dt: default_timestep(),
            max_steps: default_max_steps(),
        }
    }
}

/// Linear value-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct PixelMapping {
    /// Value mapped to `min_pixels`.
    pub min_value: f64,
    /// Value mapped to `max_pixels`.
    pub max_value: f64,
    /// Smallest rendered size.
    #[validate(range(min = 0.0))]
    pub min_pixels: f64,
    /// Largest rendered size.
    #[validate(range(min = 0.0))]
    pub max_pixels: f64,
}

impl PixelMapping {
    /// Map a value to pixels, clamped to the pixel range.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        map_value_to_pixel_size(
            value,
            self.min_value,
            self.max_value,
            self.min_pixels,
            self.max_pixels,
        )
    }
}

impl Default for PixelMapping {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 10.0,
            min_pixels: 20.0,
            max_pixels: 200.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.scenario, Scenario::Parachute);
        assert!((config.mass - 100.0).abs() < f64::EPSILON);
        assert!((config.timestep.dt - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SimulationConfig::skydiver(),
            SimulationConfig::toy_soldier(),
            SimulationConfig::friction_block(),
        ] {
            assert!(config.check().is_ok(), "preset {} invalid", config.name);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            SimulationConfig::preset("toy_soldier").unwrap(),
            SimulationConfig::toy_soldier()
        );
        assert_eq!(
            SimulationConfig::preset("Friction-Block").unwrap().scenario,
            Scenario::Friction
        );
        assert!(SimulationConfig::preset("rocket").is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::builder()
            .area(4.0)
            .mass(80.0)
            .timestep(0.05)
            .build();
        assert!((config.area - 4.0).abs() < f64::EPSILON);
        assert!((config.mass - 80.0).abs() < f64::EPSILON);
        assert!((config.timestep.dt - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_from_base() {
        let config = SimulationConfig::builder()
            .base(SimulationConfig::friction_block())
            .surface(FrictionSurface::Carpet)
            .build();
        assert_eq!(config.scenario, Scenario::Friction);
        assert_eq!(config.surface, FrictionSurface::Carpet);
    }

    #[test]
    fn test_try_build_rejects_unoffered_area() {
        let result = SimulationConfig::builder().area(2.5).try_build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_yaml_parse() {
        let yaml = r"
name: Test drop
mass: 100.0
area: 3.0
area_options: [1.0, 3.0]
descent_height: 500.0
";
        let config = SimulationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, "Test drop");
        assert!((config.air_density - 1.225).abs() < f64::EPSILON);
        assert!((config.gravity - 9.81).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_yaml_friction() {
        let yaml = r"
scenario: friction
mass: 0.5
surface: sandpaper
";
        let config = SimulationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.surface, FrictionSurface::Sandpaper);
        let outcome = config.friction_parameters().evaluate().unwrap();
        assert!((outcome.required_force_newtons - 2.4525).abs() < 1e-9);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
mass: 100.0
parachute_colour: orange
";
        assert!(SimulationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_zero_area() {
        let yaml = r"
mass: 100.0
area: 0.0
";
        let err = SimulationConfig::from_yaml(yaml).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_config_rejects_negative_mass() {
        let yaml = r"
mass: -5.0
";
        assert!(SimulationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_large_timestep() {
        let yaml = r"
mass: 100.0
timestep:
  dt: 5.0
";
        assert!(SimulationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_area_selection() {
        let config = SimulationConfig::skydiver();
        assert!(config.validate_area_selection(4.0).is_ok());
        assert!(config.validate_area_selection(4.5).is_err());
        assert!(config.validate_area_selection(-1.0).is_err());

        let open = SimulationConfig {
            area_options: Vec::new(),
            ..SimulationConfig::skydiver()
        };
        assert!(open.validate_area_selection(4.5).is_ok());
    }

    #[test]
    fn test_with_area() {
        let config = SimulationConfig::skydiver().with_area(5.0).unwrap();
        assert!((config.area - 5.0).abs() < f64::EPSILON);
        assert!(SimulationConfig::skydiver().with_area(7.0).is_err());
    }

    #[test]
    fn test_canopy_width() {
        let soldier = SimulationConfig::toy_soldier();
        assert!((soldier.canopy_width() - 75.0).abs() < 1e-9);
        assert!((soldier.floor_position() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_yaml_roundtrip_preserves_preset() {
        let config = SimulationConfig::toy_soldier();
        let yaml = config.to_yaml().unwrap();
        let restored = SimulationConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimulationConfig::load("/nonexistent/descent.yaml").unwrap_err();
        assert!(matches!(err, DescentError::Io(_)));
    }
}
