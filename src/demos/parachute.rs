//! Demo 1: Parachute Terminal Velocity
//!
//! # Governing Equations
//!
//! ```text
//! Drag:              F_d = ½·ρ·v²·A·C_d
//! Terminal velocity: v_t = √(2·m·g / (ρ·A·C_d))      (F_d = m·g)
//! ```
//!
//! # EDD Cycle
//!
//! 1. **Equation**: a falling body settles at v_t, from below or above
//! 2. **Implementation**: semi-implicit Euler on `a = g − F_d/m`
//! 3. **Verification**: |v − v_t| / v_t below tolerance, gap never grows
//! 4. **Falsification**: a timestep with `Δt·g / v_t > 1` overshoots and
//!    oscillates around v_t instead of approaching it

use super::{CriterionStatus, EddDemo, FalsificationStatus};
use crate::config::SimulationConfig;
use crate::engine::net_acceleration;
use crate::error::DescentResult;
use crate::model::DescentParameters;
use serde::{Deserialize, Serialize};

/// Parachute demo state. No floor: the body falls indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParachuteDemo {
    /// Physical parameters.
    pub params: DescentParameters,
    /// Closed-form terminal velocity for `params`.
    pub terminal_velocity: f64,
    /// Current downward velocity.
    pub velocity: f64,
    /// Distance fallen.
    pub distance: f64,
    /// Current simulation time.
    pub time: f64,
    /// Velocity at release.
    pub initial_velocity: f64,
    /// Largest increase of |v − v_t| seen in one step.
    pub max_gap_growth: f64,
    /// Number of steps taken.
    pub step_count: u64,
    /// Relative tolerance for convergence.
    pub tolerance: f64,
}

impl ParachuteDemo {
    /// Create a demo released from rest.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the parameters have no terminal velocity.
    pub fn new(config: &SimulationConfig) -> DescentResult<Self> {
        let params = config.descent_parameters();
        let terminal_velocity = params.evaluate()?.terminal_velocity;
        Ok(Self {
            params,
            terminal_velocity,
            velocity: 0.0,
            distance: 0.0,
            time: 0.0,
            initial_velocity: 0.0,
            max_gap_growth: 0.0,
            step_count: 0,
            tolerance: 1e-6,
        })
    }

    /// Set the release velocity (e.g. a canopy opening at speed).
    pub fn set_initial_velocity(&mut self, velocity: f64) {
        self.initial_velocity = velocity;
        self.reset();
    }

    /// Relative gap to terminal velocity.
    #[must_use]
    pub fn relative_gap(&self) -> f64 {
        (self.velocity - self.terminal_velocity).abs() / self.terminal_velocity
    }

    /// Step until converged or `max_steps` is reached. Returns steps taken.
    pub fn run_until_settled(&mut self, dt: f64, max_steps: u64) -> u64 {
        let start = self.step_count;
        while self.step_count - start < max_steps && !self.verify_equation() {
            self.step(dt);
        }
        self.step_count - start
    }

    fn approach_is_monotonic(&self) -> bool {
        self.max_gap_growth <= f64::EPSILON * self.terminal_velocity
    }
}

impl EddDemo for ParachuteDemo {
    fn name(&self) -> &'static str {
        "Parachute Terminal Velocity"
    }

    fn step(&mut self, dt: f64) {
        let gap_before = (self.velocity - self.terminal_velocity).abs();

        self.velocity += net_acceleration(&self.params, self.velocity) * dt;
        self.distance += self.velocity * dt;
        self.time += dt;
        self.step_count += 1;

        let growth = (self.velocity - self.terminal_velocity).abs() - gap_before;
        if growth > self.max_gap_growth || growth.is_nan() {
            self.max_gap_growth = if growth.is_nan() { f64::INFINITY } else { growth };
        }
    }

    fn verify_equation(&self) -> bool {
        self.relative_gap() < self.tolerance && self.approach_is_monotonic()
    }

    fn get_falsification_status(&self) -> FalsificationStatus {
        let gap = self.relative_gap();
        let converged = gap < self.tolerance;
        let monotonic = self.approach_is_monotonic();
        let verified = converged && monotonic;

        FalsificationStatus {
            verified,
            criteria: vec![
                CriterionStatus {
                    id: "PC-TERMINAL".to_string(),
                    name: "Converges to terminal velocity".to_string(),
                    passed: converged,
                    value: gap,
                    threshold: self.tolerance,
                },
                CriterionStatus {
                    id: "PC-MONOTONIC".to_string(),
                    name: "Gap to terminal velocity never grows".to_string(),
                    passed: monotonic,
                    value: self.max_gap_growth,
                    threshold: f64::EPSILON * self.terminal_velocity,
                },
            ],
            message: if verified {
                format!(
                    "Terminal velocity reached: v = {:.4}, v_t = {:.4}",
                    self.velocity, self.terminal_velocity
                )
            } else {
                format!(
                    "FALSIFIED: gap = {gap:.2e}, max gap growth = {:.2e}",
                    self.max_gap_growth
                )
            },
        }
    }

    fn reset(&mut self) {
        self.velocity = self.initial_velocity;
        self.distance = 0.0;
        self.time = 0.0;
        self.max_gap_growth = 0.0;
        self.step_count = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn skydiver() -> ParachuteDemo {
        ParachuteDemo::new(&SimulationConfig::skydiver()).expect("valid preset")
    }

    #[test]
    fn test_equation_terminal_velocity() {
        let demo = skydiver();
        let p = demo.params;
        let expected =
            (2.0 * p.mass * p.gravity / (p.air_density * p.area * p.drag_coefficient)).sqrt();
        assert!((demo.terminal_velocity - expected).abs() < 1e-12);
    }

    #[test]
    fn test_not_verified_at_release() {
        let demo = skydiver();
        assert!(!demo.verify_equation());
        assert!((demo.relative_gap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_converges_from_rest() {
        let mut demo = skydiver();
        let steps = demo.run_until_settled(0.01, 100_000);
        assert!(demo.verify_equation(), "gap = {}", demo.relative_gap());
        assert!(steps < 100_000);
    }

    #[test]
    fn test_converges_from_above() {
        let mut demo = skydiver();
        demo.set_initial_velocity(50.0);
        demo.run_until_settled(0.01, 100_000);
        assert!(demo.verify_equation());
        assert!(demo.velocity >= demo.terminal_velocity);
    }

    #[test]
    fn test_falsification_coarse_timestep() {
        // Δt·g/v_t ≈ 2: each step overshoots past v_t
        let mut demo = skydiver();
        for _ in 0..3 {
            demo.step(4.0);
        }
        let status = demo.get_falsification_status();
        assert!(!status.verified);
        assert!(!status.criteria[1].passed);
        assert!(status.message.contains("FALSIFIED"));
    }

    #[test]
    fn test_larger_canopy_settles_slower_speed() {
        let config = SimulationConfig::skydiver();
        let small = ParachuteDemo::new(&config.with_area(1.0).unwrap()).unwrap();
        let large = ParachuteDemo::new(&config.with_area(5.0).unwrap()).unwrap();
        assert!(large.terminal_velocity < small.terminal_velocity);
    }

    #[test]
    fn test_reset() {
        let mut demo = skydiver();
        demo.step(0.1);
        demo.reset();
        assert_eq!(demo.step_count, 0);
        assert!(demo.velocity.abs() < f64::EPSILON);
        assert_eq!(demo.name(), "Parachute Terminal Velocity");
    }

    #[test]
    fn test_status_structure() {
        let mut demo = skydiver();
        demo.run_until_settled(0.01, 100_000);
        let status = demo.get_falsification_status();
        assert!(status.verified);
        assert_eq!(status.criteria.len(), 2);
        assert_eq!(status.criteria[0].id, "PC-TERMINAL");
    }

    #[test]
    fn test_invalid_config() {
        let mut config = SimulationConfig::skydiver();
        config.area = 0.0;
        assert!(ParachuteDemo::new(&config).is_err());
    }
}
