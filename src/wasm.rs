//! WASM bindings for the descent animation.
//!
//! The page owns the clock: it calls `tick` once per frame with the time
//! since the previous frame, in the preset's time unit.
//!
//! The closed-form animation lands after `h / v_t`. The stepped body starts
//! from rest and lands later, so a run keeps ticking until both are down.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { WasmDescent } from 'descent';
//!
//! async function main() {
//!     await init();
//!
//!     const sim = new WasmDescent('skydiver');
//!     sim.set_area(3.0);
//!     label.textContent = sim.terminal_velocity_label();
//!     sim.start();
//!     function frame() {
//!         sim.tick(1 / 60);
//!         draw(sim.position(), sim.canopy_width());
//!         if (sim.is_running()) requestAnimationFrame(frame);
//!     }
//!     requestAnimationFrame(frame);
//! }
//! ```

// WASM-bindgen exports don't need #[must_use] - values returned to JS
#![allow(clippy::must_use_candidate)]

use wasm_bindgen::prelude::*;

use crate::config::SimulationConfig;
use crate::display::DisplayValue;
use crate::engine::{AnimationPhase, AnimationState, DescentSimulation, SimTime, StepOutcome};
use crate::error::{DescentError, DescentResult};
use crate::model::FrictionSurface;

fn to_js(err: &DescentError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-exported descent: closed-form animation plus stepped physics.
#[wasm_bindgen]
pub struct WasmDescent {
    simulation: DescentSimulation,
    animation: AnimationState,
    now: SimTime,
    pending: f64,
    halted: bool,
    stepping: bool,
}

#[wasm_bindgen]
impl WasmDescent {
    /// Create from a preset name (`skydiver`, `toy_soldier`, `friction_block`).
    ///
    /// # Errors
    ///
    /// Throws for an unknown preset.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<WasmDescent, JsValue> {
        Self::from_preset(preset).map_err(|e| to_js(&e))
    }

    /// Create from a YAML scenario.
    ///
    /// # Errors
    ///
    /// Throws if the YAML does not parse or validate.
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str) -> Result<WasmDescent, JsValue> {
        let config = SimulationConfig::from_yaml(yaml).map_err(|e| to_js(&e))?;
        Self::from_config(config).map_err(|e| to_js(&e))
    }

    /// Select a canopy area from the offered options. Ignored while running.
    ///
    /// # Errors
    ///
    /// Throws if the area is not an offered option.
    #[wasm_bindgen]
    pub fn set_area(&mut self, area: f64) -> Result<(), JsValue> {
        self.select_area(area).map_err(|e| to_js(&e))
    }

    /// Start, or resume after `stop`. Returns false if nothing changed.
    #[wasm_bindgen]
    pub fn start(&mut self) -> bool {
        let Some(duration) = self.duration() else {
            return false;
        };
        let outcome = self.animation.start(self.now, duration);
        let was_stepping = self.stepping;
        self.stepping = !self.halted
            && !self.simulation.is_landed()
            && matches!(
                self.animation.phase(),
                AnimationPhase::Running | AnimationPhase::Landed
            );
        outcome_changed(outcome) || (self.stepping && !was_stepping)
    }

    /// Freeze at the current position.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.animation.stop(self.now);
        self.stepping = false;
    }

    /// Back to the top, at rest.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.animation.reset();
        self.simulation.reset();
        self.pending = 0.0;
        self.halted = false;
        self.stepping = false;
    }

    /// Advance the clock by `dt`. Returns whether anything is still moving.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f64) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return self.is_running();
        }
        let Ok(delta) = SimTime::from_secs(dt) else {
            return self.is_running();
        };
        self.now = self.now + delta;

        if self.stepping {
            self.advance_physics(dt);
        }
        self.animation.tick(self.now);
        self.is_running()
    }

    /// Whether the animation or the stepped body is still moving.
    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.animation.is_running() || self.stepping
    }

    /// Whether the start button and area control accept input.
    #[wasm_bindgen]
    pub fn controls_enabled(&self) -> bool {
        !self.is_running()
    }

    /// Whether the stepped body has reached the floor.
    #[wasm_bindgen]
    pub fn is_landed(&self) -> bool {
        self.simulation.is_landed()
    }

    /// Animated position (closed-form, constant terminal velocity).
    #[wasm_bindgen]
    pub fn position(&self) -> f64 {
        let config = self.simulation.config();
        self.animation
            .position(self.now, config.start_position, config.floor_position())
    }

    /// Position of the stepped body.
    #[wasm_bindgen]
    pub fn stepped_position(&self) -> f64 {
        self.simulation.state().position
    }

    /// Velocity of the stepped body.
    #[wasm_bindgen]
    pub fn velocity(&self) -> f64 {
        self.simulation.state().velocity
    }

    /// Rendered canopy width.
    #[wasm_bindgen]
    pub fn canopy_width(&self) -> f64 {
        self.simulation.canopy_width()
    }

    /// Terminal velocity, or `NaN` if undefined.
    #[wasm_bindgen]
    pub fn terminal_velocity(&self) -> f64 {
        self.outcome().map_or(f64::NAN, |o| o.terminal_velocity)
    }

    /// Descent time, or `NaN` if undefined.
    #[wasm_bindgen]
    pub fn descent_time(&self) -> f64 {
        self.outcome().map_or(f64::NAN, |o| o.total_time_seconds)
    }

    /// Terminal velocity formatted for a label (`"--"` if undefined).
    #[wasm_bindgen]
    pub fn terminal_velocity_label(&self) -> String {
        DisplayValue::from_f64(self.terminal_velocity()).to_string()
    }

    /// Descent time formatted for a label (`"--"` if undefined).
    #[wasm_bindgen]
    pub fn descent_time_label(&self) -> String {
        DisplayValue::from_f64(self.descent_time()).to_string()
    }

    /// Force needed to pull this body across `surface`, or `NaN` for an
    /// unknown surface key.
    #[wasm_bindgen]
    pub fn required_force(&self, surface: &str) -> f64 {
        surface.parse::<FrictionSurface>().map_or(f64::NAN, |s| {
            let config = self.simulation.config();
            crate::model::compute_required_force(s.coefficient(), config.mass, config.gravity)
        })
    }

    /// Required force formatted for a label (`"--"` if undefined).
    #[wasm_bindgen]
    pub fn required_force_label(&self, surface: &str) -> String {
        DisplayValue::from_f64(self.required_force(surface)).to_string()
    }
}

impl WasmDescent {
    fn from_preset(preset: &str) -> DescentResult<Self> {
        Self::from_config(SimulationConfig::preset(preset)?)
    }

    fn from_config(config: SimulationConfig) -> DescentResult<Self> {
        Ok(Self {
            simulation: DescentSimulation::new(config)?,
            animation: AnimationState::new(),
            now: SimTime::ZERO,
            pending: 0.0,
            halted: false,
            stepping: false,
        })
    }

    fn select_area(&mut self, area: f64) -> DescentResult<()> {
        if !self.controls_enabled() {
            return Ok(());
        }
        self.simulation.set_area(area)?;
        self.reset();
        Ok(())
    }

    fn outcome(&self) -> Option<crate::model::DescentOutcome> {
        self.simulation
            .config()
            .descent_parameters()
            .evaluate()
            .ok()
    }

    fn duration(&self) -> Option<SimTime> {
        let seconds = self.outcome()?.total_time_seconds;
        SimTime::from_secs(seconds).ok()
    }

    fn advance_physics(&mut self, dt: f64) {
        let step = self.simulation.config().timestep.dt;
        self.pending += dt;
        while self.pending >= step {
            self.pending -= step;
            match self.simulation.step() {
                Ok(StepOutcome::Falling { .. }) => {}
                Ok(StepOutcome::Landed(_) | StepOutcome::AlreadyLanded) => {
                    self.pending = 0.0;
                    self.stepping = false;
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stepped descent halted");
                    self.halted = true;
                    self.pending = 0.0;
                    self.stepping = false;
                    break;
                }
            }
        }
    }
}

const fn outcome_changed(outcome: crate::engine::StartOutcome) -> bool {
    matches!(
        outcome,
        crate::engine::StartOutcome::Started { .. } | crate::engine::StartOutcome::Resumed { .. }
    )
}
