//! Explicit animation state for a presentation layer.
//!
//! Holds what a UI would otherwise keep in module-level variables: the
//! running flag, the elapsed time and the completion timer. The UI passes
//! the current time in on every call.
//!
//! ```text
//!            start             timer fires
//!   Idle ───────────▶ Running ─────────────▶ Landed
//!    ▲                 │   ▲                   │
//!    │           stop  ▼   │ start             │
//!    │               Paused                    │
//!    └──────────────── reset ◀─────────────────┘
//! ```
//!
//! `stop` freezes at the current position and `start` resumes from it.
//! `reset` always returns to the top, from any phase.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::timer::AnimationTimer;
use crate::engine::SimTime;

/// Phase of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// At the top, not started.
    #[default]
    Idle,
    /// Moving; controls disabled.
    Running,
    /// Frozen mid-way by `stop`.
    Paused,
    /// Reached the bottom.
    Landed,
}

/// What `start` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    /// Began a new run lasting `duration`.
    Started {
        /// Full animation duration.
        duration: SimTime,
    },
    /// Continued a paused run with `remaining` to go.
    Resumed {
        /// Time left until landing.
        remaining: SimTime,
    },
    /// Already running; nothing changed.
    AlreadyRunning,
    /// Already at the bottom; reset first.
    AlreadyLanded,
}

/// Running state of one animated descent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    phase: AnimationPhase,
    duration: SimTime,
    elapsed: SimTime,
    resumed_at: Option<SimTime>,
    timer: AnimationTimer,
}

impl AnimationState {
    /// Idle state at the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Whether the animation is moving.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, AnimationPhase::Running)
    }

    /// Whether start/area controls should accept input.
    #[must_use]
    pub const fn controls_enabled(&self) -> bool {
        !self.is_running()
    }

    /// Completion timer.
    #[must_use]
    pub const fn timer(&self) -> &AnimationTimer {
        &self.timer
    }

    /// Duration of the current run.
    #[must_use]
    pub const fn duration(&self) -> SimTime {
        self.duration
    }

    /// Start or resume.
    ///
    /// `duration` is only used for a fresh run; a paused run keeps the
    /// duration it started with.
    pub fn start(&mut self, now: SimTime, duration: SimTime) -> StartOutcome {
        match self.phase {
            AnimationPhase::Running => {
                debug!("start ignored, already running");
                StartOutcome::AlreadyRunning
            }
            AnimationPhase::Landed => {
                debug!("start ignored, already landed");
                StartOutcome::AlreadyLanded
            }
            AnimationPhase::Idle => {
                self.duration = duration;
                self.elapsed = SimTime::ZERO;
                self.begin(now, duration);
                info!(%duration, "animation started");
                StartOutcome::Started { duration }
            }
            AnimationPhase::Paused => {
                let remaining = self.duration - self.elapsed;
                self.begin(now, remaining);
                info!(%remaining, "animation resumed");
                StartOutcome::Resumed { remaining }
            }
        }
    }

    fn begin(&mut self, now: SimTime, remaining: SimTime) {
        self.phase = AnimationPhase::Running;
        self.resumed_at = Some(now);
        self.timer.schedule(now, remaining);
    }

    /// Freeze at the current position. No-op unless running.
    pub fn stop(&mut self, now: SimTime) {
        if self.phase != AnimationPhase::Running {
            self.timer.cancel();
            return;
        }
        self.elapsed = self.elapsed_at(now);
        self.resumed_at = None;
        self.timer.cancel();
        self.phase = AnimationPhase::Paused;
        debug!(elapsed = %self.elapsed, "animation paused");
    }

    /// Return to the top. Valid from every phase.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.phase = AnimationPhase::Idle;
        self.elapsed = SimTime::ZERO;
        self.resumed_at = None;
        debug!("animation reset");
    }

    /// Advance to `now`; lands once the completion timer fires.
    pub fn tick(&mut self, now: SimTime) -> AnimationPhase {
        if self.phase == AnimationPhase::Running && self.timer.poll(now).is_some() {
            self.elapsed = self.duration;
            self.resumed_at = None;
            self.phase = AnimationPhase::Landed;
            info!("animation landed");
        }
        self.phase
    }

    /// Elapsed animation time at `now`, capped at the duration.
    #[must_use]
    pub fn elapsed_at(&self, now: SimTime) -> SimTime {
        let elapsed = match self.resumed_at {
            Some(resumed) if self.phase == AnimationPhase::Running => {
                self.elapsed + (now - resumed)
            }
            _ => self.elapsed,
        };
        elapsed.min(self.duration)
    }

    /// Fraction of the run completed at `now`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: SimTime) -> f64 {
        if self.phase == AnimationPhase::Landed {
            return 1.0;
        }
        if self.duration == SimTime::ZERO {
            return 0.0;
        }
        self.elapsed_at(now).as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Position between `top` and `bottom` at `now` (linear in time, since
    /// the closed-form model falls at constant terminal velocity).
    #[must_use]
    pub fn position(&self, now: SimTime, top: f64, bottom: f64) -> f64 {
        top + self.progress(now) * (bottom - top)
    }
}
