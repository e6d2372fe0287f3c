//! The single delayed callback of an animation run.
//!
//! A presentation layer schedules one timer per run to re-enable its
//! controls when the animation finishes. Time is supplied by the caller,
//! so the timer is deterministic and needs no clock of its own.
//!
//! Cancelling is idempotent: cancelling a fired, cancelled or never
//! scheduled timer is a no-op.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::SimTime;

/// Identifier of one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Lifecycle of the current timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerStatus {
    /// Nothing scheduled yet.
    #[default]
    Idle,
    /// Waiting for its deadline.
    Pending {
        /// Timer id.
        id: TimerId,
        /// When it fires.
        deadline: SimTime,
    },
    /// Deadline reached.
    Fired {
        /// Timer id.
        id: TimerId,
    },
    /// Cancelled before firing.
    Cancelled {
        /// Timer id.
        id: TimerId,
    },
}

/// A one-shot timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTimer {
    status: TimerStatus,
    next_id: u64,
}

impl AnimationTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> TimerStatus {
        self.status
    }

    /// Whether a callback is waiting to fire.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, TimerStatus::Pending { .. })
    }

    /// Schedule a callback `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: SimTime, delay: SimTime) -> TimerId {
        self.cancel();
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now + delay;
        self.status = TimerStatus::Pending { id, deadline };
        debug!(id = id.get(), %deadline, "timer scheduled");
        id
    }

    /// Cancel the pending callback.
    ///
    /// Returns `true` if a pending callback was cancelled, `false` if there
    /// was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if let TimerStatus::Pending { id, .. } = self.status {
            self.status = TimerStatus::Cancelled { id };
            debug!(id = id.get(), "timer cancelled");
            true
        } else {
            false
        }
    }

    /// Fire the callback if its deadline has passed.
    ///
    /// Returns the id exactly once, on the poll that fires it.
    pub fn poll(&mut self, now: SimTime) -> Option<TimerId> {
        match self.status {
            TimerStatus::Pending { id, deadline } if now >= deadline => {
                self.status = TimerStatus::Fired { id };
                debug!(id = id.get(), "timer fired");
                Some(id)
            }
            _ => None,
        }
    }

    /// Time left before the pending callback fires.
    #[must_use]
    pub fn remaining(&self, now: SimTime) -> Option<SimTime> {
        match self.status {
            TimerStatus::Pending { deadline, .. } => Some(deadline - now),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle() {
        let timer = AnimationTimer::new();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_fires_at_deadline() {
        let mut timer = AnimationTimer::new();
        let id = timer.schedule(SimTime::ZERO, SimTime::from_millis(500));

        assert_eq!(timer.poll(SimTime::from_millis(499)), None);
        assert_eq!(timer.poll(SimTime::from_millis(500)), Some(id));
        assert_eq!(timer.status(), TimerStatus::Fired { id });
        // Fires only once
        assert_eq!(timer.poll(SimTime::from_millis(600)), None);
    }

    #[test]
    fn test_cancel_twice_matches_cancel_once() {
        let mut once = AnimationTimer::new();
        once.schedule(SimTime::ZERO, SimTime::from_millis(500));
        assert!(once.cancel());

        let mut twice = AnimationTimer::new();
        twice.schedule(SimTime::ZERO, SimTime::from_millis(500));
        assert!(twice.cancel());
        assert!(!twice.cancel());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut timer = AnimationTimer::new();
        let id = timer.schedule(SimTime::ZERO, SimTime::from_millis(10));
        timer.poll(SimTime::from_millis(10));
        assert!(!timer.cancel());
        assert_eq!(timer.status(), TimerStatus::Fired { id });
    }

    #[test]
    fn test_cancel_idle_is_noop() {
        let mut timer = AnimationTimer::new();
        assert!(!timer.cancel());
        assert_eq!(timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = AnimationTimer::new();
        timer.schedule(SimTime::ZERO, SimTime::from_millis(10));
        timer.cancel();
        assert_eq!(timer.poll(SimTime::from_millis(1000)), None);
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let mut timer = AnimationTimer::new();
        let first = timer.schedule(SimTime::ZERO, SimTime::from_millis(10));
        let second = timer.schedule(SimTime::ZERO, SimTime::from_millis(20));
        assert_ne!(first, second);
        assert_eq!(timer.poll(SimTime::from_millis(10)), None);
        assert_eq!(timer.poll(SimTime::from_millis(20)), Some(second));
    }

    #[test]
    fn test_remaining() {
        let mut timer = AnimationTimer::new();
        assert_eq!(timer.remaining(SimTime::ZERO), None);
        timer.schedule(SimTime::from_millis(100), SimTime::from_millis(400));
        assert_eq!(
            timer.remaining(SimTime::from_millis(200)),
            Some(SimTime::from_millis(300))
        );
    }
}
