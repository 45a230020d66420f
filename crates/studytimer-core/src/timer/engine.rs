//! Countdown timer state machine.
//!
//! The timer counts whole seconds and has no internal thread - the caller is
//! responsible for calling `tick()` once per second while it should run.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Complete)
//! Paused -> Running
//! any -> Idle (reset)
//! ```
//!
//! ## Usage
//!
//! ```
//! use studytimer_core::PomodoroTimer;
//!
//! let mut timer = PomodoroTimer::new(3);
//! timer.start();
//! timer.tick();
//! timer.tick();
//! timer.tick();
//! assert!(timer.is_complete());
//! assert!(!timer.is_running());
//! ```

use serde::{Deserialize, Serialize};

/// Observable state derived from `remaining` and `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Stopped at the full duration.
    Idle,
    Running,
    /// Stopped part-way through.
    Paused,
    /// Ran down to zero.
    Complete,
}

/// Countdown over whole seconds.
///
/// `remaining` never exceeds `initial` and only decreases through an
/// effective `tick()`. Reaching zero stops the timer in the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroTimer {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl PomodoroTimer {
    /// Create a stopped timer with `initial` seconds on the clock.
    ///
    /// A zero-length timer is legal and is complete from the start.
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds counted down so far.
    pub fn elapsed(&self) -> u32 {
        self.initial - self.remaining
    }

    /// True iff no time is left. Does not look at `running`.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.is_complete() {
            TimerState::Complete
        } else if self.remaining == self.initial {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Count down one second. Returns `true` when the tick had an effect.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
        }
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
        self.running = false;
    }
}
