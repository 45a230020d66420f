use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionMode, TimerState};

/// Every controller operation produces an Event.
/// The presentation layer renders them or polls a `StateSnapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: SessionMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStopped {
        mode: SessionMode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second counted down.
    TimerTicked {
        remaining_secs: u32,
    },
    /// The timer ran out. `recorded_secs` is set for study sessions.
    SessionCompleted {
        mode: SessionMode,
        recorded_secs: Option<u32>,
        suggestion_secs: Option<u32>,
        next_mode: SessionMode,
        at: DateTime<Utc>,
    },
    /// The timer went back to full length, possibly after recording a
    /// partial study session.
    TimerReset {
        mode: SessionMode,
        partial_recorded_secs: Option<u32>,
        at: DateTime<Utc>,
    },
    BreakStarted {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The operation had no effect in the current state.
    Ignored,
    StateSnapshot {
        mode: SessionMode,
        mode_label: String,
        state: TimerState,
        remaining_secs: u32,
        total_secs: u32,
        paused: bool,
        studies_completed: u32,
        breaks_completed: u32,
        suggestion_secs: u32,
        week_counts: [u32; 7],
        at: DateTime<Utc>,
    },
}
