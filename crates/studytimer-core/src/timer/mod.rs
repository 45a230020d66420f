mod engine;
mod mode;

pub use engine::{PomodoroTimer, TimerState};
pub use mode::{Durations, SessionMode, DEFAULT_BREAK_SECS, DEFAULT_STUDY_SECS};
