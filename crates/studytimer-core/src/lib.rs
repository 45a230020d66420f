//! # studytimer Core Library
//!
//! Core logic for a Pomodoro study timer: a countdown state machine, a
//! day-bucketed session history kept in a JSON file, and an adaptive
//! suggestion for the next study interval based on today's sessions.
//!
//! ## Architecture
//!
//! - **Timer**: A whole-second countdown that requires the caller to invoke
//!   `tick()` once per second
//! - **Storage**: JSON session history and TOML-based configuration
//! - **Controller**: Study/break orchestration over the timer and history,
//!   driven by user actions and a cancellable tick schedule
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: Countdown state machine
//! - [`suggest_adaptive_interval`]: Next-interval heuristic
//! - [`HistoryStore`]: Session history persistence
//! - [`SessionController`]: Session orchestration
//! - [`Config`]: Application configuration management

pub mod adaptive;
pub mod alert;
pub mod clock;
pub mod controller;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use adaptive::{suggest_adaptive_interval, DEFAULT_SUGGESTION_SECS};
pub use alert::{Alert, AlertError, SilentAlert, SoundCommand, TerminalBell};
pub use clock::{Clock, FixedClock, LocalClock};
pub use controller::{ConfirmPartial, Notice, Notifier, SessionController, SessionState};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use stats::{format_clock, week_counts, WeekSummary};
pub use storage::{Config, HistoryStore, SessionHistory};
pub use ticker::{IntervalTicker, ManualTicker, TickSchedule};
pub use timer::{Durations, PomodoroTimer, SessionMode, TimerState};
