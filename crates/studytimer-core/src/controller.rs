//! Study/break session orchestration.
//!
//! The controller owns the current timer, the session counters, the latest
//! interval suggestion and the in-memory history. It reacts to user actions
//! (start/stop, pause/resume, reset, start break) and to one-second ticks,
//! decides when a session is recorded, and flips between study and break.
//!
//! It holds no thread of its own. The host calls [`SessionController::on_tick`]
//! whenever the controller's [`TickSchedule`] fires.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adaptive::suggest_adaptive_interval;
use crate::alert::{self, Alert};
use crate::clock::Clock;
use crate::error::StorageError;
use crate::events::Event;
use crate::stats;
use crate::storage::{HistoryStore, SessionHistory};
use crate::ticker::TickSchedule;
use crate::timer::{Durations, PomodoroTimer, SessionMode};

/// Messages for the user at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A study interval ran out; a break follows.
    StudyComplete,
    /// Part of a study interval was kept on reset.
    PartialRecorded { secs: u32 },
    /// A break ran out; studying follows.
    BreakOver,
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl<F: FnMut(Notice)> Notifier for F {
    fn notify(&mut self, notice: Notice) {
        self(notice)
    }
}

/// Collects notices in order.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Asked before a reset throws away a part-done study session.
pub trait ConfirmPartial {
    /// Return `true` to record `elapsed_secs` as a session.
    fn confirm_partial(&mut self, elapsed_secs: u32) -> bool;
}

impl<F: FnMut(u32) -> bool> ConfirmPartial for F {
    fn confirm_partial(&mut self, elapsed_secs: u32) -> bool {
        self(elapsed_secs)
    }
}

/// Everything that changes while the app runs.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: SessionMode,
    pub timer: PomodoroTimer,
    /// Running but held by pause/resume. Distinct from a stopped timer.
    pub paused: bool,
    pub studies_completed: u32,
    pub breaks_completed: u32,
    pub suggestion_secs: u32,
    pub history: SessionHistory,
}

pub struct SessionController<C: Clock, N: Notifier, T: TickSchedule> {
    state: SessionState,
    durations: Durations,
    store: HistoryStore<C>,
    notifier: N,
    alert: Arc<dyn Alert>,
    ticker: T,
}

impl<C: Clock, N: Notifier, T: TickSchedule> SessionController<C, N, T> {
    /// Load history from `store` and start in study mode.
    ///
    /// # Errors
    /// Returns an error if the history file exists but cannot be loaded.
    pub fn open(
        store: HistoryStore<C>,
        durations: Durations,
        notifier: N,
        alert: Arc<dyn Alert>,
        ticker: T,
    ) -> Result<Self, StorageError> {
        let history = store.load()?;
        let suggestion_secs = suggest_adaptive_interval(history.day(&store.today_date()));
        debug!(days = history.len(), suggestion_secs, "session history loaded");

        Ok(Self {
            state: SessionState {
                mode: SessionMode::Study,
                timer: PomodoroTimer::new(durations.study_secs),
                paused: false,
                studies_completed: 0,
                breaks_completed: 0,
                suggestion_secs,
                history,
            },
            durations,
            store,
            notifier,
            alert,
            ticker,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.state.timer
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn suggestion_secs(&self) -> u32 {
        self.state.suggestion_secs
    }

    pub fn history(&self) -> &SessionHistory {
        &self.state.history
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// A manual break makes sense only from a stopped study timer.
    pub fn can_start_break(&self) -> bool {
        self.state.mode == SessionMode::Study && !self.state.timer.is_running()
    }

    /// Elapsed seconds a reset would offer to record, if any.
    pub fn partial_elapsed(&self) -> Option<u32> {
        let timer = &self.state.timer;
        let partial = self.state.mode == SessionMode::Study
            && timer.remaining() != timer.initial()
            && !timer.is_complete();
        partial.then(|| timer.elapsed())
    }

    /// Session counts for the current Monday-start week.
    pub fn week_counts(&self) -> [u32; 7] {
        stats::week_counts(&self.state.history, self.store.clock().today())
    }

    /// Per-day totals for the current week, dated by the store's clock.
    pub fn week_summary(&self) -> stats::WeekSummary {
        stats::WeekSummary::new(&self.state.history, self.store.clock().today())
    }

    pub fn snapshot(&self) -> Event {
        let timer = &self.state.timer;
        Event::StateSnapshot {
            mode: self.state.mode,
            mode_label: self.state.mode.label().to_string(),
            state: timer.state(),
            remaining_secs: timer.remaining(),
            total_secs: timer.initial(),
            paused: self.state.paused,
            studies_completed: self.state.studies_completed,
            breaks_completed: self.state.breaks_completed,
            suggestion_secs: self.state.suggestion_secs,
            week_counts: self.week_counts(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a stopped timer, or stop a running one.
    pub fn start_stop(&mut self) -> Event {
        self.state.paused = false;
        if self.state.timer.is_running() {
            self.state.timer.pause();
            self.ticker.cancel();
            Event::TimerStopped {
                mode: self.state.mode,
                remaining_secs: self.state.timer.remaining(),
                at: Utc::now(),
            }
        } else {
            self.state.timer.start();
            self.ticker.arm();
            Event::TimerStarted {
                mode: self.state.mode,
                remaining_secs: self.state.timer.remaining(),
                at: Utc::now(),
            }
        }
    }

    /// Hold or release a running timer. Ignored while stopped.
    pub fn pause_resume(&mut self) -> Event {
        if !self.state.timer.is_running() {
            return Event::Ignored;
        }
        let remaining_secs = self.state.timer.remaining();
        if self.state.paused {
            self.state.paused = false;
            self.ticker.arm();
            Event::TimerResumed {
                remaining_secs,
                at: Utc::now(),
            }
        } else {
            self.state.paused = true;
            self.ticker.cancel();
            Event::TimerPaused {
                remaining_secs,
                at: Utc::now(),
            }
        }
    }

    /// Advance the countdown by one second, ending the session when it
    /// runs out.
    ///
    /// # Errors
    /// Returns an error if a finished study session cannot be saved. The
    /// controller has already moved on to the break when this happens.
    pub fn on_tick(&mut self) -> Result<Event, StorageError> {
        if !self.state.timer.is_running() || self.state.paused {
            return Ok(Event::Ignored);
        }
        self.state.timer.tick();
        if self.state.timer.is_complete() {
            self.ticker.cancel();
            return self.finish_session();
        }
        Ok(Event::TimerTicked {
            remaining_secs: self.state.timer.remaining(),
        })
    }

    /// Put the current mode's timer back to full length.
    ///
    /// A part-done study session is offered to `confirm` first and recorded
    /// with its elapsed length if accepted. The mode never changes.
    ///
    /// # Errors
    /// Returns an error if an accepted partial session cannot be saved. The
    /// timer is reset regardless.
    pub fn reset(&mut self, confirm: &mut impl ConfirmPartial) -> Result<Event, StorageError> {
        let mut partial_recorded_secs = None;
        let mut saved = Ok(());

        if let Some(elapsed) = self.partial_elapsed() {
            if confirm.confirm_partial(elapsed) {
                alert::fire(&self.alert);
                self.state.studies_completed += 1;
                saved = self.record_session(elapsed);
                self.notifier.notify(Notice::PartialRecorded { secs: elapsed });
                partial_recorded_secs = Some(elapsed);
            }
        }

        self.state.timer.reset();
        self.state.paused = false;
        self.ticker.cancel();
        saved?;

        Ok(Event::TimerReset {
            mode: self.state.mode,
            partial_recorded_secs,
            at: Utc::now(),
        })
    }

    /// Switch straight to a break. Nothing is recorded.
    pub fn start_break(&mut self) -> Event {
        self.switch_mode(SessionMode::Break);
        Event::BreakStarted {
            duration_secs: self.durations.break_secs,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn finish_session(&mut self) -> Result<Event, StorageError> {
        alert::fire(&self.alert);
        let mode = self.state.mode;

        let (recorded_secs, suggestion_secs, saved) = match mode {
            SessionMode::Study => {
                self.state.studies_completed += 1;
                let secs = self.state.timer.initial();
                let saved = self.record_session(secs);
                self.notifier.notify(Notice::StudyComplete);
                (Some(secs), Some(self.state.suggestion_secs), saved)
            }
            SessionMode::Break => {
                self.state.breaks_completed += 1;
                self.notifier.notify(Notice::BreakOver);
                (None, None, Ok(()))
            }
        };

        let next_mode = mode.next();
        self.switch_mode(next_mode);
        saved?;

        Ok(Event::SessionCompleted {
            mode,
            recorded_secs,
            suggestion_secs,
            next_mode,
            at: Utc::now(),
        })
    }

    /// Append to today's history, save, and refresh the suggestion from
    /// today's sessions.
    fn record_session(&mut self, secs: u32) -> Result<(), StorageError> {
        let saved = self
            .store
            .add_session_for_today(&mut self.state.history, secs);
        let today = self.store.today_date();
        self.state.suggestion_secs = suggest_adaptive_interval(self.state.history.day(&today));
        info!(
            secs,
            suggestion_secs = self.state.suggestion_secs,
            "suggestion updated"
        );
        saved
    }

    fn switch_mode(&mut self, mode: SessionMode) {
        self.state.mode = mode;
        self.state.timer = PomodoroTimer::new(self.durations.for_mode(mode));
        self.state.paused = false;
        self.ticker.cancel();
        info!(?mode, "switched mode");
    }
}
