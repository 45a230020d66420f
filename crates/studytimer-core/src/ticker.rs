//! Repeating one-second tick source with cancel semantics.
//!
//! The controller arms its schedule when the countdown should advance and
//! cancels it whenever it should not. How ticks are actually delivered is up
//! to the implementation; [`IntervalTicker`] is the tokio-backed one used by
//! the CLI.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub trait TickSchedule {
    /// Start (or keep) delivering ticks. The first tick arrives one period
    /// after arming; re-arming an armed schedule keeps its phase.
    fn arm(&mut self);

    /// Stop delivering ticks.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;
}

/// Tick schedule over a tokio interval.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Wait for the next tick. Never resolves while cancelled, so it can sit
    /// in a `tokio::select!` next to other event sources.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSchedule for IntervalTicker {
    fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        debug!("tick schedule armed");
    }

    fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!("tick schedule cancelled");
        }
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

/// Records arm/cancel calls; ticks are delivered by calling the controller
/// directly. Used by tests and by hosts with their own event loop.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    armed: bool,
    arms: usize,
    cancels: usize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of disarmed-to-armed transitions.
    pub fn arms(&self) -> usize {
        self.arms
    }

    /// Number of armed-to-disarmed transitions.
    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl TickSchedule for ManualTicker {
    fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.arms += 1;
        }
    }

    fn cancel(&mut self) {
        if self.armed {
            self.armed = false;
            self.cancels += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}
