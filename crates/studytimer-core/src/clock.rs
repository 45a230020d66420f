//! Source of "today" for day-bucketed history.

use chrono::NaiveDate;

/// Supplies the current local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Today's day-bucket key, `YYYY-MM-DD`.
    fn today_key(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Wall clock in the system's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
