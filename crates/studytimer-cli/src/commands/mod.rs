pub mod config;
pub mod history;
pub mod run;
pub mod suggest;

use studytimer_core::error::Result;
use studytimer_core::{Config, HistoryStore, LocalClock};

/// History store at the configured location, stamped with the local date.
pub fn open_store(config: &Config) -> Result<HistoryStore<LocalClock>> {
    Ok(HistoryStore::new(config.history_path()?, LocalClock))
}
