use serde::Serialize;
use studytimer_core::error::Result;
use studytimer_core::{format_clock, suggest_adaptive_interval, Config};

use super::open_store;

#[derive(Serialize)]
struct Suggestion<'a> {
    date: String,
    sessions: &'a [u32],
    suggestion_secs: u32,
    suggestion: String,
}

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let history = store.load()?;
    let date = store.today_date();
    let sessions = history.day(&date);
    let suggestion_secs = suggest_adaptive_interval(sessions);

    let out = Suggestion {
        date,
        sessions,
        suggestion_secs,
        suggestion: format_clock(suggestion_secs),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
