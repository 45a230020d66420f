use chrono::NaiveDate;
use clap::Subcommand;
use studytimer_core::{Clock, Config, WeekSummary};

use super::open_store;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print recorded sessions as JSON
    Show {
        /// Only this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        day: Option<NaiveDate>,
    },
    /// Sessions per day for the current week
    Week {
        /// Output as JSON instead of a chart
        #[arg(long)]
        json: bool,
    },
    /// Record a session of the given length for today
    Add {
        /// Session length in seconds
        secs: u32,
    },
}

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Strict `YYYY-MM-DD`; chrono alone would also take `2026-1-30`.
fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
        .ok()
        .filter(|date| date.format(DAY_FORMAT).to_string() == s)
        .ok_or_else(|| format!("'{s}' is not a date in YYYY-MM-DD form"))
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let mut history = store.load()?;

    match action {
        HistoryAction::Show { day: Some(day) } => {
            let key = day.format(DAY_FORMAT).to_string();
            println!("{}", serde_json::to_string_pretty(history.day(&key))?);
        }
        HistoryAction::Show { day: None } => {
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        HistoryAction::Week { json } => {
            let summary = WeekSummary::new(&history, store.clock().today());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Sessions per day (this week)");
                print!("{}", summary.render_bars());
            }
        }
        HistoryAction::Add { secs } => {
            if secs == 0 {
                return Err("session length must be greater than zero".into());
            }
            store.add_session_for_today(&mut history, secs)?;
            println!("{}", serde_json::to_string_pretty(history.day(&store.today_date()))?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_must_be_zero_padded_iso_date() {
        assert_eq!(
            parse_day("2026-01-30"),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 30).unwrap())
        );
        assert!(parse_day("2026-1-30").is_err());
        assert!(parse_day("2026-02-30").is_err());
        assert!(parse_day("30/01/2026").is_err());
        assert!(parse_day("").is_err());
    }
}
