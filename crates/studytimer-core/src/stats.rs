//! Weekly aggregation and clock formatting for display.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::SessionHistory;

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The seven dates, Monday first, of the week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Sessions recorded on each day of `today`'s week, Monday first.
pub fn week_counts(history: &SessionHistory, today: NaiveDate) -> [u32; 7] {
    week_of(today).map(|day| history.day(&day_key(day)).len() as u32)
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Short weekday name, `Mon`..`Sun`.
    pub label: String,
    pub sessions: u32,
    pub total_secs: u64,
}

/// Per-day totals for one Monday-start week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub days: Vec<DaySummary>,
}

impl WeekSummary {
    pub fn new(history: &SessionHistory, today: NaiveDate) -> Self {
        let days = week_of(today)
            .into_iter()
            .map(|date| {
                let sessions = history.day(&day_key(date));
                DaySummary {
                    date,
                    label: date.format("%a").to_string(),
                    sessions: sessions.len() as u32,
                    total_secs: sessions.iter().map(|&s| u64::from(s)).sum(),
                }
            })
            .collect();
        Self { days }
    }

    pub fn counts(&self) -> Vec<u32> {
        self.days.iter().map(|d| d.sessions).collect()
    }

    /// Horizontal text bar chart, one row per day.
    pub fn render_bars(&self) -> String {
        let max = self.days.iter().map(|d| d.sessions).max().unwrap_or(0).max(1);
        let width = 20usize;
        let mut out = String::new();
        for day in &self.days {
            let len = (day.sessions as usize * width) / max as usize;
            out.push_str(&format!("{} {:<width$} {}\n", day.label, "#".repeat(len), day.sessions));
        }
        out
    }
}
