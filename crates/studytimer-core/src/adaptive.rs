//! Adaptive study interval suggestion.
//!
//! Looks at the lengths of today's recorded study sessions and nudges the
//! next suggested interval towards them: short sessions pull it down (never
//! below ten minutes), long sessions push it up (never above an hour), and
//! anything in between keeps the classic 25 minutes.

/// Suggested interval when there is no history or the mean is unremarkable.
pub const DEFAULT_SUGGESTION_SECS: u32 = 25 * 60;

const SHORT_MEAN_SECS: f64 = 15.0 * 60.0;
const LONG_MEAN_SECS: f64 = 30.0 * 60.0;
const MIN_SUGGESTION_SECS: f64 = 10.0 * 60.0;
const MAX_SUGGESTION_SECS: f64 = 60.0 * 60.0;

/// Suggest the next study interval in seconds from past session lengths.
///
/// The mean is kept as a float and truncated only at the end.
pub fn suggest_adaptive_interval(session_secs: &[u32]) -> u32 {
    if session_secs.is_empty() {
        return DEFAULT_SUGGESTION_SECS;
    }
    let total: f64 = session_secs.iter().map(|&s| f64::from(s)).sum();
    let mean = total / session_secs.len() as f64;

    if mean < SHORT_MEAN_SECS {
        mean.max(MIN_SUGGESTION_SECS) as u32
    } else if mean > LONG_MEAN_SECS {
        mean.min(MAX_SUGGESTION_SECS) as u32
    } else {
        DEFAULT_SUGGESTION_SECS
    }
}
