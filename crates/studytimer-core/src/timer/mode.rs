use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default study interval: 25 minutes.
pub const DEFAULT_STUDY_SECS: u32 = 25 * 60;
/// Default break interval: 5 minutes.
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Study,
    Break,
}

impl SessionMode {
    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Study => "Study Session",
            SessionMode::Break => "Break Time",
        }
    }

    /// The mode that follows a natural completion of this one.
    pub fn next(self) -> Self {
        match self {
            SessionMode::Study => SessionMode::Break,
            SessionMode::Break => SessionMode::Study,
        }
    }
}

/// Interval lengths for the two modes, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub study_secs: u32,
    pub break_secs: u32,
}

impl Durations {
    /// Build a validated pair of durations. Both must be non-zero.
    pub fn new(study_secs: u32, break_secs: u32) -> Result<Self, ValidationError> {
        if study_secs == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "study_secs".into(),
            });
        }
        if break_secs == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "break_secs".into(),
            });
        }
        Ok(Self {
            study_secs,
            break_secs,
        })
    }

    pub fn for_mode(&self, mode: SessionMode) -> u32 {
        match mode {
            SessionMode::Study => self.study_secs,
            SessionMode::Break => self.break_secs,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            study_secs: DEFAULT_STUDY_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}
