//! Day-bucketed session history persisted as a single JSON document.
//!
//! The file holds one object mapping `YYYY-MM-DD` to the lengths (seconds)
//! of the sessions recorded that day, in completion order:
//!
//! ```json
//! {"2026-01-30": [1500, 900], "2026-01-31": [1500]}
//! ```
//!
//! A missing or blank file reads as an empty history. The whole document is
//! rewritten on every save.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::StorageError;

/// File name used inside the data directory.
pub const HISTORY_FILE_NAME: &str = "session_history.json";

/// Recorded session lengths keyed by local date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory(BTreeMap<String, Vec<u32>>);

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions recorded on `day`, empty if none.
    pub fn day(&self, day: &str) -> &[u32] {
        self.0.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append one session to `day`, creating the bucket if needed.
    pub fn append(&mut self, day: &str, secs: u32) {
        self.0.entry(day.to_string()).or_default().push(secs);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of day buckets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total_sessions(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl From<BTreeMap<String, Vec<u32>>> for SessionHistory {
    fn from(map: BTreeMap<String, Vec<u32>>) -> Self {
        Self(map)
    }
}

/// Reads and writes a [`SessionHistory`] at one path, stamping new
/// sessions with the injected clock's date.
pub struct HistoryStore<C: Clock> {
    path: PathBuf,
    clock: C,
}

impl<C: Clock> HistoryStore<C> {
    pub fn new(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Today's bucket key, `YYYY-MM-DD`.
    pub fn today_date(&self) -> String {
        self.clock.today_key()
    }

    /// Load the history. A missing or blank file yields an empty history.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<SessionHistory, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session history yet");
                return Ok(SessionHistory::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(SessionHistory::new());
        }
        serde_json::from_str(content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with the full serialized history.
    ///
    /// Writes a sibling temp file and renames it over the target.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, history: &SessionHistory) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string(history).map_err(|e| write_err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Append `secs` to today's bucket and save immediately.
    ///
    /// # Errors
    /// Returns an error if saving fails. The in-memory history keeps the
    /// new entry either way.
    pub fn add_session_for_today(
        &self,
        history: &mut SessionHistory,
        secs: u32,
    ) -> Result<(), StorageError> {
        let day = self.today_date();
        history.append(&day, secs);
        info!(%day, secs, "recorded study session");
        self.save(history)
    }
}
