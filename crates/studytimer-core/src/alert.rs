//! Best-effort completion alerts.
//!
//! An alert is fired at every session end. It runs on a detached worker
//! thread and its failures are only logged: a missing sound must never get in
//! the way of recording a session.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::AlertConfig;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("failed to run alert player '{player}': {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("alert player '{player}' exited with {status}")]
    PlayerFailed {
        player: String,
        status: std::process::ExitStatus,
    },

    #[error("failed to ring terminal bell: {0}")]
    Bell(#[source] std::io::Error),
}

/// Something that can get the user's attention.
pub trait Alert: Send + Sync {
    fn play(&self) -> Result<(), AlertError>;
}

/// Play `alert` on a worker thread, logging and swallowing any error.
pub fn fire(alert: &Arc<dyn Alert>) {
    let alert = Arc::clone(alert);
    let spawned = std::thread::Builder::new()
        .name("studytimer-alert".into())
        .spawn(move || {
            if let Err(e) = alert.play() {
                warn!("alert failed: {e}");
            }
        });
    if let Err(e) = spawned {
        warn!("could not start alert thread: {e}");
    }
}

/// Writes BEL to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Alert for TerminalBell {
    fn play(&self) -> Result<(), AlertError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07").map_err(AlertError::Bell)?;
        out.flush().map_err(AlertError::Bell)
    }
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlert;

impl Alert for SilentAlert {
    fn play(&self) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Runs an external player on a sound file, ringing the bell instead when
/// the file is missing.
#[derive(Debug, Clone)]
pub struct SoundCommand {
    player: String,
    sound_file: PathBuf,
}

impl SoundCommand {
    pub fn new(player: impl Into<String>, sound_file: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound_file: sound_file.into(),
        }
    }
}

impl Alert for SoundCommand {
    fn play(&self) -> Result<(), AlertError> {
        if !self.sound_file.exists() {
            debug!(file = %self.sound_file.display(), "sound file missing, using bell");
            return TerminalBell.play();
        }

        let status = Command::new(&self.player)
            .arg(&self.sound_file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AlertError::Spawn {
                player: self.player.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AlertError::PlayerFailed {
                player: self.player.clone(),
                status,
            })
        }
    }
}

/// Pick the alert described by `config`.
pub fn from_config(config: &AlertConfig) -> Arc<dyn Alert> {
    if !config.enabled {
        return Arc::new(SilentAlert);
    }
    match &config.player {
        Some(player) => Arc::new(SoundCommand::new(player.clone(), &config.sound_file)),
        None => Arc::new(TerminalBell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    struct Failing(mpsc::Sender<()>);

    impl Alert for Failing {
        fn play(&self) -> Result<(), AlertError> {
            let _ = self.0.send(());
            Err(AlertError::Bell(std::io::Error::other("no audio device")))
        }
    }

    #[test]
    fn fire_swallows_failures() {
        let (tx, rx) = mpsc::channel();
        let alert: Arc<dyn Alert> = Arc::new(Failing(tx));
        fire(&alert);
        rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
    }

    #[test]
    fn fire_runs_alert_off_thread() {
        struct Counting(AtomicUsize, mpsc::Sender<std::thread::ThreadId>);
        impl Alert for Counting {
            fn play(&self) -> Result<(), AlertError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                let _ = self.1.send(std::thread::current().id());
                Ok(())
            }
        }

        let (tx, rx) = mpsc::channel();
        let alert: Arc<dyn Alert> = Arc::new(Counting(AtomicUsize::new(0), tx));
        fire(&alert);
        let id = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        assert_ne!(id, std::thread::current().id());
    }

    #[test]
    fn missing_player_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("alert.wav");
        std::fs::write(&sound, b"RIFF").unwrap();
        let alert = SoundCommand::new("studytimer-no-such-player", &sound);
        assert!(matches!(alert.play(), Err(AlertError::Spawn { .. })));
    }

    #[test]
    fn disabled_config_is_silent() {
        let config = AlertConfig {
            enabled: false,
            ..AlertConfig::default()
        };
        assert!(from_config(&config).play().is_ok());
    }
}
