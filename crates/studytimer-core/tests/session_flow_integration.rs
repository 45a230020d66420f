//! Integration tests for a full day of study sessions.
//!
//! Drives the controller through study/break cycles, partial resets and a
//! restart, checking what ends up in the history file.

use std::sync::Arc;

use chrono::NaiveDate;
use studytimer_core::{
    Durations, Event, FixedClock, HistoryStore, ManualTicker, Notice, SessionController,
    SessionMode, SilentAlert, TickSchedule,
};

type Controller = SessionController<FixedClock, Vec<Notice>, ManualTicker>;

fn open(path: &std::path::Path, day: u32) -> Controller {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 2, day).unwrap());
    SessionController::open(
        HistoryStore::new(path, clock),
        Durations::new(60, 10).unwrap(),
        Vec::new(),
        Arc::new(SilentAlert),
        ManualTicker::new(),
    )
    .unwrap()
}

/// Tick until the ticker is disarmed by completion.
fn run_to_end(c: &mut Controller) -> Event {
    let mut last = Event::Ignored;
    while c.ticker().is_armed() {
        last = c.on_tick().unwrap();
    }
    last
}

#[test]
fn test_full_study_day_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session_history.json");
    let mut c = open(&path, 3);

    // Study 1 runs to completion, then the break.
    c.start_stop();
    assert!(matches!(
        run_to_end(&mut c),
        Event::SessionCompleted {
            mode: SessionMode::Study,
            recorded_secs: Some(60),
            ..
        }
    ));
    assert_eq!(c.mode(), SessionMode::Break);
    c.start_stop();
    run_to_end(&mut c);
    assert_eq!(c.mode(), SessionMode::Study);

    // Study 2 is cut short after 45 seconds and kept.
    c.start_stop();
    for _ in 0..45 {
        c.on_tick().unwrap();
    }
    c.reset(&mut |_: u32| true).unwrap();
    assert_eq!(c.mode(), SessionMode::Study);

    // Study 3 is cut short and discarded.
    c.start_stop();
    for _ in 0..5 {
        c.on_tick().unwrap();
    }
    c.reset(&mut |_: u32| false).unwrap();

    assert_eq!(c.state().studies_completed, 2);
    assert_eq!(c.state().breaks_completed, 1);
    assert_eq!(
        c.notifier(),
        &vec![
            Notice::StudyComplete,
            Notice::BreakOver,
            Notice::PartialRecorded { secs: 45 }
        ]
    );

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({ "2026-02-03": [60, 45] }));
}

#[test]
fn test_history_survives_restart_and_day_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session_history.json");

    let mut c = open(&path, 3);
    c.start_stop();
    run_to_end(&mut c);
    drop(c);

    let mut c = open(&path, 4);
    assert_eq!(c.history().day("2026-02-03"), &[60]);
    // New day, nothing recorded yet: default suggestion.
    assert_eq!(c.suggestion_secs(), 1500);

    c.start_stop();
    run_to_end(&mut c);
    assert_eq!(c.history().day("2026-02-04"), &[60]);
    // 2026-02-02 is the Monday of that week.
    assert_eq!(c.week_counts(), [0, 1, 1, 0, 0, 0, 0]);
}

#[test]
fn test_corrupt_history_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session_history.json");
    std::fs::write(&path, "{not json").unwrap();

    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
    let opened: Result<Controller, _> = SessionController::open(
        HistoryStore::new(&path, clock),
        Durations::default(),
        Vec::new(),
        Arc::new(SilentAlert),
        ManualTicker::new(),
    );
    assert!(opened.is_err());
}
