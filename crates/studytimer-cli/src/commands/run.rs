//! Interactive study timer in the terminal.
//!
//! Single-letter commands are read from stdin on a blocking reader thread
//! and fed into a current-thread tokio loop that also waits on the
//! controller's tick schedule.

use std::io::{BufRead, Write};

use clap::Args;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use studytimer_core::error::Result;
use studytimer_core::{
    alert, format_clock, Config, Durations, Event, IntervalTicker, LocalClock, Notice,
    Notifier, SessionController,
};

use super::open_store;

type Controller = SessionController<LocalClock, TerminalNotifier, IntervalTicker>;

#[derive(Args)]
pub struct RunArgs {
    /// Study interval in seconds (overrides config)
    #[arg(long)]
    study_secs: Option<u32>,
    /// Break interval in seconds (overrides config)
    #[arg(long)]
    break_secs: Option<u32>,
    /// Start the first study interval right away
    #[arg(long)]
    autostart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    StartStop,
    PauseResume,
    Reset,
    StartBreak,
    Week,
    Status,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "s" | "start" | "stop" => Some(Self::StartStop),
            "p" | "pause" | "resume" => Some(Self::PauseResume),
            "r" | "reset" => Some(Self::Reset),
            "b" | "break" => Some(Self::StartBreak),
            "w" | "week" => Some(Self::Week),
            "" | "status" => Some(Self::Status),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Prints end-of-session messages.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::StudyComplete => {
                println!("\nTime's up! Study session complete! Time for a break.")
            }
            Notice::PartialRecorded { secs } => {
                println!("\nSession saved. Recorded {} min as completed.", secs / 60)
            }
            Notice::BreakOver => {
                println!("\nBreak over! Break time is over! Time to study again.")
            }
        }
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load()?;
    let configured = config.durations()?;
    let durations = Durations::new(
        args.study_secs.unwrap_or(configured.study_secs),
        args.break_secs.unwrap_or(configured.break_secs),
    )?;

    let mut controller = SessionController::open(
        open_store(&config)?,
        durations,
        TerminalNotifier,
        alert::from_config(&config.alert),
        IntervalTicker::new(),
    )?;

    let lines = spawn_stdin_reader();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(event_loop(&mut controller, lines, args.autostart))
}

/// Forward stdin lines to the event loop. The channel closes at EOF.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("stdin closed");
    });
    rx
}

async fn event_loop(
    controller: &mut Controller,
    mut lines: UnboundedReceiver<String>,
    autostart: bool,
) -> Result<()> {
    print_help();
    if autostart {
        controller.start_stop();
    }
    print_status(controller);

    loop {
        tokio::select! {
            _ = controller.ticker_mut().tick() => {
                let event = controller.on_tick()?;
                report(controller, &event);
                print_status(controller);
            }
            line = lines.recv() => {
                let Some(line) = line else { break };
                let Some(command) = Command::parse(&line) else {
                    println!("unknown command '{}', type h for help", line.trim());
                    continue;
                };
                if command == Command::Quit {
                    break;
                }
                handle(controller, command, &mut lines).await?;
                print_status(controller);
            }
        }
    }

    println!();
    Ok(())
}

async fn handle(
    controller: &mut Controller,
    command: Command,
    lines: &mut UnboundedReceiver<String>,
) -> Result<()> {
    let event = match command {
        Command::StartStop => controller.start_stop(),
        Command::PauseResume => controller.pause_resume(),
        Command::Reset => {
            let keep = match controller.partial_elapsed() {
                Some(elapsed) => ask_keep_partial(elapsed, lines).await,
                None => false,
            };
            controller.reset(&mut |_: u32| keep)?
        }
        Command::StartBreak => {
            if !controller.can_start_break() {
                println!("stop the study timer before starting a break");
                return Ok(());
            }
            controller.start_break()
        }
        Command::Week => {
            println!("Sessions per day (this week)");
            print!("{}", controller.week_summary().render_bars());
            return Ok(());
        }
        Command::Status => return Ok(()),
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };
    report(controller, &event);
    Ok(())
}

async fn ask_keep_partial(elapsed: u32, lines: &mut UnboundedReceiver<String>) -> bool {
    println!(
        "Count this as a completed study session? ({} min completed) [y/N]",
        elapsed / 60
    );
    match lines.recv().await {
        Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        None => false,
    }
}

fn report(controller: &Controller, event: &Event) {
    match event {
        Event::SessionCompleted {
            suggestion_secs: Some(secs),
            ..
        } => println!("Suggested Session: {}", format_clock(*secs)),
        Event::TimerReset {
            partial_recorded_secs: Some(_),
            ..
        } => println!("Suggested Session: {}", format_clock(controller.suggestion_secs())),
        Event::BreakStarted { duration_secs, .. } => {
            println!("Break started ({})", format_clock(*duration_secs))
        }
        _ => {}
    }
}

fn print_status(controller: &Controller) {
    let timer = controller.timer();
    let state = if !timer.is_running() {
        "stopped"
    } else if controller.is_paused() {
        "paused"
    } else {
        "running"
    };
    let label = controller.mode().label();
    print!(
        "\r{label:<13} {}  [{state:<7}]  suggested {}  ",
        format_clock(timer.remaining()),
        format_clock(controller.suggestion_secs()),
    );
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("commands: s start/stop | p pause/resume | r reset | b break | w week | q quit");
}
