use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studytimer", version, about = "Pomodoro study timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive study timer
    Run(commands::run::RunArgs),
    /// Session history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Suggested length of the next study session
    Suggest,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STUDYTIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Run(args) => commands::run::run(args).map_err(Into::into),
        Commands::History { action } => commands::history::run(action),
        Commands::Suggest => commands::suggest::run().map_err(Into::into),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
