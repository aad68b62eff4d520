use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "classmate", version, about = "Class schedule and homework planner")]
struct Cli {
    /// Pretend the current local time is this (YYYY-MM-DDTHH:MM)
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Class management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Homework management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Today's classes, tasks due today and upcoming tasks
    Today,
    /// Registered reminders
    Reminders {
        #[command(subcommand)]
        action: commands::reminders::RemindersAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))
}

fn main() {
    // stdout carries JSON, logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    let result = match cli.command {
        Commands::Subject { action } => commands::subject::run(action, now),
        Commands::Task { action } => commands::task::run(action, now),
        Commands::Today => commands::today::run(now),
        Commands::Reminders { action } => commands::reminders::run(action, now),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
