mod app;
mod ui;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event as TermEvent, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use fitlog::catalog::{InMemoryCatalog, WorkoutCatalog};
use fitlog::config::Config;
use fitlog::db::{SqliteSummaryStore, SummaryStore};
use fitlog::logging::{init_file_logger, init_logger, parse_level};
use fitlog::session::SessionSummary;

use crate::app::{Action, SessionApp};

#[derive(Parser, Debug)]
#[command(version, about = "fitlog - Workout Session Tracker", long_about = None)]
struct Args {
    /// SQLite database for saved workouts (overrides FITLOG_DATABASE_URL)
    #[arg(short, long, global = true)]
    database: Option<String>,
    /// JSON workout catalog (overrides FITLOG_CATALOG)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,
    /// Log level written to stderr (overrides FITLOG_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// File that `run` logs to (overrides FITLOG_LOG_FILE)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the workouts in the catalog
    Workouts,
    /// Run a workout session interactively
    Run { workout_id: i64 },
    /// List saved workout summaries
    History {
        #[arg(short, long)]
        verbose: bool,
    },
}

enum Event {
    Tick,
    Key(KeyEvent),
}

/// The TUI owns the terminal during a run.
fn logs_to_file(command: &Commands) -> bool {
    matches!(command, Commands::Run { .. })
}

fn load_catalog(path: Option<&Path>) -> Result<InMemoryCatalog> {
    match path {
        Some(path) => InMemoryCatalog::from_path(path),
        None => Ok(InMemoryCatalog::builtin()),
    }
}

async fn run_session(mut terminal: DefaultTerminal, mut app: SessionApp) -> Result<SessionApp> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let tick_tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // the first tick fires immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            if tick_tx.send(Event::Tick).is_err() {
                break;
            }
        }
    });

    // crossterm reads block, keep them off the runtime
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(TermEvent::Key(key)) => {
                    if tx.send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match rx.recv().await {
            Some(Event::Tick) => app.on_tick(),
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key.code) == Action::Quit {
                    break;
                }
            }
            Some(Event::Key(_)) => {}
            None => break,
        }
    }

    Ok(app)
}

fn print_summary(summary: &SessionSummary) {
    for exercise in &summary.per_exercise {
        let sets: Vec<String> = exercise.sets.iter().map(|s| s.to_string()).collect();
        println!("\t{}: {}", exercise.exercise_name, sets.join(", "));
    }
    if !summary.notes.is_empty() {
        println!("\tNotes: {}", summary.notes);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    let log_level = match args.log_level.as_deref() {
        Some(level) => {
            Some(parse_level(level).ok_or_else(|| anyhow!("Unknown log level '{}'", level))?)
        }
        None => config.log_level,
    };
    if let Some(level) = log_level {
        if logs_to_file(&args.command) {
            init_file_logger(level, args.log_file.unwrap_or(config.log_file))?;
        } else {
            init_logger(level);
        }
    }

    let database_url = args.database.unwrap_or(config.database_url);
    let catalog_path = args.catalog.or(config.catalog_path);
    debug!("Using database {} and catalog {:?}", database_url, catalog_path);

    match args.command {
        Commands::Workouts => {
            let catalog = load_catalog(catalog_path.as_deref())?;
            for workout in catalog.workouts() {
                println!("{}, {}", workout.id, workout.name);
                for exercise in &workout.exercises {
                    println!(
                        "\t{} - {} sets, {}s rest",
                        exercise.name, exercise.target_sets, exercise.rest_seconds
                    );
                }
            }
            Ok(())
        }
        Commands::Run { workout_id } => {
            let catalog = load_catalog(catalog_path.as_deref())?;
            let definition = catalog
                .workout(workout_id)
                .cloned()
                .ok_or_else(|| anyhow!("No workout with id {}", workout_id))?;
            let store = SqliteSummaryStore::open(&database_url)?;
            let app = SessionApp::new(definition)?;

            let terminal = ratatui::init();
            let result = run_session(terminal, app).await;
            ratatui::restore();

            match result?.summary {
                Some(summary) => {
                    let id = store.save(&summary)?;
                    info!("Workout summary stored with id {}", id);
                    println!(
                        "Saved workout #{}: {} in {}",
                        id,
                        summary.workout_name,
                        summary.duration_display()
                    );
                    print_summary(&summary);
                }
                None => println!("Exited without completing the workout"),
            }
            Ok(())
        }
        Commands::History { verbose } => {
            let store = SqliteSummaryStore::open(&database_url)?;
            let summaries = store.list()?;
            if summaries.is_empty() {
                println!("No saved workouts yet");
            }
            for stored in summaries {
                println!("{}", stored);
                if verbose {
                    print_summary(&stored.summary);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_run_logs_to_a_file() {
        let args = Args::parse_from(["fitlog", "--log-level", "debug", "run", "2"]);
        assert!(logs_to_file(&args.command));
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        let args = Args::parse_from(["fitlog", "history", "-v", "--log-file", "x.log"]);
        assert!(!logs_to_file(&args.command));
        assert_eq!(args.log_file, Some(PathBuf::from("x.log")));
    }
}
