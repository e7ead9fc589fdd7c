use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

fn builder(level: LevelFilter, target: env_logger::Target) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}: {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(target)
        .filter_level(level);
    builder
}

/// Logs go to stderr.
pub fn init_logger(level: LevelFilter) {
    let _ = builder(level, env_logger::Target::Stderr).try_init();
    log::set_max_level(level);
}

/// Appends log lines to `path`, for when the terminal belongs to a UI.
pub fn init_file_logger(level: LevelFilter, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let _ = builder(level, env_logger::Target::Pipe(Box::new(file))).try_init();
    log::set_max_level(level);
    Ok(())
}

pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(lvl) => {
            init_logger(lvl);
            true
        }
        None => false,
    }
}
