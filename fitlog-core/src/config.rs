//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::logging::parse_level;

pub const DEFAULT_DATABASE_URL: &str = "fitlog.db";
pub const DEFAULT_LOG_FILE: &str = "fitlog.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<LevelFilter>,
    /// Where `run` writes its logs while the TUI owns the terminal.
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            catalog_path: None,
            log_level: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// `FITLOG_DATABASE_URL`, `FITLOG_CATALOG`, `FITLOG_LOG` and `FITLOG_LOG_FILE`,
    /// after loading `.env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("FITLOG_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            catalog_path: non_empty("FITLOG_CATALOG").map(PathBuf::from),
            log_level: non_empty("FITLOG_LOG").and_then(|v| parse_level(&v)),
            log_file: non_empty("FITLOG_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
