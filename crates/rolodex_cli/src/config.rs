//! Runtime configuration resolved from the environment.
//!
//! The console takes no flags; everything tunable comes from `ROLODEX_*`
//! variables, and blank values fall back to defaults.

use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ROLODEX_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ROLODEX_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ROLODEX_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "customers.db";
const DEFAULT_LOG_DIR_NAME: &str = "rolodex-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file, created on first run.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_VAR)
                .unwrap_or_else(|| rolodex_core::default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_VAR)
                .map(|raw| absolutize(PathBuf::from(raw)))
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}

/// Anchors a relative path at the working directory.
fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => std::env::temp_dir().join(path),
    }
}
