//! Externally supplied store settings.
//!
//! # Responsibility
//! - Resolve the database location and logging options from the environment.
//! - Keep connection settings out of source code.
//!
//! # Invariants
//! - `database_path` is never empty.
//! - A `.env` file is optional; real environment variables take precedence.
//! - A `.env` file that exists but cannot be read or parsed is an error.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CROSSWORD_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CROSSWORD_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CROSSWORD_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    Missing(&'static str),
    /// A `.env` file was found but could not be loaded.
    DotEnv(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "{name} must be set"),
            Self::DotEnv(message) => write!(f, "failed to load .env: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings needed to open the entry store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file holding the `entries` table.
    pub database_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<String>,
}

impl StoreConfig {
    /// Loads `.env` when present, then reads the `CROSSWORD_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like [`StoreConfig::from_env`], but `overrides` wins over the
    /// environment for any variable it returns a value for.
    pub fn from_env_with(
        overrides: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        dotenv_outcome(dotenvy::dotenv())?;
        Self::from_lookup(|name| overrides(name).or_else(|| std::env::var(name).ok()))
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_path = non_blank(DB_PATH_VAR)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(DB_PATH_VAR))?;
        let log_level =
            non_blank(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            database_path,
            log_level,
            log_dir: non_blank(LOG_DIR_VAR),
        })
    }
}

/// Treats an absent `.env` as success and anything else as a load failure.
fn dotenv_outcome<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::DotEnv(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        dotenv_outcome, ConfigError, StoreConfig, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR,
    };
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn missing_database_path_is_rejected() {
        let err = StoreConfig::from_lookup(lookup_from(&[(DB_PATH_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(DB_PATH_VAR));
    }

    #[test]
    fn optional_values_fall_back_to_defaults() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[(DB_PATH_VAR, "/tmp/crossword.db")])).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/crossword.db"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "entries.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, "/var/log/crossword"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/crossword"));
    }

    #[test]
    fn override_wins_over_environment() {
        let config = StoreConfig::from_env_with(|name: &str| {
            (name == DB_PATH_VAR).then(|| "/override/entries.db".to_string())
        })
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/override/entries.db"));
    }

    #[test]
    fn absent_dotenv_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join(".env");

        assert_eq!(dotenv_outcome(dotenvy::from_path(&missing)), Ok(()));
    }

    #[test]
    fn malformed_dotenv_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "BAD KEY=value\n").unwrap();

        let err = dotenv_outcome(dotenvy::from_path(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::DotEnv(_)));
    }
}
