//! SQLite storage bootstrap for the crossword entry table.
//!
//! # Responsibility
//! - Open and configure one SQLite connection per statement.
//! - Create the `entries` table before any data access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database written by a newer binary is rejected, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::open_db;

/// Result of opening or migrating the entries database.
pub type DbResult<T> = Result<T, DbError>;

/// Why the entries database could not be opened.
#[derive(Debug)]
pub enum DbError {
    /// The SQLite driver failed to open, configure or migrate the file.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a later build and its schema is unknown here.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "entries database is at schema version {found}; this build understands up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}
