//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate entry CRUD and sort calls into SQL against `entries`.
//! - Keep a local mirror of the rows returned by the latest read.
//!
//! # Invariants
//! - Every statement runs on its own connection, dropped before returning.
//! - Mirror mutations are committed only after the SQL statement succeeded.
//! - Reads discard the mirror and rebuild it from the result set.
//! - Rows that break field constraints are rejected, not masked.

use crate::db::{open_db, DbError};
use crate::model::entry::{Entry, EntryId, InvalidFieldError};
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Row cap for the unordered listing.
pub const ENTRY_LIST_LIMIT: usize = 10;

const ENTRY_SELECT_SQL: &str = "SELECT clue, answer, difficulty, date, id FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(InvalidFieldError),
    Db(DbError),
    NotFound(EntryId),
    DuplicateId(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::DuplicateId(id) => write!(f, "entry id already in use: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<InvalidFieldError> for RepoError {
    fn from(value: InvalidFieldError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Column an ordered fetch sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Clue,
    Answer,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Clue => "clue",
            Self::Answer => "answer",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Storage backend behind the entry store.
///
/// Implementations own a mirror of the last fetched rows. Lookups read the
/// mirror only; `get_entries` and `sort_by` replace it wholesale.
pub trait EntryRepository {
    /// Persists a pre-validated entry carrying its assigned id.
    fn add_entry(&mut self, entry: Entry) -> RepoResult<()>;
    /// Returns the highest stored id, or 0 when no rows exist.
    fn next_id(&self) -> RepoResult<EntryId>;
    /// Looks up `id` in the mirror without touching storage.
    fn find_entry(&self, id: EntryId) -> Option<&Entry>;
    /// Removes the entry with `id` from storage and mirror.
    ///
    /// `NotFound` only when the mirror lacks `id`. A row already gone from
    /// storage still counts as deleted and its mirror copy is dropped.
    fn delete_entry(&mut self, id: EntryId) -> RepoResult<()>;
    /// Overwrites the stored fields of `entry.id` with `entry`.
    fn edit_entry(&mut self, entry: &Entry) -> RepoResult<()>;
    /// Rebuilds the mirror from an unordered, capped fetch.
    fn get_entries(&mut self) -> RepoResult<&[Entry]>;
    /// Rebuilds the mirror from a fetch ordered by `field`, ties by id.
    ///
    /// The mirror is left empty when the fetch fails.
    fn sort_by(&mut self, field: SortField) -> RepoResult<&[Entry]>;
    /// Current mirror contents.
    fn entries(&self) -> &[Entry];

    fn sort_by_clue(&mut self) -> RepoResult<&[Entry]> {
        self.sort_by(SortField::Clue)
    }

    fn sort_by_answer(&mut self) -> RepoResult<&[Entry]> {
        self.sort_by(SortField::Answer)
    }
}

/// SQLite-backed entry repository.
///
/// Holds the database path, not a connection: each statement opens and
/// closes its own.
#[derive(Debug)]
pub struct SqliteEntryRepository {
    db_path: PathBuf,
    mirror: Vec<Entry>,
}

impl SqliteEntryRepository {
    /// Creates a repository for `db_path` with an empty mirror.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            mirror: Vec::new(),
        }
    }

    /// Creates a repository and verifies the database opens and migrates.
    pub fn try_new(db_path: impl Into<PathBuf>) -> RepoResult<Self> {
        let repo = Self::new(db_path);
        repo.with_connection("entry_repo_open", |_| Ok(()))?;
        Ok(repo)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.mirror.iter().position(|entry| entry.id == id)
    }

    fn with_connection<T>(
        &self,
        event: &'static str,
        statement: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let result = open_db(&self.db_path)
            .map_err(RepoError::from)
            .and_then(|conn| statement(&conn));

        if let Err(err) = &result {
            error!("event={event} module=repo status=error error={err}");
        }
        result
    }

    fn fetch(&self, event: &'static str, sql: &str) -> RepoResult<Vec<Entry>> {
        self.with_connection(event, |conn| {
            let mut stmt = conn.prepare(sql)?;
            let mut rows = stmt.query([])?;
            let mut entries = Vec::new();

            while let Some(row) = rows.next()? {
                entries.push(parse_entry_row(row)?);
            }

            Ok(entries)
        })
    }
}

impl EntryRepository for SqliteEntryRepository {
    fn add_entry(&mut self, entry: Entry) -> RepoResult<()> {
        entry.validate()?;

        let inserted = self.with_connection("entry_insert", |conn| {
            Ok(conn.execute(
                "INSERT INTO entries (clue, answer, difficulty, date, id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    entry.clue.as_str(),
                    entry.answer.as_str(),
                    entry.difficulty,
                    entry.date.as_str(),
                    entry.id,
                ],
            )?)
        })?;

        info!(
            "event=entry_insert module=repo status=ok entry_id={} rows={inserted}",
            entry.id
        );
        self.mirror.push(entry);
        Ok(())
    }

    fn next_id(&self) -> RepoResult<EntryId> {
        let max_id = self.with_connection("entry_max_id", |conn| {
            Ok(conn.query_row("SELECT MAX(id) FROM entries;", [], |row| {
                row.get::<_, Option<EntryId>>(0)
            })?)
        })?;

        Ok(max_id.unwrap_or(0))
    }

    fn find_entry(&self, id: EntryId) -> Option<&Entry> {
        self.mirror.iter().find(|entry| entry.id == id)
    }

    fn delete_entry(&mut self, id: EntryId) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::NotFound(id))?;

        let deleted = self.with_connection("entry_delete", |conn| {
            Ok(conn.execute("DELETE FROM entries WHERE id = ?1;", [id])?)
        })?;

        // Zero rows still succeeds: the row is already gone from storage.
        info!("event=entry_delete module=repo status=ok entry_id={id} rows={deleted}");
        self.mirror.remove(index);
        Ok(())
    }

    fn edit_entry(&mut self, entry: &Entry) -> RepoResult<()> {
        entry.validate()?;
        let index = self.position(entry.id).ok_or(RepoError::NotFound(entry.id))?;

        let changed = self.with_connection("entry_update", |conn| {
            Ok(conn.execute(
                "UPDATE entries
                 SET clue = ?1, answer = ?2, difficulty = ?3, date = ?4
                 WHERE id = ?5;",
                params![
                    entry.clue.as_str(),
                    entry.answer.as_str(),
                    entry.difficulty,
                    entry.date.as_str(),
                    entry.id,
                ],
            )?)
        })?;

        if changed == 0 {
            error!(
                "event=entry_update module=repo status=error entry_id={} error_code=row_missing",
                entry.id
            );
            return Err(RepoError::NotFound(entry.id));
        }

        info!(
            "event=entry_update module=repo status=ok entry_id={} rows={changed}",
            entry.id
        );
        self.mirror[index].overwrite_from(entry);
        Ok(())
    }

    fn get_entries(&mut self) -> RepoResult<&[Entry]> {
        self.mirror.clear();
        let sql = format!("{ENTRY_SELECT_SQL} LIMIT {ENTRY_LIST_LIMIT};");
        self.mirror = self.fetch("entry_list", &sql)?;

        debug!(
            "event=entry_list module=repo status=ok rows={}",
            self.mirror.len()
        );
        Ok(&self.mirror)
    }

    fn sort_by(&mut self, field: SortField) -> RepoResult<&[Entry]> {
        self.mirror.clear();
        let sql = format!("{ENTRY_SELECT_SQL} ORDER BY {}, id;", field.column());
        self.mirror = self.fetch("entry_sort", &sql)?;

        debug!(
            "event=entry_sort module=repo status=ok field={field} rows={}",
            self.mirror.len()
        );
        Ok(&self.mirror)
    }

    fn entries(&self) -> &[Entry] {
        &self.mirror
    }
}

/// Maps one row in `clue, answer, difficulty, date, id` column order.
fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let entry = Entry {
        clue: row.get(0)?,
        answer: row.get(1)?,
        difficulty: row.get(2)?,
        date: row.get(3)?,
        id: row.get(4)?,
    };

    entry.validate().map_err(|err| {
        RepoError::InvalidData(format!("entries row with id {}: {err}", entry.id))
    })?;
    Ok(entry)
}
