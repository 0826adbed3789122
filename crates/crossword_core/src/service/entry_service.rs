//! Entry store use-case service.
//!
//! # Responsibility
//! - Validate entry fields before anything reaches a repository.
//! - Assign sequential entry ids.
//! - Translate repository outcomes into per-operation error codes.
//!
//! # Invariants
//! - Validation failures never mutate the store or the repository.
//! - `latest_id` only grows between refreshes, so ids handed out by one
//!   service are strictly increasing.
//! - Edits and deletes check that the target exists before touching storage.
//! - The service stays storage-agnostic; SQL lives in the repository.

use crate::model::entry::{check_entry_fields, Entry, EntryId, InvalidFieldError};
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult, SortField};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of [`EntryService::add_entry`].
#[derive(Debug)]
pub enum EntryAddError {
    /// A field is out of range; nothing was persisted.
    InvalidField(InvalidFieldError),
    /// The highest stored id is `EntryId::MAX`; no further id can be assigned.
    IdsExhausted,
    /// Storage rejected the insert; the mirror is unchanged.
    Db(RepoError),
}

impl Display for EntryAddError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::IdsExhausted => write!(f, "entry ids exhausted at {}", EntryId::MAX),
            Self::Db(err) => write!(f, "failed to store entry: {err}"),
        }
    }
}

impl Error for EntryAddError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::IdsExhausted => None,
        }
    }
}

impl From<InvalidFieldError> for EntryAddError {
    fn from(value: InvalidFieldError) -> Self {
        Self::InvalidField(value)
    }
}

/// Failure of [`EntryService::delete_entry`].
#[derive(Debug)]
pub enum EntryDeletionError {
    EntryNotFound(EntryId),
    DbDeletionError(RepoError),
}

impl Display for EntryDeletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::DbDeletionError(err) => write!(f, "failed to delete entry: {err}"),
        }
    }
}

impl Error for EntryDeletionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DbDeletionError(err) => Some(err),
            Self::EntryNotFound(_) => None,
        }
    }
}

impl From<RepoError> for EntryDeletionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::DbDeletionError(other),
        }
    }
}

/// Failure of [`EntryService::edit_entry`].
#[derive(Debug)]
pub enum EntryEditError {
    /// New field values are out of range; checked before the id lookup.
    InvalidField(InvalidFieldError),
    EntryNotFound(EntryId),
    DbEditError(RepoError),
}

impl Display for EntryEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::DbEditError(err) => write!(f, "failed to update entry: {err}"),
        }
    }
}

impl Error for EntryEditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::DbEditError(err) => Some(err),
            Self::EntryNotFound(_) => None,
        }
    }
}

impl From<InvalidFieldError> for EntryEditError {
    fn from(value: InvalidFieldError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<RepoError> for EntryEditError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::DbEditError(other),
        }
    }
}

/// Failure of [`EntryService::sort_by_clue`] / [`EntryService::sort_by_answer`].
#[derive(Debug)]
pub struct SortError {
    pub field: SortField,
    pub source: RepoError,
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to sort entries by {}: {}", self.field, self.source)
    }
}

impl Error for SortError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Entry store over a repository implementation.
///
/// Owned by whoever drives it; mutating calls take `&mut self`, so one
/// caller at a time is enforced at compile time.
pub struct EntryService<R: EntryRepository> {
    repo: R,
    latest_id: EntryId,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service and seeds id assignment from the repository.
    pub fn new(repo: R) -> RepoResult<Self> {
        let mut service = Self { repo, latest_id: 0 };
        service.refresh_next_id()?;
        Ok(service)
    }

    /// Highest id known to this service.
    pub fn latest_id(&self) -> EntryId {
        self.latest_id
    }

    /// Re-reads the highest stored id and uses it for the next assignment.
    pub fn refresh_next_id(&mut self) -> RepoResult<EntryId> {
        self.latest_id = self.repo.next_id()?;
        Ok(self.latest_id)
    }

    /// Refreshes the mirror from storage and returns it.
    pub fn get_entries(&mut self) -> RepoResult<&[Entry]> {
        self.repo.get_entries()
    }

    /// Current mirror without refreshing.
    pub fn entries(&self) -> &[Entry] {
        self.repo.entries()
    }

    /// Looks up `id` in the current mirror.
    pub fn find_entry(&self, id: EntryId) -> Option<&Entry> {
        self.repo.find_entry(id)
    }

    /// Validates and stores a new entry, returning its assigned id.
    ///
    /// # Errors
    /// - `InvalidField` when a field is out of range; no id is consumed.
    /// - `IdsExhausted` when `latest_id` is already `EntryId::MAX`.
    /// - `Db` when storage rejects the insert. The id stays consumed so a
    ///   retry never reuses it.
    pub fn add_entry(
        &mut self,
        clue: &str,
        answer: &str,
        difficulty: i32,
        date: &str,
    ) -> Result<EntryId, EntryAddError> {
        if let Err(err) = check_entry_fields(clue, answer, difficulty) {
            warn!("event=entry_add module=service status=rejected reason={err:?}");
            return Err(err.into());
        }

        let Some(id) = self.latest_id.checked_add(1) else {
            warn!(
                "event=entry_add module=service status=rejected reason=ids_exhausted latest_id={}",
                self.latest_id
            );
            return Err(EntryAddError::IdsExhausted);
        };
        self.latest_id = id;
        self.repo
            .add_entry(Entry::new(clue, answer, difficulty, date, id))
            .map_err(EntryAddError::Db)?;

        info!("event=entry_add module=service status=ok entry_id={id}");
        Ok(id)
    }

    /// Deletes the entry with `id` if the mirror holds it.
    pub fn delete_entry(&mut self, id: EntryId) -> Result<(), EntryDeletionError> {
        if self.repo.find_entry(id).is_none() {
            return Err(EntryDeletionError::EntryNotFound(id));
        }

        self.repo.delete_entry(id)?;
        Ok(())
    }

    /// Replaces every field of entry `id` except the id itself.
    ///
    /// # Errors
    /// - `InvalidField` when the new values are out of range, whether or not
    ///   `id` exists.
    /// - `EntryNotFound` when the mirror has no entry `id`.
    /// - `DbEditError` when storage rejects the update; the mirror keeps the
    ///   old values.
    pub fn edit_entry(
        &mut self,
        clue: &str,
        answer: &str,
        difficulty: i32,
        date: &str,
        id: EntryId,
    ) -> Result<(), EntryEditError> {
        if let Err(err) = check_entry_fields(clue, answer, difficulty) {
            warn!(
                "event=entry_edit module=service status=rejected entry_id={id} reason={err:?}"
            );
            return Err(err.into());
        }
        if self.repo.find_entry(id).is_none() {
            return Err(EntryEditError::EntryNotFound(id));
        }

        self.repo
            .edit_entry(&Entry::new(clue, answer, difficulty, date, id))?;
        Ok(())
    }

    /// Reloads the mirror ordered by clue.
    pub fn sort_by_clue(&mut self) -> Result<(), SortError> {
        self.sort_by(SortField::Clue)
    }

    /// Reloads the mirror ordered by answer.
    pub fn sort_by_answer(&mut self) -> Result<(), SortError> {
        self.sort_by(SortField::Answer)
    }

    fn sort_by(&mut self, field: SortField) -> Result<(), SortError> {
        self.repo
            .sort_by(field)
            .map(|_| ())
            .map_err(|source| SortError { field, source })
    }
}
