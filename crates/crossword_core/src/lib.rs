//! Core logic for the crossword entry store.
//! This crate owns entry validation, id assignment and persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{
    check_entry_fields, Entry, EntryId, InvalidFieldError, MAX_ANSWER_LENGTH, MAX_CLUE_LENGTH,
    MAX_DIFFICULTY, MIN_DIFFICULTY,
};
pub use repo::entry_repo::{
    EntryRepository, RepoError, RepoResult, SortField, SqliteEntryRepository, ENTRY_LIST_LIMIT,
};
pub use repo::memory_repo::InMemoryEntryRepository;
pub use service::entry_service::{
    EntryAddError, EntryDeletionError, EntryEditError, EntryService, SortError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
