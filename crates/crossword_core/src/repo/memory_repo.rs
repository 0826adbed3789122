//! In-process entry repository.
//!
//! Keeps a `Vec` standing in for the `entries` table and applies the same
//! mirror rules as the SQLite repository: writes land in the table first,
//! reads rebuild the mirror from scratch.

use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{
    EntryRepository, RepoError, RepoResult, SortField, ENTRY_LIST_LIMIT,
};
use log::debug;

/// Entry repository backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    table: Vec<Entry>,
    mirror: Vec<Entry>,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backing table, e.g. with rows loaded elsewhere.
    ///
    /// Rows are stored as given; the mirror starts empty.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            table: entries,
            mirror: Vec::new(),
        }
    }

    fn stored_position(&self, id: EntryId) -> Option<usize> {
        self.table.iter().position(|entry| entry.id == id)
    }

    fn mirror_position(&self, id: EntryId) -> Option<usize> {
        self.mirror.iter().position(|entry| entry.id == id)
    }
}

impl EntryRepository for InMemoryEntryRepository {
    fn add_entry(&mut self, entry: Entry) -> RepoResult<()> {
        entry.validate()?;
        if self.stored_position(entry.id).is_some() {
            return Err(RepoError::DuplicateId(entry.id));
        }

        self.table.push(entry.clone());
        self.mirror.push(entry);
        Ok(())
    }

    fn next_id(&self) -> RepoResult<EntryId> {
        Ok(self.table.iter().map(|entry| entry.id).max().unwrap_or(0))
    }

    fn find_entry(&self, id: EntryId) -> Option<&Entry> {
        self.mirror.iter().find(|entry| entry.id == id)
    }

    fn delete_entry(&mut self, id: EntryId) -> RepoResult<()> {
        let index = self.mirror_position(id).ok_or(RepoError::NotFound(id))?;

        self.table.retain(|entry| entry.id != id);
        self.mirror.remove(index);
        Ok(())
    }

    fn edit_entry(&mut self, entry: &Entry) -> RepoResult<()> {
        entry.validate()?;
        let index = self
            .mirror_position(entry.id)
            .ok_or(RepoError::NotFound(entry.id))?;
        let stored = self
            .stored_position(entry.id)
            .ok_or(RepoError::NotFound(entry.id))?;

        self.table[stored].overwrite_from(entry);
        self.mirror[index].overwrite_from(entry);
        Ok(())
    }

    fn get_entries(&mut self) -> RepoResult<&[Entry]> {
        self.mirror = self.table.iter().take(ENTRY_LIST_LIMIT).cloned().collect();
        Ok(&self.mirror)
    }

    fn sort_by(&mut self, field: SortField) -> RepoResult<&[Entry]> {
        let mut sorted = self.table.clone();
        sorted.sort_by(|left, right| {
            let ordering = match field {
                SortField::Clue => left.clue.cmp(&right.clue),
                SortField::Answer => left.answer.cmp(&right.answer),
            };
            ordering.then(left.id.cmp(&right.id))
        });

        debug!(
            "event=entry_sort module=memory_repo status=ok field={field} rows={}",
            sorted.len()
        );
        self.mirror = sorted;
        Ok(&self.mirror)
    }

    fn entries(&self) -> &[Entry] {
        &self.mirror
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryEntryRepository;
    use crate::model::entry::Entry;
    use crate::repo::entry_repo::EntryRepository;

    #[test]
    fn delete_of_entry_missing_from_table_drops_mirror_copy() {
        let mut repo = InMemoryEntryRepository::new();
        repo.mirror.push(Entry::new("stale", "stale", 0, "", 5));

        repo.delete_entry(5).unwrap();

        assert!(repo.find_entry(5).is_none());
        assert!(repo.get_entries().unwrap().is_empty());
    }
}
