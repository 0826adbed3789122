//! Domain model for crossword entries.
//!
//! # Responsibility
//! - Define the canonical entry record used by store and repositories.
//! - Keep field constraints in one place.
//!
//! # Invariants
//! - Every entry is identified by a store-assigned integer `EntryId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod entry;
