//! Repository layer: the database adapter behind the entry store.
//!
//! # Responsibility
//! - Define the storage contract the entry store talks to.
//! - Isolate SQL details from validation and id assignment.
//!
//! # Invariants
//! - Repository writes re-check entry fields before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod entry_repo;
pub mod memory_repo;
