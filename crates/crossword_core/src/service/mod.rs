//! Core use-case services.
//!
//! # Responsibility
//! - Turn caller input into validated repository calls.
//! - Keep CLI and other front ends decoupled from storage details.

pub mod entry_service;
