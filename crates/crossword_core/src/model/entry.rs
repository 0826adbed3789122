//! Entry domain model.
//!
//! # Responsibility
//! - Define the clue/answer record persisted in the `entries` table.
//! - Own field constraints shared by the store and repository read paths.
//!
//! # Invariants
//! - `id` is assigned by the entry store and never changes afterwards.
//! - `clue` holds 1..=250 characters, `answer` holds 1..=21 characters.
//! - `difficulty` is within 0..=2.
//! - `date` is free text and is not validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned integer identifier of an entry.
pub type EntryId = i64;

pub const MAX_CLUE_LENGTH: usize = 250;
pub const MAX_ANSWER_LENGTH: usize = 21;
pub const MIN_DIFFICULTY: i32 = 0;
pub const MAX_DIFFICULTY: i32 = 2;

/// Field-level validation failure for entry writes.
///
/// Variants are ordered the way checks run: the first failing field wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidFieldError {
    /// Clue is empty or longer than [`MAX_CLUE_LENGTH`].
    InvalidClueLength,
    /// Answer is empty or longer than [`MAX_ANSWER_LENGTH`].
    InvalidAnswerLength,
    /// Difficulty is outside `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    InvalidDifficulty,
}

impl Display for InvalidFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidClueLength => {
                write!(f, "clue must be between 1 and {MAX_CLUE_LENGTH} characters")
            }
            Self::InvalidAnswerLength => write!(
                f,
                "answer must be between 1 and {MAX_ANSWER_LENGTH} characters"
            ),
            Self::InvalidDifficulty => write!(
                f,
                "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"
            ),
        }
    }
}

impl Error for InvalidFieldError {}

/// One crossword clue/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub clue: String,
    pub answer: String,
    pub difficulty: i32,
    /// Free-form date text as supplied by the caller.
    pub date: String,
    pub id: EntryId,
}

impl Entry {
    /// Builds an entry without validating fields.
    ///
    /// Callers on write paths run [`check_entry_fields`] first; read paths
    /// use [`Entry::validate`] on decoded rows.
    pub fn new(
        clue: impl Into<String>,
        answer: impl Into<String>,
        difficulty: i32,
        date: impl Into<String>,
        id: EntryId,
    ) -> Self {
        Self {
            clue: clue.into(),
            answer: answer.into(),
            difficulty,
            date: date.into(),
            id,
        }
    }

    /// Checks this entry against the field constraints.
    pub fn validate(&self) -> Result<(), InvalidFieldError> {
        check_entry_fields(&self.clue, &self.answer, self.difficulty)
    }

    /// Replaces every mutable field, keeping `id`.
    pub fn overwrite_from(&mut self, other: &Entry) {
        self.clue.clone_from(&other.clue);
        self.answer.clone_from(&other.answer);
        self.difficulty = other.difficulty;
        self.date.clone_from(&other.date);
    }
}

/// Validates entry fields in fixed order: clue, answer, difficulty.
///
/// Lengths count Unicode scalar values, not bytes.
pub fn check_entry_fields(
    clue: &str,
    answer: &str,
    difficulty: i32,
) -> Result<(), InvalidFieldError> {
    if !length_in_range(clue, MAX_CLUE_LENGTH) {
        return Err(InvalidFieldError::InvalidClueLength);
    }
    if !length_in_range(answer, MAX_ANSWER_LENGTH) {
        return Err(InvalidFieldError::InvalidAnswerLength);
    }
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(InvalidFieldError::InvalidDifficulty);
    }
    Ok(())
}

fn length_in_range(value: &str, max: usize) -> bool {
    let length = value.chars().count();
    (1..=max).contains(&length)
}

#[cfg(test)]
mod tests {
    use super::{check_entry_fields, Entry, InvalidFieldError};

    #[test]
    fn clue_check_runs_before_answer_and_difficulty() {
        assert_eq!(
            check_entry_fields("", "", 9),
            Err(InvalidFieldError::InvalidClueLength)
        );
        assert_eq!(
            check_entry_fields("clue", "", 9),
            Err(InvalidFieldError::InvalidAnswerLength)
        );
    }

    #[test]
    fn multibyte_characters_count_once() {
        let answer = "é".repeat(21);
        assert!(answer.len() > 21);
        assert_eq!(check_entry_fields("clue", &answer, 0), Ok(()));
    }

    #[test]
    fn overwrite_keeps_id() {
        let mut entry = Entry::new("old", "old", 0, "2023-01-01", 7);
        entry.overwrite_from(&Entry::new("new", "new", 2, "2024-02-02", 99));

        assert_eq!(entry, Entry::new("new", "new", 2, "2024-02-02", 7));
    }
}
