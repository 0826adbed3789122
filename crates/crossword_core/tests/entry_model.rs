use crossword_core::{
    check_entry_fields, Entry, InvalidFieldError, MAX_ANSWER_LENGTH, MAX_CLUE_LENGTH,
};

#[test]
fn clue_length_bounds() {
    for length in [0, 1, 2, MAX_CLUE_LENGTH - 1, MAX_CLUE_LENGTH, MAX_CLUE_LENGTH + 1] {
        let clue = "c".repeat(length);
        let result = check_entry_fields(&clue, "answer", 1);
        if (1..=MAX_CLUE_LENGTH).contains(&length) {
            assert_eq!(result, Ok(()), "clue length {length} should pass");
        } else {
            assert_eq!(result, Err(InvalidFieldError::InvalidClueLength));
        }
    }
}

#[test]
fn answer_length_bounds() {
    for length in [0, 1, MAX_ANSWER_LENGTH, MAX_ANSWER_LENGTH + 1, 40] {
        let answer = "a".repeat(length);
        let result = check_entry_fields("clue", &answer, 1);
        if (1..=MAX_ANSWER_LENGTH).contains(&length) {
            assert_eq!(result, Ok(()), "answer length {length} should pass");
        } else {
            assert_eq!(result, Err(InvalidFieldError::InvalidAnswerLength));
        }
    }
}

#[test]
fn difficulty_bounds() {
    for difficulty in [i32::MIN, -1, 0, 1, 2, 3, 5, i32::MAX] {
        let result = check_entry_fields("clue", "answer", difficulty);
        if (0..=2).contains(&difficulty) {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(result, Err(InvalidFieldError::InvalidDifficulty));
        }
    }
}

#[test]
fn date_is_not_validated() {
    let entry = Entry::new("clue", "answer", 0, "", 1);
    assert_eq!(entry.validate(), Ok(()));
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let entry = Entry::new("Capital of France", "Paris", 1, "2023-01-01", 42);

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["clue"], "Capital of France");
    assert_eq!(json["answer"], "Paris");
    assert_eq!(json["difficulty"], 1);
    assert_eq!(json["date"], "2023-01-01");
    assert_eq!(json["id"], 42);

    let decoded: Entry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn field_errors_serialize_as_snake_case_codes() {
    let json = serde_json::to_value(InvalidFieldError::InvalidAnswerLength).unwrap();
    assert_eq!(json, "invalid_answer_length");
}
