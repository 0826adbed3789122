use crossword_core::{
    Entry, EntryDeletionError, EntryRepository, EntryService,
    InMemoryEntryRepository, RepoError, ENTRY_LIST_LIMIT,
};

fn seeded_service() -> EntryService<InMemoryEntryRepository> {
    let repo = InMemoryEntryRepository::with_entries(vec![
        Entry::new("Opposite of up", "Down", 0, "2023-01-01", 3),
        Entry::new("Large feline", "Lion", 1, "2023-01-02", 8),
        Entry::new("Capital of Japan", "Tokyo", 2, "2023-01-03", 5),
    ]);
    EntryService::new(repo).unwrap()
}

#[test]
fn store_behaves_the_same_over_memory_backend() {
    let mut service = seeded_service();
    assert_eq!(service.latest_id(), 8);

    let id = service
        .add_entry("Capital of France", "Paris", 1, "2023-01-01")
        .unwrap();
    assert_eq!(id, 9);

    service
        .edit_entry("Capital of Italy", "Rome", 1, "2023-02-02", id)
        .unwrap();
    service.get_entries().unwrap();
    assert_eq!(service.find_entry(id).unwrap().answer, "Rome");

    service.delete_entry(3).unwrap();
    service.get_entries().unwrap();
    assert!(service.find_entry(3).is_none());
    assert!(matches!(
        service.delete_entry(3).unwrap_err(),
        EntryDeletionError::EntryNotFound(3)
    ));
}

#[test]
fn sort_by_answer_orders_every_stored_entry() {
    let mut service = seeded_service();

    service.sort_by_answer().unwrap();

    let answers: Vec<_> = service
        .entries()
        .iter()
        .map(|entry| entry.answer.as_str())
        .collect();
    assert_eq!(answers, vec!["Down", "Lion", "Tokyo"]);
}

#[test]
fn listing_is_capped_like_sqlite() {
    let mut service = EntryService::new(InMemoryEntryRepository::new()).unwrap();
    for n in 0..(ENTRY_LIST_LIMIT + 3) {
        service
            .add_entry(&format!("clue {n}"), "answer", 0, "")
            .unwrap();
    }

    assert_eq!(service.get_entries().unwrap().len(), ENTRY_LIST_LIMIT);
    service.sort_by_clue().unwrap();
    assert_eq!(service.entries().len(), ENTRY_LIST_LIMIT + 3);
}

#[test]
fn duplicate_id_is_rejected_and_not_mirrored() {
    let mut repo = InMemoryEntryRepository::new();
    repo.add_entry(Entry::new("first", "one", 0, "", 1)).unwrap();

    let err = repo
        .add_entry(Entry::new("second", "two", 0, "", 1))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateId(1)));
    assert_eq!(repo.entries().len(), 1);
    assert_eq!(repo.find_entry(1).unwrap().clue, "first");
}

#[test]
fn seeded_rows_are_invisible_until_fetched() {
    let mut service = seeded_service();

    assert!(service.find_entry(3).is_none());
    assert!(matches!(
        service.delete_entry(3).unwrap_err(),
        EntryDeletionError::EntryNotFound(3)
    ));

    service.get_entries().unwrap();
    assert_eq!(service.find_entry(3).unwrap().answer, "Down");
}
