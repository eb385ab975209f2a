//! Edge case tests for circ-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use circ_engine::{Error, Library, LibrarySnapshot, Store};

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn unicode_metadata() {
    let mut library = Library::new();

    let titles = vec![
        "日本語テスト",
        "Привет мир",
        "مرحبا بالعالم",
        "🎉📚💯",
        "Hello\nWorld\tTab",
    ];

    for (i, title) in titles.iter().enumerate() {
        let book = library
            .register_book(&format!("ISBN-{}", i), title, "作者")
            .unwrap();
        assert_eq!(&book.title, title);
    }

    assert_eq!(library.list_books().len(), titles.len());
}

#[test]
fn whitespace_only_fields_rejected() {
    let mut library = Library::new();

    assert_eq!(
        library.register_book(" \t\n", "Title A", "Author A"),
        Err(Error::EmptyField("isbn"))
    );
    assert_eq!(
        library.register_borrower("  ", "a@x.com"),
        Err(Error::EmptyField("name"))
    );
}

#[test]
fn long_field_values() {
    let mut library = Library::new();
    let long = "x".repeat(10_000);

    let book = library.register_book(&long, &long, &long).unwrap();
    assert_eq!(book.isbn.len(), 10_000);
}

// ============================================================================
// ISBN Copy Semantics
// ============================================================================

#[test]
fn many_copies_borrowed_independently() {
    let mut library = Library::new();

    let copies: Vec<_> = (0..5)
        .map(|_| {
            library
                .register_book("ISBN-1", "Title A", "Author A")
                .unwrap()
        })
        .collect();

    let borrowers: Vec<_> = (0..5)
        .map(|i| {
            library
                .register_borrower(&format!("Reader {}", i), &format!("reader{}@x.com", i))
                .unwrap()
        })
        .collect();

    for (copy, borrower) in copies.iter().zip(&borrowers) {
        library.borrow(borrower.id, copy.id).unwrap();
    }

    // Every copy is held by exactly the borrower who took it
    for (copy, borrower) in copies.iter().zip(&borrowers) {
        let view = library.borrower_with_books(borrower.id).unwrap();
        assert_eq!(view.books.len(), 1);
        assert_eq!(view.books[0].id, copy.id);
    }
}

#[test]
fn duplicate_check_runs_against_every_copy() {
    let mut library = Library::new();
    library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();
    library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();

    // A mismatch against any copy rejects the registration
    assert_eq!(
        library.register_book("ISBN-1", "Title B", "Author A"),
        Err(Error::DuplicateIsbn("ISBN-1".into()))
    );
}

// ============================================================================
// Lending Churn
// ============================================================================

#[test]
fn long_borrow_return_chain() {
    let mut library = Library::new();
    let book = library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();
    let borrower = library.register_borrower("John", "john@x.com").unwrap();

    for _ in 0..100 {
        library.borrow(borrower.id, book.id).unwrap();
        library.return_book(borrower.id, book.id).unwrap();
    }

    let stored = library.store().book(book.id).unwrap();
    assert!(stored.is_available());
    // Each cycle is two saves on top of the initial version
    assert_eq!(stored.version, 201);
}

#[test]
fn book_changes_hands_between_borrowers() {
    let mut library = Library::new();
    let book = library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();
    let john = library.register_borrower("John", "john@x.com").unwrap();
    let jane = library.register_borrower("Jane", "jane@x.com").unwrap();

    library.borrow(john.id, book.id).unwrap();
    library.return_book(john.id, book.id).unwrap();
    library.borrow(jane.id, book.id).unwrap();

    assert!(library.store().book(book.id).unwrap().held_by(jane.id));
    assert!(library
        .borrower_with_books(john.id)
        .unwrap()
        .books
        .is_empty());
}

// ============================================================================
// Stale Writes
// ============================================================================

#[test]
fn stale_write_loses_and_state_survives() {
    let mut store = Store::new();
    let book = store.insert_book("ISBN-1".into(), "Title A".into(), "Author A".into());

    // Two requests read the same version of the book
    let mut first = book.clone();
    let mut second = book;

    first.holder = Some(1);
    store.save_book(first).unwrap();

    second.holder = Some(2);
    let result = store.save_book(second);
    assert!(matches!(result, Err(Error::VersionMismatch { .. })));

    // The winner's state is intact, the loser changed nothing
    let stored = store.book(1).unwrap();
    assert_eq!(stored.holder, Some(1));
    assert_eq!(stored.version, 2);
}

// ============================================================================
// Snapshot Edge Cases
// ============================================================================

#[test]
fn snapshot_roundtrip_with_held_books() {
    let mut library = Library::new();
    let book = library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();
    library
        .register_book("ISBN-2", "Title B", "Author B")
        .unwrap();
    let borrower = library.register_borrower("John", "john@x.com").unwrap();
    library.borrow(borrower.id, book.id).unwrap();

    let json = library.export_state().to_json().unwrap();

    let mut restored = Library::new();
    restored
        .import_state(LibrarySnapshot::from_json(&json).unwrap())
        .unwrap();

    // The loan survives the roundtrip and can be completed
    let receipt = restored.return_book(borrower.id, book.id).unwrap();
    assert!(receipt.book.is_available());
}

#[test]
fn empty_snapshot_roundtrip() {
    let json = Library::new().export_state().to_json().unwrap();
    let snapshot = LibrarySnapshot::from_json(&json).unwrap();

    let mut library = Library::new();
    library.import_state(snapshot).unwrap();

    let book = library
        .register_book("ISBN-1", "Title A", "Author A")
        .unwrap();
    assert_eq!(book.id, 1);
}

#[test]
fn garbage_json_rejected() {
    assert!(matches!(
        LibrarySnapshot::from_json("not json"),
        Err(Error::InvalidSnapshot(_))
    ));
    assert!(matches!(
        LibrarySnapshot::from_json("{}"),
        Err(Error::InvalidSnapshot(_))
    ));
}

#[test]
fn ids_stable_across_restore() {
    let mut library = Library::new();
    for i in 0..10 {
        library
            .register_book(&format!("ISBN-{}", i), "Title", "Author")
            .unwrap();
    }

    let snapshot = library.export_state();
    let mut restored = Library::new();
    restored.import_state(snapshot).unwrap();

    let next = restored.register_book("ISBN-10", "Title", "Author").unwrap();
    assert_eq!(next.id, 11);
}
