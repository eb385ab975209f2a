//! Store - the keyed state container.
//!
//! The Store owns all book and borrower records, assigns identities, and
//! guards book writes with an optimistic version check. It is the single
//! authority for durability concerns; the lending engine never mutates
//! records behind its back.

use crate::{error::Result, Book, BookId, Borrower, BorrowerId, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keyed storage for book and borrower records.
///
/// BTreeMaps keep listings id-ordered and serialization deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    books: BTreeMap<BookId, Book>,
    borrowers: BTreeMap<BorrowerId, Borrower>,
    next_book_id: BookId,
    next_borrower_id: BorrowerId,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create an empty store. Identities start at 1.
    pub fn new() -> Self {
        Self {
            books: BTreeMap::new(),
            borrowers: BTreeMap::new(),
            next_book_id: 1,
            next_borrower_id: 1,
        }
    }

    pub(crate) fn from_parts(
        books: BTreeMap<BookId, Book>,
        borrowers: BTreeMap<BorrowerId, Borrower>,
        next_book_id: BookId,
        next_borrower_id: BorrowerId,
    ) -> Self {
        Self {
            books,
            borrowers,
            next_book_id,
            next_borrower_id,
        }
    }

    pub(crate) fn next_book_id(&self) -> BookId {
        self.next_book_id
    }

    pub(crate) fn next_borrower_id(&self) -> BorrowerId {
        self.next_borrower_id
    }

    /// Insert a new book, assigning the next identity.
    pub fn insert_book(&mut self, isbn: String, title: String, author: String) -> Book {
        let id = self.next_book_id;
        self.next_book_id += 1;

        let book = Book::new(id, isbn, title, author);
        self.books.insert(id, book.clone());
        book
    }

    /// Insert a new borrower, assigning the next identity.
    ///
    /// Email uniqueness is enforced here; a reused address is rejected with
    /// [`Error::EmailTaken`].
    pub fn insert_borrower(&mut self, name: String, email: String) -> Result<Borrower> {
        if self.borrowers.values().any(|b| b.email == email) {
            return Err(Error::EmailTaken(email));
        }

        let id = self.next_borrower_id;
        self.next_borrower_id += 1;

        let borrower = Borrower::new(id, name, email);
        self.borrowers.insert(id, borrower.clone());
        Ok(borrower)
    }

    /// Get a book by ID.
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    /// Get a borrower by ID.
    pub fn borrower(&self, id: BorrowerId) -> Option<&Borrower> {
        self.borrowers.get(&id)
    }

    /// Get all books sharing an ISBN.
    pub fn books_by_isbn(&self, isbn: &str) -> Vec<&Book> {
        self.books.values().filter(|b| b.isbn == isbn).collect()
    }

    /// All books, id-ordered.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All borrowers, id-ordered.
    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }

    /// Books currently held by a borrower, derived from `Book::holder`.
    pub fn books_held_by(&self, borrower: BorrowerId) -> Vec<&Book> {
        self.books.values().filter(|b| b.held_by(borrower)).collect()
    }

    /// Save a modified book through the optimistic version check.
    ///
    /// The caller's copy must carry the version it was read at. A stale
    /// version means another write landed in between; the save is rejected
    /// with [`Error::VersionMismatch`] and stored state is unchanged.
    /// On success the version is bumped and the saved book returned.
    pub fn save_book(&mut self, mut book: Book) -> Result<Book> {
        let stored = self
            .books
            .get_mut(&book.id)
            .ok_or(Error::BookNotFound(book.id))?;

        if stored.version != book.version {
            return Err(Error::VersionMismatch {
                expected: book.version,
                actual: stored.version,
            });
        }

        book.version += 1;
        *stored = book.clone();
        Ok(book)
    }

    /// Count of book records.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Count of borrower records.
    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }
}
