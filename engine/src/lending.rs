//! Lending engine - registration, borrow, and return.
//!
//! [`Library`] wraps a [`Store`] and enforces the circulation invariants:
//! a book has at most one holder, an ISBN is shared only between identical
//! copies, and only the current holder can return a book.

use crate::{
    error::Result, snapshot::LibrarySnapshot, Book, BookId, Borrower, BorrowerId, Error, Store,
};

/// Message returned on a successful borrow.
pub const BORROWED_MESSAGE: &str = "Book Borrowed Successfully";

/// Message returned on a successful return.
pub const RETURNED_MESSAGE: &str = "Book Returned Successfully";

/// Outcome of a successful borrow or return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReceipt {
    /// The requesting borrower
    pub borrower: Borrower,
    /// The affected book only, never the borrower's full held list
    pub book: Book,
    /// Human-readable confirmation
    pub message: &'static str,
}

/// A book together with a minimal projection of its holder.
///
/// The holder carries identity, name, and email only; it never includes the
/// holder's own held-book list, so the projection cannot recurse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWithHolder {
    pub book: Book,
    pub holder: Option<Borrower>,
}

/// A borrower together with the derived list of currently held books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowerWithBooks {
    pub borrower: Borrower,
    pub books: Vec<Book>,
}

/// The lending engine.
#[derive(Debug, Clone, Default)]
pub struct Library {
    store: Store,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Register a new book.
    ///
    /// Two records may share an ISBN only when title and author also match;
    /// each such record models a separate physical copy. A matching ISBN
    /// with different metadata is rejected with [`Error::DuplicateIsbn`],
    /// and no existing record is ever updated by registration.
    pub fn register_book(&mut self, isbn: &str, title: &str, author: &str) -> Result<Book> {
        require_non_empty(isbn, "isbn")?;
        require_non_empty(title, "title")?;
        require_non_empty(author, "author")?;

        let mismatch = self
            .store
            .books_by_isbn(isbn)
            .iter()
            .any(|existing| existing.title != title || existing.author != author);
        if mismatch {
            return Err(Error::DuplicateIsbn(isbn.to_string()));
        }

        Ok(self
            .store
            .insert_book(isbn.to_string(), title.to_string(), author.to_string()))
    }

    /// Register a new borrower. Email must be unique across the system.
    pub fn register_borrower(&mut self, name: &str, email: &str) -> Result<Borrower> {
        require_non_empty(name, "name")?;
        require_non_empty(email, "email")?;

        self.store
            .insert_borrower(name.to_string(), email.to_string())
    }

    /// Borrow a book for a borrower.
    ///
    /// Preconditions, checked in order: the borrower exists, the book
    /// exists, the book is available. The write goes through the store's
    /// version check; a concurrent modification between read and write
    /// surfaces as [`Error::VersionMismatch`] rather than overwriting.
    pub fn borrow(&mut self, borrower_id: BorrowerId, book_id: BookId) -> Result<LoanReceipt> {
        let borrower = self
            .store
            .borrower(borrower_id)
            .ok_or(Error::BorrowerNotFound(borrower_id))?
            .clone();

        let mut book = self
            .store
            .book(book_id)
            .ok_or(Error::BookNotFound(book_id))?
            .clone();

        if book.holder.is_some() {
            return Err(Error::AlreadyBorrowed(book_id));
        }

        book.holder = Some(borrower_id);
        let book = self.store.save_book(book)?;

        Ok(LoanReceipt {
            borrower,
            book,
            message: BORROWED_MESSAGE,
        })
    }

    /// Return a book.
    ///
    /// Preconditions, checked in order: the borrower exists, the book
    /// exists, the book is held at all ([`Error::NotBorrowed`] otherwise),
    /// and the holder is the requesting borrower ([`Error::WrongHolder`]
    /// otherwise). Rejections leave the book's state unchanged.
    pub fn return_book(&mut self, borrower_id: BorrowerId, book_id: BookId) -> Result<LoanReceipt> {
        let borrower = self
            .store
            .borrower(borrower_id)
            .ok_or(Error::BorrowerNotFound(borrower_id))?
            .clone();

        let mut book = self
            .store
            .book(book_id)
            .ok_or(Error::BookNotFound(book_id))?
            .clone();

        let holder = book.holder.ok_or(Error::NotBorrowed(book_id))?;
        if holder != borrower_id {
            return Err(Error::WrongHolder {
                book: book_id,
                holder,
            });
        }

        book.holder = None;
        let book = self.store.save_book(book)?;

        Ok(LoanReceipt {
            borrower,
            book,
            message: RETURNED_MESSAGE,
        })
    }

    /// All books, each with its holder's minimal projection.
    pub fn list_books(&self) -> Vec<BookWithHolder> {
        self.store
            .books()
            .map(|book| BookWithHolder {
                book: book.clone(),
                holder: book.holder.and_then(|id| self.store.borrower(id)).cloned(),
            })
            .collect()
    }

    /// A borrower with the derived list of currently held books.
    pub fn borrower_with_books(&self, id: BorrowerId) -> Result<BorrowerWithBooks> {
        let borrower = self
            .store
            .borrower(id)
            .ok_or(Error::BorrowerNotFound(id))?
            .clone();
        let books = self.store.books_held_by(id).into_iter().cloned().collect();

        Ok(BorrowerWithBooks { borrower, books })
    }

    /// All borrowers with their held books.
    pub fn list_borrowers(&self) -> Vec<BorrowerWithBooks> {
        self.store
            .borrowers()
            .map(|borrower| BorrowerWithBooks {
                borrower: borrower.clone(),
                books: self
                    .store
                    .books_held_by(borrower.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Export the current state as a snapshot.
    pub fn export_state(&self) -> LibrarySnapshot {
        LibrarySnapshot::from_store(&self.store)
    }

    /// Replace the current state with a snapshot's state.
    ///
    /// The snapshot is validated first; on failure the library is unchanged.
    pub fn import_state(&mut self, snapshot: LibrarySnapshot) -> Result<()> {
        self.store = snapshot.into_store()?;
        Ok(())
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::EmptyField(field))
    } else {
        Ok(())
    }
}
