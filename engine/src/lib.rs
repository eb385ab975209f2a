//! # Circ Engine
//!
//! The lending core of Circ, a library circulation record service.
//!
//! This crate holds the domain logic for registering books and borrowers and
//! moving a book between "available" and "held by a borrower". The rules it
//! enforces are small but strict: no double-borrowing, no borrowing unknown
//! records, and no returning a book the caller does not hold.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of files, network, or transport
//! - **Typed failures**: every rejected precondition is a distinct [`Error`]
//! - **Derived state**: a borrower's held books are always computed from
//!   `Book::holder`, never stored redundantly
//! - **Optimistic writes**: [`Store::save_book`] compares a version stamp and
//!   rejects stale writes instead of silently overwriting
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! [`Book`] carries an identity, ISBN, title, author, an optional `holder`
//! reference to the borrower currently in possession, and a version stamp.
//! [`Borrower`] carries an identity, name, and unique email, and is immutable
//! after registration.
//!
//! ### The book state machine
//!
//! `Available --borrow--> Held(by X)` and `Held(by X) --return(by X)-->
//! Available`. Every other transition is rejected with a typed error and
//! leaves state unchanged. There is no terminal state.
//!
//! ## Quick Start
//!
//! ```rust
//! use circ_engine::Library;
//!
//! let mut library = Library::new();
//!
//! let book = library
//!     .register_book("978-0134685991", "Effective Java", "Joshua Bloch")
//!     .unwrap();
//! let borrower = library
//!     .register_borrower("Alice", "alice@example.com")
//!     .unwrap();
//!
//! let receipt = library.borrow(borrower.id, book.id).unwrap();
//! assert_eq!(receipt.message, "Book Borrowed Successfully");
//!
//! let receipt = library.return_book(borrower.id, book.id).unwrap();
//! assert!(receipt.book.is_available());
//! ```
//!
//! ## Persistence
//!
//! Use [`Library::export_state`] and [`Library::import_state`] with
//! [`LibrarySnapshot`]. Snapshots serialize to JSON with deterministic
//! ordering and are validated on import.

pub mod error;
pub mod lending;
pub mod model;
pub mod snapshot;
pub mod store;

// Re-export main types at crate root
pub use error::Error;
pub use lending::{
    BookWithHolder, BorrowerWithBooks, Library, LoanReceipt, BORROWED_MESSAGE, RETURNED_MESSAGE,
};
pub use model::{Book, Borrower};
pub use snapshot::{LibrarySnapshot, SNAPSHOT_FORMAT_VERSION};
pub use store::Store;

/// Type aliases for clarity
pub type BookId = u64;
pub type BorrowerId = u64;
pub type Version = u64;
