//! Error types for the Circ engine.

use crate::{BookId, BorrowerId, Version};
use thiserror::Error;

/// All possible errors from the Circ engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("borrower not found: {0}")]
    BorrowerNotFound(BorrowerId),

    #[error("book not found: {0}")]
    BookNotFound(BookId),

    // Registration errors
    #[error("ISBN already registered with a different title or author: {0}")]
    DuplicateIsbn(String),

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("missing required field: {0}")]
    EmptyField(&'static str),

    // Lending errors
    #[error("book already borrowed: {0}")]
    AlreadyBorrowed(BookId),

    #[error("book has not been borrowed yet: {0}")]
    NotBorrowed(BookId),

    #[error("book {book} is held by borrower {holder}")]
    WrongHolder { book: BookId, holder: BorrowerId },

    // Write errors
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: Version, actual: Version },

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
