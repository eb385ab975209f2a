//! Record types for books and borrowers.

use crate::{BookId, BorrowerId, Version};
use serde::{Deserialize, Serialize};

/// A book record.
///
/// `holder` is an explicit reference to the borrower currently in possession
/// of the book, or `None` when the book is available. The borrower side keeps
/// no back-collection; "books held by X" is always a derived query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned by the store on registration
    pub id: BookId,
    /// ISBN; two records may share one only when title and author also match
    pub isbn: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Borrower currently holding this book, if any
    pub holder: Option<BorrowerId>,
    /// Version stamp, incremented by the store on each successful save
    pub version: Version,
}

impl Book {
    /// Create a new available book at version 1.
    pub fn new(
        id: BookId,
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id,
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            holder: None,
            version: 1,
        }
    }

    /// Check if the book is available for borrowing.
    pub fn is_available(&self) -> bool {
        self.holder.is_none()
    }

    /// Check if the book is currently held by the given borrower.
    pub fn held_by(&self, borrower: BorrowerId) -> bool {
        self.holder == Some(borrower)
    }
}

/// A borrower record. Immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    /// Unique identifier, assigned by the store on registration
    pub id: BorrowerId,
    /// Display name
    pub name: String,
    /// Email address, unique across all borrowers
    pub email: String,
}

impl Borrower {
    /// Create a new borrower.
    pub fn new(id: BorrowerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
