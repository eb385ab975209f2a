//! Book handlers - registration and catalog listing.

use crate::error::{AppError, FieldError, Result};
use crate::AppState;
use circ_engine::{Book, BookWithHolder, Borrower};
use serde::{Deserialize, Serialize};

/// Request body for registering a book.
///
/// Fields default to empty so a missing field fails shape validation with a
/// per-field message instead of a bare deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

/// A book projection without holder information.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: u64,
    pub isbn: String,
    pub title: String,
    pub author: String,
}

/// A catalog entry: a book plus, when held, a minimal holder projection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithBorrowerResponse {
    pub id: u64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Omitted entirely when the book is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<HolderResponse>,
}

/// Minimal identity projection of a holder.
///
/// Never includes the holder's own held-book list; the recursion stops here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Map a book record to its plain projection.
pub fn book_response(book: &Book) -> BookResponse {
    BookResponse {
        id: book.id,
        isbn: book.isbn.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
    }
}

fn holder_response(borrower: &Borrower) -> HolderResponse {
    HolderResponse {
        id: borrower.id,
        name: borrower.name.clone(),
        email: borrower.email.clone(),
    }
}

/// Map a catalog entry to the list-books response shape.
pub fn book_with_borrower_response(entry: &BookWithHolder) -> BookWithBorrowerResponse {
    BookWithBorrowerResponse {
        id: entry.book.id,
        isbn: entry.book.isbn.clone(),
        title: entry.book.title.clone(),
        author: entry.book.author.clone(),
        borrower: entry.holder.as_ref().map(holder_response),
    }
}

/// Validate request shape before it reaches the engine.
fn validate(req: &BookRequest) -> Result<()> {
    let mut errors = Vec::new();
    if req.isbn.trim().is_empty() {
        errors.push(FieldError::blank("isbn"));
    }
    if req.title.trim().is_empty() {
        errors.push(FieldError::blank("title"));
    }
    if req.author.trim().is_empty() {
        errors.push(FieldError::blank("author"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Register a new book.
pub fn handle_register_book(state: &AppState, request: BookRequest) -> Result<BookResponse> {
    validate(&request)?;

    let mut library = super::write_library(state)?;
    let book = library.register_book(&request.isbn, &request.title, &request.author)?;
    super::persist_if_configured(state, &library);

    tracing::info!(id = book.id, isbn = %book.isbn, "book registered");
    Ok(book_response(&book))
}

/// List every book with its holder, if any.
pub fn handle_list_books(state: &AppState) -> Result<Vec<BookWithBorrowerResponse>> {
    let library = super::read_library(state)?;
    let listing = library.list_books();

    tracing::debug!(count = listing.len(), "catalog listed");
    Ok(listing.iter().map(book_with_borrower_response).collect())
}
