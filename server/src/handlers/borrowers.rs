//! Borrower handlers - registration, borrow/return, and listings.

use crate::error::{AppError, FieldError, Result};
use crate::handlers::books::{book_response, BookResponse};
use crate::AppState;
use circ_engine::{Borrower, BorrowerWithBooks, LoanReceipt};
use serde::{Deserialize, Serialize};

/// Request body for registering a borrower.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Borrower response.
///
/// `message` and `bookResponse` appear only on borrow/return outcomes;
/// plain registration omits both.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_response: Option<BookResponse>,
}

/// A borrower with the derived list of currently held books.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerWithBooksResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub books: Vec<BookResponse>,
}

/// Map a borrower record to its registration response (no loan fields).
pub fn borrower_response(borrower: &Borrower) -> BorrowerResponse {
    BorrowerResponse {
        id: borrower.id,
        name: borrower.name.clone(),
        email: borrower.email.clone(),
        message: None,
        book_response: None,
    }
}

/// Map a loan receipt to the borrow/return response shape.
pub fn receipt_response(receipt: &LoanReceipt) -> BorrowerResponse {
    BorrowerResponse {
        id: receipt.borrower.id,
        name: receipt.borrower.name.clone(),
        email: receipt.borrower.email.clone(),
        message: Some(receipt.message.to_string()),
        book_response: Some(book_response(&receipt.book)),
    }
}

/// Map a borrower-with-books view to its response shape.
pub fn borrower_with_books_response(view: &BorrowerWithBooks) -> BorrowerWithBooksResponse {
    BorrowerWithBooksResponse {
        id: view.borrower.id,
        name: view.borrower.name.clone(),
        email: view.borrower.email.clone(),
        books: view.books.iter().map(book_response).collect(),
    }
}

/// Lenient syntactic email check: one `@` with non-empty sides, no
/// whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// Validate request shape before it reaches the engine.
fn validate(req: &BorrowerRequest) -> Result<()> {
    let mut errors = Vec::new();
    if req.name.trim().is_empty() {
        errors.push(FieldError::blank("name"));
    }
    if req.email.trim().is_empty() {
        errors.push(FieldError::blank("email"));
    } else if !is_valid_email(&req.email) {
        errors.push(FieldError::new(
            "email",
            "must be a well-formed email address",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Register a new borrower.
pub fn handle_register_borrower(
    state: &AppState,
    request: BorrowerRequest,
) -> Result<BorrowerResponse> {
    validate(&request)?;

    let mut library = super::write_library(state)?;
    let borrower = library.register_borrower(&request.name, &request.email)?;
    super::persist_if_configured(state, &library);

    tracing::info!(id = borrower.id, "borrower registered");
    Ok(borrower_response(&borrower))
}

/// Get a borrower with held books.
pub fn handle_get_borrower(state: &AppState, id: u64) -> Result<BorrowerWithBooksResponse> {
    let library = super::read_library(state)?;
    let view = library.borrower_with_books(id)?;
    Ok(borrower_with_books_response(&view))
}

/// List all borrowers with their held books.
pub fn handle_list_borrowers(state: &AppState) -> Result<Vec<BorrowerWithBooksResponse>> {
    let library = super::read_library(state)?;
    Ok(library
        .list_borrowers()
        .iter()
        .map(borrower_with_books_response)
        .collect())
}

/// Borrow a book.
pub fn handle_borrow(state: &AppState, borrower_id: u64, book_id: u64) -> Result<BorrowerResponse> {
    let mut library = super::write_library(state)?;
    let receipt = library.borrow(borrower_id, book_id)?;
    super::persist_if_configured(state, &library);

    tracing::info!(borrower = borrower_id, book = book_id, "book borrowed");
    Ok(receipt_response(&receipt))
}

/// Return a borrowed book.
pub fn handle_return(state: &AppState, borrower_id: u64, book_id: u64) -> Result<BorrowerResponse> {
    let mut library = super::write_library(state)?;
    let receipt = library.return_book(borrower_id, book_id)?;
    super::persist_if_configured(state, &library);

    tracing::info!(borrower = borrower_id, book = book_id, "book returned");
    Ok(receipt_response(&receipt))
}
