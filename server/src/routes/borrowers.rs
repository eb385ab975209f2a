//! Borrower and lending routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::handlers::borrowers::{
    handle_borrow, handle_get_borrower, handle_list_borrowers, handle_register_borrower,
    handle_return, BorrowerRequest, BorrowerResponse, BorrowerWithBooksResponse,
};
use crate::AppState;

/// Create borrower routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/borrowers",
            get(list_borrowers).post(register_borrower),
        )
        .route("/api/borrowers/{id}", get(get_borrower))
        .route(
            "/api/borrowers/{borrower_id}/borrow/{book_id}",
            post(borrow_book),
        )
        .route(
            "/api/borrowers/{borrower_id}/return/{book_id}",
            post(return_book),
        )
}

/// POST /api/borrowers - Register a new borrower.
async fn register_borrower(
    State(state): State<AppState>,
    Json(request): Json<BorrowerRequest>,
) -> Result<(StatusCode, Json<BorrowerResponse>)> {
    let response = handle_register_borrower(&state, request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/borrowers/{id} - Get a borrower with held books.
async fn get_borrower(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<BorrowerWithBooksResponse>> {
    let response = handle_get_borrower(&state, id)?;
    Ok(Json(response))
}

/// GET /api/borrowers - List all borrowers with held books.
async fn list_borrowers(
    State(state): State<AppState>,
) -> Result<Json<Vec<BorrowerWithBooksResponse>>> {
    let response = handle_list_borrowers(&state)?;
    Ok(Json(response))
}

/// POST /api/borrowers/{borrower_id}/borrow/{book_id} - Borrow a book.
async fn borrow_book(
    State(state): State<AppState>,
    Path((borrower_id, book_id)): Path<(u64, u64)>,
) -> Result<Json<BorrowerResponse>> {
    let response = handle_borrow(&state, borrower_id, book_id)?;
    Ok(Json(response))
}

/// POST /api/borrowers/{borrower_id}/return/{book_id} - Return a book.
async fn return_book(
    State(state): State<AppState>,
    Path((borrower_id, book_id)): Path<(u64, u64)>,
) -> Result<Json<BorrowerResponse>> {
    let response = handle_return(&state, borrower_id, book_id)?;
    Ok(Json(response))
}
