//! Book catalog routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::handlers::books::{
    handle_list_books, handle_register_book, BookRequest, BookResponse, BookWithBorrowerResponse,
};
use crate::AppState;

/// Create book routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/books", get(list_books).post(register_book))
}

/// POST /api/books - Register a new book.
async fn register_book(
    State(state): State<AppState>,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>)> {
    let response = handle_register_book(&state, request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/books - List all books with holder info.
async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookWithBorrowerResponse>>> {
    let response = handle_list_books(&state)?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, send, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn register_book_created() {
        let app = app(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-1", "title": "Title A", "author": "Author A"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"id": 1, "isbn": "ISBN-1", "title": "Title A", "author": "Author A"})
        );
    }

    #[tokio::test]
    async fn duplicate_isbn_mismatch_unprocessable() {
        let app = app(test_state());
        send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-1", "title": "Title A", "author": "Author A"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-1", "title": "Title B", "author": "Author A"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);
        assert!(body["message"].as_str().unwrap().contains("ISBN"));
    }

    #[tokio::test]
    async fn same_copy_registration_allowed() {
        let app = app(test_state());
        let payload = json!({"isbn": "ISBN-1", "title": "Title A", "author": "Author A"});

        send(&app, "POST", "/api/books", Some(payload.clone())).await;
        let (status, body) = send(&app, "POST", "/api/books", Some(payload)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 2);
    }

    #[tokio::test]
    async fn missing_fields_bad_request_with_field_map() {
        let app = app(test_state());

        let (status, body) = send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-1"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "must not be blank");
        assert_eq!(body["author"], "must not be blank");
        assert!(body.get("isbn").is_none());
    }

    #[tokio::test]
    async fn list_books_omits_borrower_when_unheld() {
        let app = app(test_state());

        send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-1", "title": "Title A", "author": "Author A"})),
        )
        .await;
        send(
            &app,
            "POST",
            "/api/borrowers",
            Some(json!({"name": "John", "email": "john@x.com"})),
        )
        .await;
        send(&app, "POST", "/api/borrowers/1/borrow/1", None).await;
        send(
            &app,
            "POST",
            "/api/books",
            Some(json!({"isbn": "ISBN-2", "title": "Title B", "author": "Author B"})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/api/books", None).await;

        assert_eq!(status, StatusCode::OK);
        let books = body.as_array().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(
            books[0]["borrower"],
            json!({"id": 1, "name": "John", "email": "john@x.com"})
        );
        assert!(books[1].get("borrower").is_none());
    }
}
