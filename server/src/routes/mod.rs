//! HTTP route definitions.

mod books;
mod borrowers;
mod health;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(books::routes())
        .merge(borrowers::routes())
}
