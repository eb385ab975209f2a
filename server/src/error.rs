//! Unified error handling for the server.
//!
//! The engine raises typed domain errors; this module is the single place
//! that translates each kind into a transport status and a stable message.
//! Semantic rejections of well-formed requests map to 422; conflicts with
//! the current holder or a concurrent write map to 409.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use circ_engine::Error as EngineError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A per-field validation failure.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn blank(field: &'static str) -> Self {
        Self::new(field, "must not be blank")
    }
}

/// Error response body for domain and internal failures.
#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Engine(e) => {
                let status = engine_status(&e);
                if status.is_server_error() {
                    tracing::error!("Engine error: {:?}", e);
                } else {
                    tracing::warn!("domain operation rejected: {}", e);
                }

                let body = Json(ErrorResponse {
                    status: status.as_u16(),
                    message: e.to_string(),
                });
                (status, body).into_response()
            }
            AppError::Validation(errors) => {
                // Per-field map, one message per offending field
                let fields: BTreeMap<&str, &str> =
                    errors.iter().map(|e| (e.field, e.message)).collect();
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = Json(ErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    message: "Unexpected server error".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Transport status for each engine error.
fn engine_status(e: &EngineError) -> StatusCode {
    match e {
        EngineError::BorrowerNotFound(_) | EngineError::BookNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::DuplicateIsbn(_)
        | EngineError::EmailTaken(_)
        | EngineError::AlreadyBorrowed(_)
        | EngineError::NotBorrowed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::WrongHolder { .. } | EngineError::VersionMismatch { .. } => {
            StatusCode::CONFLICT
        }
        EngineError::EmptyField(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidSnapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
