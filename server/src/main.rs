//! Circ Server - REST interface for library circulation records.
//!
//! The server exposes book and borrower registration, borrow/return, and
//! read-only listings over HTTP, backed by the circ-engine lending logic.
//! State lives in-process and is persisted as engine snapshots when a data
//! path is configured.

mod config;
mod error;
mod handlers;
mod persist;
mod routes;

use crate::config::Config;
use axum::Router;
use circ_engine::Library;
use std::sync::{Arc, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state around a library instance.
    pub fn new(library: Library, config: Config) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circ_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Circ Server on {}:{}", config.host, config.port);

    // Restore persisted state, if any
    let library = persist::load_or_default(config.data_path.as_deref())?;
    tracing::info!(
        books = library.store().book_count(),
        borrowers = library.store().borrower_count(),
        "library state loaded"
    );

    let state = AppState::new(library, config.clone());

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
