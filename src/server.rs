//! HTTP server initialization and runtime setup.
//!
//! Builds and seeds the store, wires the router and runs the Axum server until
//! Ctrl+C.

use crate::config::Config;
use crate::infrastructure::persistence::InMemoryBookmarkRepository;
use crate::infrastructure::seed::generate_bookmarks;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;

/// Creates the store, seeded with `seed_count` synthetic bookmarks.
pub fn build_repository(seed_count: usize) -> InMemoryBookmarkRepository {
    if seed_count == 0 {
        tracing::info!("Starting with an empty store");
        return InMemoryBookmarkRepository::new();
    }

    let bookmarks = generate_bookmarks(seed_count, Utc::now(), &mut rand::rng());
    tracing::info!(count = seed_count, "Seeded store with synthetic bookmarks");
    InMemoryBookmarkRepository::with_bookmarks(bookmarks)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address does not parse
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = Arc::new(build_repository(config.seed_count));
    let state = AppState::new(repository);

    let app = app_router(state, &config.api_prefix, &config.allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}{}", config.api_prefix);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
