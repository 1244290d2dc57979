//! mathdrill-server: HTTP API for practice sessions.
//!
//! Routes:
//! - `GET /` static practice page
//! - `POST /api/sessions` create a session
//! - `POST /api/sessions/{id}/submit` score answers
//! - `POST /api/analysis` weakness summary

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use mathdrill_core::QuizService;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: QuizService,
}

/// Build the application router.
pub fn router(service: QuizService) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/{id}/submit", post(handlers::submit_session))
        .route("/api/analysis", post(handlers::analyze_session))
        .with_state(AppState { service })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, service: QuizService) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve_on(listener, service).await
}

/// Serve on an already-bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, service: QuizService) -> Result<()> {
    let local = listener.local_addr().context("listener has no local address")?;
    tracing::info!(
        addr = %local,
        source = service.source_name(),
        "mathdrill server listening"
    );
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
