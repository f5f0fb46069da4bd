//! HTTP service exposing the pipeline
//!
//! Routes:
//! - `GET /health`
//! - `POST /api/generate` (buffered JSON)
//! - `POST /api/generate/stream` (Server-Sent Events)

mod handlers;

use crate::pipeline::Pipeline;
use crate::ForgeError;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

/// Builds the application router
pub fn build_router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate/stream", post(handlers::generate_stream))
        .with_state(AppState { pipeline })
}

/// Serves on an already bound listener until Ctrl-C
pub async fn serve(listener: TcpListener, pipeline: Pipeline) -> Result<(), ForgeError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }
    if !pipeline.has_credential() {
        tracing::warn!(
            "No API key in ${}; generation requests will be rejected",
            pipeline.config().analyzer.api_key_env
        );
    }

    axum::serve(listener, build_router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
