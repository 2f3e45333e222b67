//! HTTP intent-classification service.
//!
//! `POST /command` takes `{"command": "..."}` and answers with
//! `{"action", "message", "details"}`, the contract [`IntentDispatcher`]
//! consumes. `GET /health` reports liveness.
//!
//! [`IntentDispatcher`]: crate::intent::IntentDispatcher

mod error;

pub use error::ServerError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::intent::{CommandRequest, IntentResponse, RuleClassifier};
use crate::shutdown::ShutdownHandle;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[derive(Clone)]
struct AppState {
    classifier: Arc<RuleClassifier>,
}

pub fn build_router(classifier: RuleClassifier) -> Router {
    Router::new()
        .route("/command", post(classify))
        .route("/health", get(health))
        .with_state(AppState {
            classifier: Arc::new(classifier),
        })
}

async fn classify(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<IntentResponse>, ServerError> {
    let command = request.command.trim();
    if command.is_empty() {
        return Err(ServerError::InvalidRequest("command is empty".to_string()));
    }

    let response = state.classifier.classify(command);
    tracing::info!(command = %command, action = %response.action, "Classified command");
    Ok(Json(response))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
    })
}

/// Serves until `shutdown` is signaled.
pub async fn serve(addr: SocketAddr, shutdown: ShutdownHandle) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, shutdown).await
}

/// Serves on an already bound listener.
pub async fn serve_on(listener: TcpListener, shutdown: ShutdownHandle) -> std::io::Result<()> {
    tracing::info!(addr = ?listener.local_addr().ok(), "Intent service listening");

    axum::serve(listener, build_router(RuleClassifier::new()))
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    tracing::info!("Intent service stopped");
    Ok(())
}
