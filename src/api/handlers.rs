//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::gateway::orchestrator::TryOnRequest;
use crate::response::TryOnResult;
use crate::AppState;

/// `POST /virtual-tryon`
pub async fn virtual_tryon(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TryOnRequest>, JsonRejection>,
) -> Result<Json<TryOnResult>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("virtual_tryon", %request_id);

    async move {
        let request = match payload {
            Ok(Json(request)) => request,
            Err(e) => {
                warn!(error = %e, "Rejected request body");
                return Err(AppError::InvalidRequest(e.body_text()));
            }
        };

        match state.orchestrator.run(request).await {
            Ok(output) => {
                info!(attempts = output.attempts.len(), "Virtual try-on completed");
                Ok(Json(TryOnResult::from(output)))
            }
            Err(e) => {
                let (status, code) = e.classify();
                if status.is_server_error() {
                    error!(status = status.as_u16(), code, error = %e, details = ?e.details(), "Virtual try-on failed");
                } else {
                    warn!(status = status.as_u16(), code, error = %e, "Virtual try-on rejected");
                }
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
