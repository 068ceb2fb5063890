use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthResponse};

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            false
        }
    };

    Json(ApiResponse::success(HealthResponse {
        status: (if database { "ok" } else { "degraded" }).to_string(),
        database,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
