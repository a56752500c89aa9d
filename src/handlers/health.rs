use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;
use crate::state::AppState;

// liveness plus a little insight into what the process holds
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "services": state.catalog.services().len(),
        "tracked_clients": state.rate_limiter.tracked_clients(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
