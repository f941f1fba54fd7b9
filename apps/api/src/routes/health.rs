use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and active backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobpitch-api",
        "provider": state.provider.name(),
        "model": state.provider.model(),
        "rateLimitStore": state.rate_limiter.backend(),
    }))
}
