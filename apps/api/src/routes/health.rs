use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether analyses are live or mocked.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let engine = state.analyzer.engine();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api",
        "mode": engine.mode(),
        "providers": engine.providers(),
    }))
}
