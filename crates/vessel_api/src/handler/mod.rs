//! Route handlers. Each handler decodes the request, runs one core use-case
//! on the shared connection and encodes the result.

pub mod owners;
pub mod ships;

use axum::response::Json;
use serde_json::json;

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": vessel_core::core_version(),
    }))
}
