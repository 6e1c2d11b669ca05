//! Route handlers.
use axum::Json;
use serde_json::{json, Value};

pub mod measurement_handlers;

/// Unauthenticated liveness route.
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}
