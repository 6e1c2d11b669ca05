//! Shared secret access control.
use crate::{arguments::AppConfig, types::handler::HandlerError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use std::sync::Arc;
use tracing::debug;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

fn api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// Reject requests without the configured key before they reach a handler.
pub async fn require_api_key(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, HandlerError> {
    match api_key(request.headers()).map(|key| config.accepts_key(key)) {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            debug!("invalid api key for {}", request.uri().path());
            Err(HandlerError::Forbidden)
        }
        None => {
            debug!("missing api key for {}", request.uri().path());
            Err(HandlerError::Forbidden)
        }
    }
}
