//! Types for handler functions.
use crate::SENSOR_API_TARGET;
use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use sensor_database::{database::DatabaseError, validation::InvalidInput};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{event, Level};

/// Common error type for handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Forbidden: Invalid API key")]
    Forbidden,
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl HandlerError {
    /// Wrap a datastore failure with the message shown to the client.
    pub fn internal(message: &'static str) -> impl FnOnce(DatabaseError) -> Self {
        move |source| Self::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidInput> for HandlerError {
    fn from(invalid: InvalidInput) -> Self {
        if invalid.is_not_found() {
            Self::NotFound(invalid.to_string())
        } else {
            Self::BadRequest(invalid.to_string())
        }
    }
}

/// Body shared by every response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub status: u16,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 response carrying `payload`.
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::OK.as_u16(),
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Payload for responses that only carry a message.
#[derive(Debug, Serialize)]
pub struct NoPayload {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal { message, source } => event!(
                target: SENSOR_API_TARGET,
                Level::ERROR,
                "{message}: {source}"
            ),
            _ => event!(
                target: SENSOR_API_TARGET,
                Level::WARN,
                "Request rejected: {self}"
            ),
        }

        ApiResponse {
            message: self.to_string(),
            status: self.status().as_u16(),
            payload: NoPayload {},
        }
        .into_response()
    }
}

/// Type alias for generic database.
pub type Database<T> = Extension<Arc<T>>;

/// Type alias for handler results.
pub type HandlerResult<T> = Result<T, HandlerError>;
