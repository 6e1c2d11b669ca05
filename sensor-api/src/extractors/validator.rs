use crate::{types::handler::HandlerError, SENSOR_API_TARGET};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use thiserror::Error;
use tracing::warn;
use validator::{Validate, ValidationErrors};

/// A Json extractor that rejects with the common `{message, status}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

/// An extractor that adds value validators to a Json validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatingJson<T: Validate>(pub T);

#[derive(Debug, Error)]
pub enum JsonValidationError {
    #[error("{}", .0.body_text())]
    JsonError(#[from] JsonRejection),
    #[error("{}", first_message(.0))]
    JsonValidation(#[from] ValidationErrors),
}

/// Message of the first failed validation, or the whole report when no
/// validator attached a message.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data): Json<T> = Json::from_request(req, state).await?;
        Ok(Self(data))
    }
}

/// Uses a Json extractor and adds validation
/// to the extracted type via the Validate trait.
impl<S, T> FromRequest<S> for ValidatingJson<T>
where
    T: Validate + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(data): JsonBody<T> = JsonBody::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

impl From<JsonValidationError> for HandlerError {
    fn from(error: JsonValidationError) -> Self {
        HandlerError::BadRequest(error.to_string())
    }
}

impl IntoResponse for JsonValidationError {
    fn into_response(self) -> Response {
        warn!(target: SENSOR_API_TARGET, "Input failed validation: {self}");
        HandlerError::from(self).into_response()
    }
}

impl<T: Validate> Deref for ValidatingJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Validate> From<T> for ValidatingJson<T> {
    fn from(inner: T) -> Self {
        Self(inner)
    }
}
