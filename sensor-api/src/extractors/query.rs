//! Query string extraction that keeps repeated parameters.
use crate::types::{handler::HandlerError, request::QueryParams};
use axum::extract::{FromRequestParts, Query};
use http::request::Parts;

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<QueryParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .map_err(|e| HandlerError::BadRequest(e.body_text()))
    }
}
