use crate::{types::request::QueryParams, SENSOR_API_TARGET};
use axum::extract::Query;
use http::{Request, Response, Uri};
use std::{fmt::Display, time::Duration};
use tower_http::{
    request_id::RequestId,
    trace::{MakeSpan, OnFailure, OnRequest, OnResponse},
};
use tracing::{field, Span};

/// Request logging for the trace layer.
#[derive(Clone, Debug)]
pub struct RequestLogger;

/// Query parameters worth a span field, repeated values are joined.
#[derive(Debug, Default, PartialEq)]
struct MeasurementQuery {
    location: String,
    date_range: String,
}

impl MeasurementQuery {
    fn from_uri(uri: &Uri) -> Self {
        let Ok(Query(params)) = Query::<QueryParams>::try_from_uri(uri) else {
            return Self::default();
        };
        let start = params.values("startDate").join(",");
        let end = params.values("endDate").join(",");
        Self {
            location: params.values("location").join(","),
            date_range: if start.is_empty() && end.is_empty() {
                String::new()
            } else {
                format!("{start}..{end}")
            },
        }
    }
}

/// Each request span will have a requestId, uri, method and the queried
/// location and date range. Body based routes leave the last two empty.
impl<B> MakeSpan<B> for RequestLogger {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let req_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|r| r.header_value().to_str().ok())
            .unwrap_or_default();
        let query = MeasurementQuery::from_uri(request.uri());

        tracing::info_span!(
            target: SENSOR_API_TARGET,
            "request",
            "requestId" = req_id,
            "uri" = request.uri().path(),
            "method" = request.method().as_str(),
            "location" = query.location.as_str(),
            "dateRange" = query.date_range.as_str(),
            "statusCode" = field::Empty,
            "failureClass" = field::Empty,
        )
    }
}

impl<C: Display> OnFailure<C> for RequestLogger {
    fn on_failure(&mut self, failure_classification: C, latency: Duration, span: &Span) {
        span.record("failureClass", field::display(&failure_classification));
        tracing::warn!(
            target: SENSOR_API_TARGET,
            "request failed with {failure_classification} in {} ms",
            latency.as_millis()
        );
    }
}

impl<B> OnRequest<B> for RequestLogger {
    fn on_request(&mut self, request: &Request<B>, _span: &Span) {
        tracing::info!(
            target: SENSOR_API_TARGET,
            "request started {} {}",
            request.method(),
            request.uri().path()
        )
    }
}

impl<B> OnResponse<B> for RequestLogger {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        span.record("statusCode", response.status().as_u16());
        tracing::info!(
            target: SENSOR_API_TARGET,
            "response completed with status {} in {} ms",
            response.status(),
            latency.as_millis()
        );
    }
}
