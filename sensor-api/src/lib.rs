use crate::{
    arguments::AppConfig,
    handlers::measurement_handlers,
    middleware::{api_key::require_api_key, request_trace::RequestLogger},
};
use axum::{
    extract::Extension,
    http::header::HeaderName,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use sensor_database::database::MeasurementDatabase;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    classify::StatusInRangeAsFailures,
    compression::CompressionLayer,
    propagate_header::PropagateHeaderLayer,
    request_id::SetRequestIdLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod arguments;
mod extractors;
mod handlers;
mod middleware;
pub mod types;

pub use middleware::api_key::API_KEY_HEADER;

/// Tracing target for sensor-api.
pub const SENSOR_API_TARGET: &str = "sensor-api";
/// Header name for correlation request identifier.
pub const REQ_ID_HEADER: &str = "x-request-id";

/// Measurement endpoint routes with handler mappings.
fn measurement_routes<D>() -> Router
where
    D: MeasurementDatabase + 'static,
{
    Router::new()
        .route(
            "/measurements_get",
            get(measurement_handlers::get_measurements::<D>),
        )
        .route(
            "/measurements_post",
            post(measurement_handlers::save_measurement::<D>),
        )
        .route(
            "/measurements_delete",
            delete(measurement_handlers::delete_measurements::<D>),
        )
        .route(
            "/measurements_put",
            put(measurement_handlers::update_measurement::<D>),
        )
}

/// Routes reachable without an api key.
fn public_routes(app_config: &AppConfig) -> Router {
    let static_dir = app_config.static_dir();
    Router::new()
        .route("/", get(handlers::hello))
        .route_service("/api_test", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/public", ServeDir::new(static_dir))
}

/// Builds the routes and the layered middleware.
pub fn build_app<D>(database: Arc<D>, app_config: AppConfig) -> Router
where
    D: MeasurementDatabase + 'static,
{
    let app_config = Arc::new(app_config);

    let tower_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQ_ID_HEADER),
            middleware::MakeRequestUuid,
        ))
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(
            REQ_ID_HEADER,
        )))
        .layer(
            TraceLayer::new(
                StatusInRangeAsFailures::new_for_client_and_server_errors().into_make_classifier(),
            )
            .make_span_with(RequestLogger)
            .on_request(RequestLogger)
            .on_failure(RequestLogger)
            .on_response(RequestLogger),
        )
        .layer(Extension(database))
        .layer(CompressionLayer::new());

    let protected = measurement_routes::<D>()
        .route_layer(from_fn_with_state(app_config.clone(), require_api_key));

    public_routes(&app_config)
        .merge(protected)
        .layer(tower_middleware)
}
