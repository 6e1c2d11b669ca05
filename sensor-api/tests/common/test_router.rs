//! Test Router
use crate::common::{test_database::seeded_database, MIME_JSON};
use axum::{body::Body, Router};
use http::{header::CONTENT_TYPE, Method, Request, Uri};
use sensor_api::{arguments::AppConfig, build_app, API_KEY_HEADER};
use sensor_database::{database::MeasurementDatabase, memory_database::MemoryDatabase};
use std::{
    future::Future,
    sync::{Arc, Once},
};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Key the test router is configured with.
pub(crate) const TEST_API_KEY: &str = "TEST_API_KEY";

pub struct TestApp {
    router: Router,
    request: Request<Body>,
}

impl TestApp {
    /// Run the test request.
    async fn run(self) -> http::Response<Body> {
        self.router.oneshot(self.request).await.unwrap()
    }
}

/// Build a test router.
pub(crate) struct TestRouterBuilder<D = MemoryDatabase> {
    database: Arc<D>,
    api_key: Option<String>,
}

/// Global log initialization.
static INIT: Once = Once::new();

// Setup tracing first.
fn init_log() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(true)
            .init();
    });
}

impl TestRouterBuilder<MemoryDatabase> {
    /// New test router builder over the seeded database.
    #[must_use]
    pub fn new() -> Self {
        Self {
            database: Arc::new(seeded_database()),
            api_key: Some(TEST_API_KEY.to_owned()),
        }
    }
}

impl<D> TestRouterBuilder<D>
where
    D: MeasurementDatabase + 'static,
{
    /// Use an existing database.
    #[allow(dead_code)]
    #[must_use]
    pub fn with_database<E>(self, database: Arc<E>) -> TestRouterBuilder<E> {
        TestRouterBuilder {
            database,
            api_key: self.api_key,
        }
    }

    /// Send `key` in the api key header.
    #[allow(dead_code)]
    #[must_use]
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_owned());
        self
    }

    /// Send no api key header.
    #[allow(dead_code)]
    #[must_use]
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    fn request<U>(self, method: Method, uri: U, body: Option<Body>) -> TestApp
    where
        U: TryInto<Uri>,
        <U as TryInto<Uri>>::Error: Into<http::Error>,
    {
        let mut request = Request::builder().uri(uri).method(method);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.as_str());
        }
        let body = match body {
            Some(body) => {
                request = request.header(CONTENT_TYPE, MIME_JSON);
                body
            }
            None => Body::empty(),
        };

        TestApp {
            router: app(self.database),
            request: request.body(body).unwrap(),
        }
    }

    /// Run a get request.
    #[allow(dead_code)]
    pub fn get<U>(self, uri: U) -> impl Future<Output = http::Response<Body>>
    where
        U: TryInto<Uri>,
        <U as TryInto<Uri>>::Error: Into<http::Error>,
    {
        self.request(Method::GET, uri, None).run()
    }

    /// Run a post request.
    #[allow(dead_code)]
    pub fn post<U>(self, uri: U, body: impl Into<Body>) -> impl Future<Output = http::Response<Body>>
    where
        U: TryInto<Uri>,
        <U as TryInto<Uri>>::Error: Into<http::Error>,
    {
        self.request(Method::POST, uri, Some(body.into())).run()
    }

    /// Run a put request
    #[allow(dead_code)]
    pub fn put<U>(self, uri: U, body: impl Into<Body>) -> impl Future<Output = http::Response<Body>>
    where
        U: TryInto<Uri>,
        <U as TryInto<Uri>>::Error: Into<http::Error>,
    {
        self.request(Method::PUT, uri, Some(body.into())).run()
    }

    /// Run a delete request.
    #[allow(dead_code)]
    pub fn delete<U>(self, uri: U) -> impl Future<Output = http::Response<Body>>
    where
        U: TryInto<Uri>,
        <U as TryInto<Uri>>::Error: Into<http::Error>,
    {
        self.request(Method::DELETE, uri, None).run()
    }
}

/// Build test Router.
fn app<D>(database: Arc<D>) -> Router
where
    D: MeasurementDatabase + 'static,
{
    init_log();
    build_app(
        database,
        AppConfig::new(TEST_API_KEY, concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
    )
}
