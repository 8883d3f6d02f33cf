#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building a salvo service wired the same way as the binary
//! - Making HTTP requests
//! - Asserting on responses

use std::sync::Arc;

use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde_json::Value;

use almanac_test::component::config::Settings;
pub use almanac_test::component::constants::{APP_ROUTE_PREFIX, EVENTS_ROUTE_PREFIX};
use almanac_test::component::service::{EventService, NotificationDispatcher, TracingDispatcher};
use almanac_test::component::store::{EventStore, MemoryStore};
use almanac_test::handlers::EventServiceHandler;

pub use tracing;

/// Settings used by every test service: defaults plus any TOML overrides.
#[must_use]
pub fn test_settings(overrides: &str) -> Settings {
    Settings::from_toml(overrides).expect("test settings should load")
}

/// ## Summary
/// Creates a service over `store`, with the same hoops and routes as `main`.
#[must_use]
pub fn create_service_with_store(store: Arc<dyn EventStore>, settings: Settings) -> Service {
    let dispatcher: Arc<dyn NotificationDispatcher> = Arc::new(TracingDispatcher);
    let service = Arc::new(EventService::new(store, dispatcher, &settings.calendar));

    let router = Router::new()
        .hoop(EventServiceHandler { service })
        .push(almanac_test::app::api::routes());

    Service::new(router)
}

/// Creates a fresh service over an empty in-memory store.
#[must_use]
pub fn create_test_service() -> Service {
    create_service_with_store(Arc::new(MemoryStore::new()), test_settings(""))
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    body: Option<Value>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// ## Panics
    /// Panics on an unsupported method.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            other => panic!("unsupported method {other}"),
        };

        if let Some(body) = &self.body {
            client = client.json(body);
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

/// Path of a single event.
#[must_use]
pub fn event_path(id: &str) -> String {
    format!("{EVENTS_ROUTE_PREFIX}/{id}")
}

/// Creates an event through the API and returns its stored JSON.
pub async fn create_event(service: &Service, body: Value) -> Value {
    TestRequest::post(EVENTS_ROUTE_PREFIX)
        .json(body)
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json()
}
