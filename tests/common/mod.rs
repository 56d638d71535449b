//! Shared helpers for driving the router in-process.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_admin::auth::SimulatedAuthenticator;
use catalog_admin::build_router;
use catalog_admin::repository::ProductRepository;
use catalog_admin::state::{AppState, Settings};
use catalog_admin::store::{Document, DocumentStore, Fields, MemoryStore, SortDirection, StoreError};
use catalog_admin::view::format::CurrencyFormat;

pub const SECRET: &str = "test-secret";

pub fn app_with_store(store: Arc<dyn DocumentStore>) -> Router {
    let state = AppState::new(
        ProductRepository::new(store),
        Arc::new(SimulatedAuthenticator::new(Duration::ZERO, "Josias Peguero")),
        Settings {
            store_name: "Store".into(),
            currency: CurrencyFormat::default(),
            jwt_secret: SECRET.into(),
        },
    );
    build_router(state)
}

pub fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

/// Store whose every call fails as if the backend were unreachable.
pub struct DownStore;

#[async_trait]
impl DocumentStore for DownStore {
    async fn list(&self, _: &str, _: &str, _: SortDirection) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn create(&self, _: &str, _: Fields) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _: &str, _: &str, _: Fields) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}
