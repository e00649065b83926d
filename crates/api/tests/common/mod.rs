#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use roster_api::config::{ServerConfig, StorageBackend};
use roster_api::router::build_app_router;
use roster_api::services::CharacterService;
use roster_api::state::AppState;
use roster_db::MemoryCharacterStore;

/// Date the test app treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
}

/// Build a test `ServerConfig` backed by in-memory storage.
///
/// Keeps the default CORS origin (`http://localhost:5173`) and request
/// timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage: StorageBackend::Memory,
        database_url: None,
        ..ServerConfig::default()
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(MemoryCharacterStore::new())
}

/// Same as [`build_test_app`] but over a caller-owned store, so tests can
/// seed or inspect it directly.
pub fn build_test_app_with(store: MemoryCharacterStore) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        characters: CharacterService::new(Arc::new(store)).with_clock(today),
    };
    build_app_router(state, &config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
