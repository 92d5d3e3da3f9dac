//! Integration tests for the agent service.
//!
//! Everything runs in-process against the router or the lifecycle
//! functions; no network access is needed.

mod agents_api;
mod service;

use std::sync::Arc;

use agent_service::agent::MockAgent;
use agent_service::api::{create_app, AppState};
use agent_service::config::Config;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// A config that passes validation.
pub fn test_config() -> Config {
    Config {
        app_host: "127.0.0.1".to_string(),
        app_port: 0,
        openai_api_key: Some("sk-test".to_string()),
        health_check_timeout_ms: 200,
        ..Config::default()
    }
}

/// Full application around `agent`.
pub fn app_with(agent: MockAgent) -> Router {
    create_app(AppState::new(test_config(), Arc::new(agent)))
}

/// Send one request through a clone of `app`.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// GET `uri`.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Request with a JSON body.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
