//! Root, health, CORS, metrics and lifecycle behaviour.

use std::sync::Arc;
use std::time::Duration;

use agent_service::agent::{MockAgent, MockBehavior};
use agent_service::api::{create_app, AppState};
use agent_service::config::Config;
use agent_service::error::ServiceError;
use agent_service::server;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{app_with, body_json, get, send, test_config};

#[tokio::test]
async fn root_is_static_even_with_failing_agent() {
    let app = app_with(MockAgent::failing("llm down"));
    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "AI Agent API", "version": "1.0.0", "status": "running"})
    );
}

#[tokio::test]
async fn health_passes_agent_status_through() {
    let agent = MockAgent::with_behavior(MockBehavior::Degraded);
    let app = app_with(agent.clone());

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert!(body.get("error").is_none());
    assert_eq!(agent.calls(), 1);
}

#[tokio::test]
async fn health_converts_agent_error_to_unhealthy_200() {
    let app = app_with(MockAgent::failing("llm down"));

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "health check failed: llm down");
}

#[tokio::test]
async fn health_times_out_hanging_agent() {
    let app = app_with(MockAgent::with_behavior(MockBehavior::Hang));

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["error"], "health check timed out after 200ms");
}

#[tokio::test]
async fn health_follows_agent_recovery() {
    let agent = MockAgent::failing("warming up");
    let app = app_with(agent.clone());

    let body = body_json(send(&app, get("/health")).await).await;
    assert_eq!(body["status"], "unhealthy");

    agent.set_behavior(MockBehavior::Healthy);
    let body = body_json(send(&app, get("/health")).await).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn cors_preflight_accepts_any_origin() {
    let app = app_with(MockAgent::new());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/agents")
        .header("origin", "https://anywhere.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,x-custom")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "https://anywhere.example"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-allow-methods"], "POST");
    assert_eq!(
        headers["access-control-allow-headers"],
        "content-type,x-custom"
    );
}

#[tokio::test]
async fn cors_simple_request_echoes_origin() {
    let app = app_with(MockAgent::new());
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn metrics_endpoint_renders_with_handle() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::new(test_config(), Arc::new(MockAgent::new())).with_metrics(handle);
    let app = create_app(state);

    let response = send(&app, get("/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn swagger_ui_is_mounted() {
    let app = app_with(MockAgent::new());
    let response = send(&app, get("/docs/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(send(&app, get("/api-docs/openapi.json")).await).await;
    assert_eq!(doc["info"]["title"], "AI Agent API");
    assert!(doc["paths"]["/health"].is_object());
}

#[tokio::test]
async fn invalid_config_aborts_before_serving() {
    let agent = MockAgent::new();
    let config = Config {
        openai_api_key: None,
        ..test_config()
    };

    // With a signal that never fires, only a startup failure can return.
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        server::serve(
            config,
            Arc::new(agent.clone()),
            None,
            std::future::pending(),
        ),
    )
    .await
    .expect("serve should fail fast");

    assert!(matches!(result, Err(ServiceError::InvalidConfig(_))));
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn valid_config_serves_until_signal() {
    let agent = MockAgent::failing("llm down");
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(server::serve(
        test_config(),
        Arc::new(agent.clone()),
        None,
        async move {
            let _ = rx.await;
        },
    ));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!handle.is_finished());

    tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
    // The startup probe ran once even though the agent was unhealthy.
    assert_eq!(agent.calls(), 1);
}

#[tokio::test]
async fn concurrent_health_checks_share_one_agent() {
    let agent = MockAgent::new().with_latency(20);
    let app = app_with(agent.clone());

    let responses =
        futures::future::join_all((0..16).map(|_| send(&app, get("/health")))).await;

    assert!(responses.iter().all(|r| r.status() == StatusCode::OK));
    assert_eq!(agent.calls(), 16);
}
