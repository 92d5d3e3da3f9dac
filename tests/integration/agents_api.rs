//! Agent registry API under `/api/v1/agents`.

use agent_service::agent::MockAgent;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{app_with, body_json, get, json_request, send};

async fn create(app: &Router, name: &str, agent_type: &str) -> Value {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/v1/agents",
            json!({"name": name, "type": agent_type, "created_by": "tests"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn put(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_then_fetch() {
    let app = app_with(MockAgent::new());

    let created = create(&app, "planner", "chat").await;
    assert_eq!(created["result"], "SUCCESS");
    assert_eq!(created["message"], "Agent created");
    assert_eq!(created["data"]["id"], 1);
    assert_eq!(created["data"]["status"], "ACTIVE");
    assert_eq!(created["data"]["type"], "chat");
    assert_eq!(created["data"]["version"], 0);

    let by_id = body_json(send(&app, get("/api/v1/agents/1")).await).await;
    assert_eq!(by_id["data"]["name"], "planner");

    let by_name = body_json(send(&app, get("/api/v1/agents/name/planner")).await).await;
    assert_eq!(by_name["data"]["id"], 1);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = app_with(MockAgent::new());
    create(&app, "planner", "chat").await;

    let response = send(
        &app,
        json_request("POST", "/api/v1/agents", json!({"name": "planner", "type": "rag"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({"result": "ERROR", "message": "agent name already exists: planner", "data": null})
    );
}

#[tokio::test]
async fn invalid_payloads_are_rejected_with_envelope() {
    let app = app_with(MockAgent::new());

    let response = send(
        &app,
        json_request("POST", "/api/v1/agents", json!({"name": "", "type": "chat"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["result"], "ERROR");
    assert_eq!(body["message"], "validation failed: name must not be blank");

    let response = send(
        &app,
        json_request("POST", "/api/v1/agents", json!({"name": "no-type"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["result"], "ERROR");
}

#[tokio::test]
async fn missing_agent_is_not_found() {
    let app = app_with(MockAgent::new());
    let response = send(&app, get("/api/v1/agents/42")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "agent not found, id: 42");

    let response = send(&app, get("/api/v1/agents/name/ghost")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_status_changes_and_counts() {
    let app = app_with(MockAgent::new());
    create(&app, "planner", "chat").await;
    create(&app, "retriever", "rag").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/v1/agents/1",
            json!({"name": "task-planner", "type": "chat", "status": "TRAINING", "updated_by": "ops"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["name"], "task-planner");
    assert_eq!(updated["data"]["status"], "TRAINING");
    assert_eq!(updated["data"]["version"], 1);

    let deactivated = body_json(send(&app, put("/api/v1/agents/2/deactivate")).await).await;
    assert_eq!(deactivated["data"]["status"], "INACTIVE");

    let count = body_json(send(&app, get("/api/v1/agents/count/status/inactive")).await).await;
    assert_eq!(count["data"], 1);
    let count = body_json(send(&app, get("/api/v1/agents/count/type/chat")).await).await;
    assert_eq!(count["data"], 1);

    let training = body_json(send(&app, get("/api/v1/agents/status/TRAINING")).await).await;
    assert_eq!(training["data"].as_array().unwrap().len(), 1);

    let activated = body_json(send(&app, put("/api/v1/agents/2/activate")).await).await;
    assert_eq!(activated["data"]["status"], "ACTIVE");
}

#[tokio::test]
async fn unknown_status_is_bad_request() {
    let app = app_with(MockAgent::new());
    let response = send(&app, get("/api/v1/agents/status/sleeping")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "unknown agent status: sleeping"
    );
}

#[tokio::test]
async fn malformed_path_and_query_use_envelope() {
    let app = app_with(MockAgent::new());

    for request in [
        get("/api/v1/agents/abc"),
        put("/api/v1/agents/-1/activate"),
        get("/api/v1/agents/search"),
    ] {
        let uri = request.uri().to_string();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["result"], "ERROR", "{uri}");
        assert_eq!(body["data"], Value::Null, "{uri}");
        assert!(!body["message"].as_str().unwrap_or("").is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn list_search_and_filter() {
    let app = app_with(MockAgent::new());
    create(&app, "web-search", "tool").await;
    create(&app, "doc-search", "rag").await;
    create(&app, "chatter", "chat").await;

    let all = body_json(send(&app, get("/api/v1/agents")).await).await;
    let names: Vec<&str> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["chatter", "doc-search", "web-search"]);

    let found = body_json(send(&app, get("/api/v1/agents/search?name=search")).await).await;
    assert_eq!(found["data"].as_array().unwrap().len(), 2);

    let tools = body_json(send(&app, get("/api/v1/agents/type/tool")).await).await;
    assert_eq!(tools["data"][0]["name"], "web-search");
}

#[tokio::test]
async fn delete_is_soft_and_frees_name() {
    let app = app_with(MockAgent::new());
    create(&app, "planner", "chat").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/agents/1")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], 1);

    let response = send(&app, get("/api/v1/agents/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "agent deleted, id: 1");

    let all = body_json(send(&app, get("/api/v1/agents")).await).await;
    assert_eq!(all["data"], json!([]));

    let recreated = create(&app, "planner", "chat").await;
    assert_eq!(recreated["data"]["id"], 2);
}
