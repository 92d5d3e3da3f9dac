//! Agent registry handlers, mounted under `/api/v1`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::registry::{AgentPayload, AgentRecord, AgentStatus};

use super::handlers::AppState;
use super::response::{ApiError, ApiResponse};

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// Extractors are taken as `Result` so rejections still answer with the envelope.
type JsonBody = Result<Json<AgentPayload>, JsonRejection>;
type IdPath = Result<Path<u64>, PathRejection>;
type TextPath = Result<Path<String>, PathRejection>;

/// Query for name search.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring to look for in agent names.
    pub name: String,
}

fn parse_status(raw: &str) -> Result<AgentStatus, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown agent status: {raw}")))
}

/// Register an agent.
#[utoipa::path(
    post,
    path = "/api/v1/agents",
    tag = "agents",
    request_body = AgentPayload,
    responses(
        (status = 200, description = "Agent created", body = ApiResponse<AgentRecord>),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_agent(
    State(state): State<AppState>,
    payload: JsonBody,
) -> ApiResult<AgentRecord> {
    let Json(payload) = payload?;
    debug!(name = %payload.name, "Create agent request");
    let record = state.registry.create(payload)?;
    Ok(Json(ApiResponse::success_with("Agent created", record)))
}

/// List live agents, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/agents",
    tag = "agents",
    responses((status = 200, description = "All live agents", body = ApiResponse<Vec<AgentRecord>>))
)]
pub async fn list_agents(State(state): State<AppState>) -> ApiResult<Vec<AgentRecord>> {
    Ok(Json(ApiResponse::success(state.registry.list_all())))
}

/// Fetch an agent by id.
#[utoipa::path(
    get,
    path = "/api/v1/agents/{id}",
    tag = "agents",
    params(("id" = u64, Path, description = "Agent id")),
    responses(
        (status = 200, description = "Agent", body = ApiResponse<AgentRecord>),
        (status = 404, description = "Unknown or deleted agent")
    )
)]
pub async fn get_agent(State(state): State<AppState>, id: IdPath) -> ApiResult<AgentRecord> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::success(state.registry.get(id)?)))
}

/// Fetch an agent by exact name.
#[utoipa::path(
    get,
    path = "/api/v1/agents/name/{name}",
    tag = "agents",
    params(("name" = String, Path, description = "Agent name")),
    responses(
        (status = 200, description = "Agent", body = ApiResponse<AgentRecord>),
        (status = 404, description = "No live agent with this name")
    )
)]
pub async fn get_agent_by_name(
    State(state): State<AppState>,
    name: TextPath,
) -> ApiResult<AgentRecord> {
    let Path(name) = name?;
    Ok(Json(ApiResponse::success(state.registry.get_by_name(&name)?)))
}

/// List live agents of a type.
#[utoipa::path(
    get,
    path = "/api/v1/agents/type/{agent_type}",
    tag = "agents",
    params(("agent_type" = String, Path, description = "Agent type")),
    responses((status = 200, description = "Matching agents", body = ApiResponse<Vec<AgentRecord>>))
)]
pub async fn list_by_type(
    State(state): State<AppState>,
    agent_type: TextPath,
) -> ApiResult<Vec<AgentRecord>> {
    let Path(agent_type) = agent_type?;
    Ok(Json(ApiResponse::success(state.registry.list_by_type(&agent_type))))
}

/// List live agents in a status.
#[utoipa::path(
    get,
    path = "/api/v1/agents/status/{status}",
    tag = "agents",
    params(("status" = String, Path, description = "ACTIVE, INACTIVE or TRAINING")),
    responses(
        (status = 200, description = "Matching agents", body = ApiResponse<Vec<AgentRecord>>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_by_status(
    State(state): State<AppState>,
    status: TextPath,
) -> ApiResult<Vec<AgentRecord>> {
    let Path(status) = status?;
    let status = parse_status(&status)?;
    Ok(Json(ApiResponse::success(state.registry.list_by_status(status))))
}

/// Search live agents by name fragment.
#[utoipa::path(
    get,
    path = "/api/v1/agents/search",
    tag = "agents",
    params(SearchParams),
    responses((status = 200, description = "Matching agents", body = ApiResponse<Vec<AgentRecord>>))
)]
pub async fn search_agents(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<AgentRecord>> {
    let Query(params) = params?;
    Ok(Json(ApiResponse::success(state.registry.search_by_name(&params.name))))
}

/// Update an agent.
#[utoipa::path(
    put,
    path = "/api/v1/agents/{id}",
    tag = "agents",
    params(("id" = u64, Path, description = "Agent id")),
    request_body = AgentPayload,
    responses(
        (status = 200, description = "Agent updated", body = ApiResponse<AgentRecord>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown or deleted agent"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_agent(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody,
) -> ApiResult<AgentRecord> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    debug!(id, "Update agent request");
    let record = state.registry.update(id, payload)?;
    Ok(Json(ApiResponse::success_with("Agent updated", record)))
}

/// Soft-delete an agent. Returns the deleted id.
#[utoipa::path(
    delete,
    path = "/api/v1/agents/{id}",
    tag = "agents",
    params(("id" = u64, Path, description = "Agent id")),
    responses(
        (status = 200, description = "Agent deleted", body = ApiResponse<u64>),
        (status = 404, description = "Unknown or deleted agent")
    )
)]
pub async fn delete_agent(State(state): State<AppState>, id: IdPath) -> ApiResult<u64> {
    let Path(id) = id?;
    state.registry.delete(id)?;
    Ok(Json(ApiResponse::success_with("Agent deleted", id)))
}

/// Mark an agent ACTIVE.
#[utoipa::path(
    put,
    path = "/api/v1/agents/{id}/activate",
    tag = "agents",
    params(("id" = u64, Path, description = "Agent id")),
    responses(
        (status = 200, description = "Agent activated", body = ApiResponse<AgentRecord>),
        (status = 404, description = "Unknown or deleted agent")
    )
)]
pub async fn activate_agent(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<AgentRecord> {
    let Path(id) = id?;
    let record = state.registry.activate(id)?;
    Ok(Json(ApiResponse::success_with("Agent activated", record)))
}

/// Mark an agent INACTIVE.
#[utoipa::path(
    put,
    path = "/api/v1/agents/{id}/deactivate",
    tag = "agents",
    params(("id" = u64, Path, description = "Agent id")),
    responses(
        (status = 200, description = "Agent deactivated", body = ApiResponse<AgentRecord>),
        (status = 404, description = "Unknown or deleted agent")
    )
)]
pub async fn deactivate_agent(
    State(state): State<AppState>,
    id: IdPath,
) -> ApiResult<AgentRecord> {
    let Path(id) = id?;
    let record = state.registry.deactivate(id)?;
    Ok(Json(ApiResponse::success_with("Agent deactivated", record)))
}

/// Count live agents of a type.
#[utoipa::path(
    get,
    path = "/api/v1/agents/count/type/{agent_type}",
    tag = "agents",
    params(("agent_type" = String, Path, description = "Agent type")),
    responses((status = 200, description = "Count", body = ApiResponse<u64>))
)]
pub async fn count_by_type(
    State(state): State<AppState>,
    agent_type: TextPath,
) -> ApiResult<u64> {
    let Path(agent_type) = agent_type?;
    Ok(Json(ApiResponse::success(state.registry.count_by_type(&agent_type))))
}

/// Count live agents in a status.
#[utoipa::path(
    get,
    path = "/api/v1/agents/count/status/{status}",
    tag = "agents",
    params(("status" = String, Path, description = "ACTIVE, INACTIVE or TRAINING")),
    responses(
        (status = 200, description = "Count", body = ApiResponse<u64>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn count_by_status(
    State(state): State<AppState>,
    status: TextPath,
) -> ApiResult<u64> {
    let Path(status) = status?;
    let status = parse_status(&status)?;
    Ok(Json(ApiResponse::success(state.registry.count_by_status(status))))
}
