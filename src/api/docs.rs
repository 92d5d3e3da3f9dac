//! OpenAPI document served at `/docs` and `/redoc`.

use utoipa::OpenApi;

use crate::agent::{HealthReport, HealthStatus};
use crate::registry::{AgentPayload, AgentRecord, AgentStatus};

use super::agents;
use super::handlers::{self, RootInfo};
use super::response::ResultKind;

/// Path of the raw OpenAPI JSON.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Agent API",
        version = "1.0.0",
        description = "AI agent service: health probing and agent registry"
    ),
    paths(
        handlers::root,
        handlers::health,
        agents::create_agent,
        agents::list_agents,
        agents::get_agent,
        agents::get_agent_by_name,
        agents::list_by_type,
        agents::list_by_status,
        agents::search_agents,
        agents::update_agent,
        agents::delete_agent,
        agents::activate_agent,
        agents::deactivate_agent,
        agents::count_by_type,
        agents::count_by_status,
    ),
    components(schemas(
        RootInfo,
        HealthReport,
        HealthStatus,
        AgentRecord,
        AgentPayload,
        AgentStatus,
        ResultKind
    )),
    tags(
        (name = "service", description = "Service status"),
        (name = "agents", description = "Agent registry")
    )
)]
pub struct ApiDoc;
