//! HTTP API handlers for the service-level endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::agent::{Agent, HealthReport};
use crate::config::Config;
use crate::health::probe;
use crate::registry::AgentRegistry;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "AI Agent API";
/// Service version reported by the root endpoint.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration, read-only.
    pub config: Arc<Config>,
    /// Agent probed by `/health`.
    pub agent: Arc<dyn Agent>,
    /// Agent definitions served under `/api/v1/agents`.
    pub registry: Arc<AgentRegistry>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with an empty registry and no metrics.
    pub fn new(config: Config, agent: Arc<dyn Agent>) -> Self {
        Self {
            config: Arc::new(config),
            agent,
            registry: Arc::new(AgentRegistry::new()),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("agent", &self.agent.name())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Root endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootInfo {
    /// Service name.
    pub message: String,
    /// Service version.
    pub version: String,
    /// Always "running".
    pub status: String,
}

/// Root handler - fixed service description.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service description", body = RootInfo))
)]
pub async fn root() -> Json<RootInfo> {
    Json(RootInfo {
        message: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        status: "running".to_string(),
    })
}

/// Health check handler - always returns 200; inspect `status` in the body.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Agent health report", body = HealthReport))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let report = probe(Arc::clone(&state.agent), state.config.health_check_timeout()).await;
    Json(report)
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}
