//! Health report types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Coarse health state reported by an agent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Serving, with reduced capability.
    Degraded,
    /// Not operational.
    Unhealthy,
}

/// Result of a health probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    /// Overall status.
    pub status: HealthStatus,
    /// Failure description, present whenever the probe failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Agent-specific details.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}

impl HealthReport {
    /// A healthy report with no details.
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
            details: Map::new(),
        }
    }

    /// A report with the given status and no details.
    pub fn with_status(status: HealthStatus) -> Self {
        Self {
            status,
            ..Self::healthy()
        }
    }

    /// An unhealthy report carrying an error message.
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
            details: Map::new(),
        }
    }

    /// Attach a detail entry.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Whether the agent reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
