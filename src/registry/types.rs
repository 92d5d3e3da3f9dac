//! Agent definition types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::RegistryError;

/// Maximum length of an agent name.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of an agent description.
pub const MAX_DESCRIPTION_LEN: usize = 500;
/// Maximum length of an agent type.
pub const MAX_TYPE_LEN: usize = 50;
/// Maximum length of the created_by / updated_by fields.
pub const MAX_AUTHOR_LEN: usize = 50;

/// Lifecycle status of a registered agent.
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
    Default,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AgentStatus {
    /// Available for use.
    #[default]
    Active,
    /// Disabled.
    Inactive,
    /// Being trained; not yet available.
    Training,
}

/// A registered agent definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentRecord {
    /// Registry-assigned identifier.
    pub id: u64,
    /// Unique name among live agents.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Agent kind, e.g. "chat" or "retrieval".
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Lifecycle status.
    pub status: AgentStatus,
    /// Opaque configuration, typically JSON.
    pub config: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
    /// Creator.
    pub created_by: Option<String>,
    /// Last updater.
    pub updated_by: Option<String>,
    /// Soft-delete flag.
    #[serde(skip)]
    pub deleted: bool,
    /// Write counter, starts at 0.
    pub version: u64,
}

impl AgentRecord {
    /// Build a fresh record from a validated payload.
    pub(crate) fn from_payload(id: u64, payload: AgentPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            agent_type: payload.agent_type,
            status: AgentStatus::Active,
            config: payload.config,
            created_at: now,
            updated_at: now,
            created_by: payload.created_by,
            updated_by: payload.updated_by,
            deleted: false,
            version: 0,
        }
    }

    /// Record a write.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.version += 1;
    }
}

/// Client input for creating or updating an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentPayload {
    /// Agent name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Agent kind.
    #[serde(rename = "type")]
    pub agent_type: String,
    /// Requested status. Ignored on create; kept unchanged on update when absent.
    #[serde(default)]
    pub status: Option<AgentStatus>,
    /// Opaque configuration.
    #[serde(default)]
    pub config: Option<String>,
    /// Creator.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Updater.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl AgentPayload {
    /// Convenience constructor used by tests and seeding.
    pub fn new(name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent_type: agent_type.into(),
            ..Self::default()
        }
    }

    /// Check field constraints, collecting every violation.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be blank".to_string());
        } else if self.name.chars().count() > MAX_NAME_LEN {
            problems.push(format!("name must be at most {MAX_NAME_LEN} characters"));
        }

        if self.agent_type.trim().is_empty() {
            problems.push("type must not be blank".to_string());
        } else if self.agent_type.chars().count() > MAX_TYPE_LEN {
            problems.push(format!("type must be at most {MAX_TYPE_LEN} characters"));
        }

        check_len(&mut problems, "description", &self.description, MAX_DESCRIPTION_LEN);
        check_len(&mut problems, "created_by", &self.created_by, MAX_AUTHOR_LEN);
        check_len(&mut problems, "updated_by", &self.updated_by, MAX_AUTHOR_LEN);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::Validation(problems.join(", ")))
        }
    }
}

fn check_len(problems: &mut Vec<String>, field: &str, value: &Option<String>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            problems.push(format!("{field} must be at most {max} characters"));
        }
    }
}
