//! Unified error types for the agent service.

use thiserror::Error;

/// Unified error type for the agent service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Agent construction or probing error.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent or blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A setting is present but malformed.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        /// Environment variable name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors raised by an agent's health check.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The LLM backend could not be reached.
    #[error("llm backend unreachable at {endpoint}: {reason}")]
    Unreachable {
        /// Endpoint that was probed.
        endpoint: String,
        /// Transport failure description.
        reason: String,
    },

    /// The health check failed for an agent-specific reason.
    #[error("health check failed: {0}")]
    HealthCheckFailed(String),

    /// HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Agent registry errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No agent with this id exists.
    #[error("agent not found, id: {0}")]
    NotFound(u64),

    /// No live agent with this name exists.
    #[error("agent not found, name: {0}")]
    NameNotFound(String),

    /// The agent was soft-deleted.
    #[error("agent deleted, id: {0}")]
    Deleted(u64),

    /// Another live agent already uses this name.
    #[error("agent name already exists: {0}")]
    DuplicateName(String),

    /// Payload failed field validation.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
