//! Agent collaborator.
//!
//! The service only ever talks to an agent through [`Agent::health_check`].
//! This module handles:
//! - Health report types
//! - The LLM-backed production agent
//! - Mock agent for testing

pub mod llm;
pub mod mock;
pub mod types;

use async_trait::async_trait;

use crate::error::AgentError;

pub use llm::LlmAgent;
pub use mock::{MockAgent, MockBehavior};
pub use types::{HealthReport, HealthStatus};

/// An agent the service can probe.
///
/// Implementations are shared across request tasks behind an `Arc`, so
/// `health_check` must be safe to call concurrently.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Report the agent's current health.
    ///
    /// Implementations should prefer reflecting problems in the returned
    /// report; an `Err` is still tolerated and converted by the caller.
    async fn health_check(&self) -> Result<HealthReport, AgentError>;
}
