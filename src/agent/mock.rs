//! Mock agent for unit testing.
//!
//! Lets tests drive every branch of the health probe without a network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;

use super::types::{HealthReport, HealthStatus};
use super::Agent;

/// How the mock responds to a health check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MockBehavior {
    /// Report healthy.
    #[default]
    Healthy,
    /// Report degraded.
    Degraded,
    /// Return an error with this message.
    Fail(String),
    /// Never complete.
    Hang,
    /// Panic inside the health check.
    Panic,
}

/// Mock agent for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAgent {
    /// Current behavior.
    behavior: Arc<Mutex<MockBehavior>>,
    /// Number of health checks received.
    calls: Arc<AtomicU64>,
    /// Simulated latency in milliseconds.
    latency_ms: u64,
}

impl MockAgent {
    /// Create a healthy mock agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock agent with the given behavior.
    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            ..Self::default()
        }
    }

    /// Create a mock agent whose health check fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(message.into()))
    }

    /// Add simulated latency to every health check.
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Change the behavior of this mock and all its clones.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap_or_else(|e| e.into_inner()) = behavior;
    }

    /// Number of health checks received so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        "mock-agent"
    }

    async fn health_check(&self) -> Result<HealthReport, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }

        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        match behavior {
            MockBehavior::Healthy => Ok(HealthReport::healthy().detail("agent", self.name())),
            MockBehavior::Degraded => {
                Ok(HealthReport::with_status(HealthStatus::Degraded).detail("agent", self.name()))
            }
            MockBehavior::Fail(message) => Err(AgentError::HealthCheckFailed(message)),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Panic => panic!("mock agent panicked"),
        }
    }
}
