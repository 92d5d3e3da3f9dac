//! Agent backed by an OpenAI-compatible LLM endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::AgentError;

use super::types::{HealthReport, HealthStatus};
use super::Agent;

/// Production agent. Its health is the reachability of the LLM backend.
#[derive(Debug, Clone)]
pub struct LlmAgent {
    /// HTTP client for backend requests.
    http: reqwest::Client,
    /// Backend base URL, no trailing slash.
    api_base: String,
    /// Bearer credential.
    api_key: String,
    /// Model the agent is configured for.
    model: String,
}

impl LlmAgent {
    /// Create an agent from validated config.
    pub fn new(config: &Config) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .timeout(config.health_check_timeout())
            .connect_timeout(Duration::from_secs(2))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base_trimmed().to_string(),
            api_key: config.openai_api_key.clone().unwrap_or_default(),
            model: config.model_name.clone(),
        })
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// URL probed by the health check.
    pub fn models_url(&self) -> String {
        format!("{}/models", self.api_base)
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        "llm-agent"
    }

    #[instrument(skip(self), fields(model = %self.model))]
    async fn health_check(&self) -> Result<HealthReport, AgentError> {
        let url = self.models_url();
        let start = Instant::now();

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AgentError::Unreachable {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let code = response.status();
        debug!(status = %code, latency_ms, "llm backend responded");

        let report = if code.is_success() {
            HealthReport::with_status(HealthStatus::Healthy)
        } else {
            warn!(status = %code, "llm backend rejected health probe");
            HealthReport::unhealthy(format!("llm backend returned HTTP {}", code.as_u16()))
        };

        Ok(report
            .detail("agent", self.name())
            .detail("model", self.model.clone())
            .detail("endpoint", self.api_base.clone())
            .detail("latency_ms", latency_ms))
    }
}
