//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Host the HTTP server binds to.
    #[serde(default = "default_host")]
    pub app_host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub app_port: u16,

    /// Debug mode (raises the default log level).
    #[serde(default)]
    pub debug: bool,

    // === LLM Backend ===
    /// API key for the OpenAI-compatible backend. Required.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible backend.
    #[serde(default = "default_api_base")]
    pub openai_api_base: String,

    /// Model the agent talks to.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    // === Health Checks ===
    /// Upper bound for a single agent health probe.
    #[serde(default = "default_health_timeout")]
    pub health_check_timeout_ms: u64,

    // === Logging ===
    /// Log filter (trace, debug, info, warn, error or a full directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model_name() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_health_timeout() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_host: default_host(),
            app_port: default_port(),
            debug: false,
            openai_api_key: None,
            openai_api_base: default_api_base(),
            model_name: default_model_name(),
            health_check_timeout_ms: default_health_timeout(),
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check that every required setting is present and well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.openai_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing("OPENAI_API_KEY")),
        }

        if self.app_host.trim().is_empty() {
            return Err(ConfigError::Missing("APP_HOST"));
        }

        if self.model_name.trim().is_empty() {
            return Err(ConfigError::Missing("MODEL_NAME"));
        }

        let base = Url::parse(&self.openai_api_base).map_err(|e| ConfigError::Invalid {
            field: "OPENAI_API_BASE",
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "OPENAI_API_BASE",
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }

        if self.health_check_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "HEALTH_CHECK_TIMEOUT_MS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Health probe timeout as a [`Duration`].
    pub fn health_check_timeout(&self) -> Duration {
        Duration::from_millis(self.health_check_timeout_ms)
    }

    /// Base URL without a trailing slash.
    pub fn api_base_trimmed(&self) -> &str {
        self.openai_api_base.trim_end_matches('/')
    }

    /// Log filter directive, honoring debug mode.
    pub fn log_filter(&self) -> String {
        if self.debug {
            "agent_service=debug,tower_http=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }
}
