//! Server lifecycle: startup checks, serving, shutdown.

use std::future::Future;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::agent::{Agent, LlmAgent};
use crate::api::{create_app, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::health::probe;
use crate::utils::shutdown_signal;

/// Startup hook.
///
/// Fails fast on invalid configuration. The agent is probed once for the
/// log only; an unhealthy agent does not stop startup.
pub async fn startup(config: &Config, agent: Arc<dyn Agent>) -> Result<()> {
    info!("AI Agent service starting...");

    check_config(config)?;
    info!("Configuration validated");

    let report = probe(agent, config.health_check_timeout()).await;
    if report.is_healthy() {
        info!(status = %report.status, "Agent health check");
    } else {
        warn!(
            status = %report.status,
            error = report.error.as_deref().unwrap_or(""),
            "Agent health check"
        );
    }

    Ok(())
}

fn check_config(config: &Config) -> Result<()> {
    config.validate().map_err(|e| {
        error!("Startup failed: {}", e);
        e.into()
    })
}

/// Shutdown hook.
pub async fn shutdown() {
    info!("AI Agent service shutting down...");
}

/// Build the production agent and serve until a shutdown signal arrives.
pub async fn run(config: Config, metrics: Option<PrometheusHandle>) -> Result<()> {
    // Validate before the agent is built from the config.
    check_config(&config)?;
    let agent: Arc<dyn Agent> = Arc::new(LlmAgent::new(&config)?);
    serve(config, agent, metrics, shutdown_signal()).await
}

/// Run startup, bind, serve until `signal` resolves, then run shutdown.
///
/// Nothing is bound when startup fails.
pub async fn serve<F>(
    config: Config,
    agent: Arc<dyn Agent>,
    metrics: Option<PrometheusHandle>,
    signal: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    startup(&config, Arc::clone(&agent)).await?;

    let listener = TcpListener::bind((config.app_host.as_str(), config.app_port)).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    let mut state = AppState::new(config, agent);
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(signal)
        .await?;

    shutdown().await;
    Ok(())
}
