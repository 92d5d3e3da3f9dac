//! Agent health probing that never fails.
//!
//! Whatever the agent does (returns an error, stalls past the deadline,
//! or panics) the caller gets a [`HealthReport`] back.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, instrument};

use crate::agent::{Agent, HealthReport};
use crate::metrics;

/// Probe `agent` once, bounded by `timeout`.
#[instrument(skip(agent), fields(agent = %agent.name(), timeout_ms = timeout.as_millis() as u64))]
pub async fn probe(agent: Arc<dyn Agent>, timeout: Duration) -> HealthReport {
    let _timer = metrics::timer_health_check();

    // Run on its own task so a panicking agent cannot take the request down.
    let mut task = tokio::spawn(async move { agent.health_check().await });

    let report = match tokio::time::timeout(timeout, &mut task).await {
        Ok(Ok(Ok(report))) => report,
        Ok(Ok(Err(e))) => {
            error!("Health check failed: {}", e);
            HealthReport::unhealthy(e.to_string())
        }
        Ok(Err(join_err)) => {
            error!("Health check task aborted: {}", join_err);
            HealthReport::unhealthy(if join_err.is_panic() {
                "health check panicked".to_string()
            } else {
                format!("health check aborted: {join_err}")
            })
        }
        Err(_) => {
            task.abort();
            let message = format!("health check timed out after {}ms", timeout.as_millis());
            error!("{}", message);
            HealthReport::unhealthy(message)
        }
    };

    metrics::inc_health_checks(report.status.into());
    report
}
