//! Prometheus metrics for request, health-probe and registry monitoring.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::ServiceError;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Health probe latency metric name.
pub const METRIC_HEALTH_CHECK_LATENCY: &str = "health_check_latency_ms";
/// Health probes counter metric name.
pub const METRIC_HEALTH_CHECKS: &str = "health_checks_total";
/// Registry mutations counter metric name.
pub const METRIC_REGISTRY_MUTATIONS: &str = "registry_mutations_total";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, ServiceError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServiceError::Metrics(e.to_string()))?;

    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(
        METRIC_HEALTH_CHECK_LATENCY,
        "Agent health probe latency in milliseconds"
    );
    describe_counter!(
        METRIC_HEALTH_CHECKS,
        "Total number of agent health probes by outcome"
    );
    describe_counter!(
        METRIC_REGISTRY_MUTATIONS,
        "Total number of agent registry writes by operation"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Count a finished health probe.
pub fn inc_health_checks(outcome: &'static str) {
    counter!(METRIC_HEALTH_CHECKS, "outcome" => outcome).increment(1);
}

/// Increment the registry mutation counter.
pub fn inc_registry_mutation(operation: &'static str) {
    counter!(METRIC_REGISTRY_MUTATIONS, "operation" => operation).increment(1);
}

/// Middleware counting requests and timing them per matched route.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.clone(),
        "method" => method,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);
    record_http_latency(start, &endpoint);

    response
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for agent health probes.
pub fn timer_health_check() -> LatencyTimer {
    LatencyTimer::new(METRIC_HEALTH_CHECK_LATENCY)
}
