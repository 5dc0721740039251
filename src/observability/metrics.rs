//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dr_probe_attempts_total` (counter): health-check attempts by result
//! - `dr_failover_runs_total` (counter): failover checks by outcome
//! - `dr_actions_total` (counter): operator actions by action and status code
//! - `dr_collaborator_errors_total` (counter): cloud API faults by capability

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe_attempt(healthy: bool) {
    let result = if healthy { "healthy" } else { "unhealthy" };
    metrics::counter!("dr_probe_attempts_total", "result" => result).increment(1);
}

pub fn record_failover_run(outcome: &'static str) {
    metrics::counter!("dr_failover_runs_total", "outcome" => outcome).increment(1);
}

pub fn record_action(action: &str, status_code: u16) {
    metrics::counter!(
        "dr_actions_total",
        "action" => action.to_string(),
        "status" => status_code.to_string()
    )
    .increment(1);
}

pub fn record_collaborator_error(capability: &'static str) {
    metrics::counter!("dr_collaborator_errors_total", "capability" => capability).increment(1);
}
