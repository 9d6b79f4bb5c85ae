//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by method, status, outcome
//! - `redirector_request_duration_seconds` (histogram): latency by outcome
//!
//! Outcomes are `redirect`, `not_found`, `unavailable` and `error`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "redirector_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("redirector_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
