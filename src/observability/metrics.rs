//! Metrics collection and exposition.
//!
//! # Metrics
//! - `demo_requests_total` (counter): requests by endpoint and status
//! - `demo_request_duration_seconds` (histogram): handler latency by endpoint
//! - `demo_outbound_calls_total` (counter): relay calls by upstream status
//!   (`error` when no response was received)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one handled request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "demo_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("demo_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound relay call.
pub fn record_outbound_call(status: Option<u16>) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    metrics::counter!("demo_outbound_calls_total", "status" => status).increment(1);
}
