//! Metrics collection and exposition.
//!
//! # Metrics
//! - `poller_probes_total` (counter): probes by outcome
//! - `poller_probe_duration_seconds` (histogram): latency of successful probes
//! - `poller_targets` (gauge): targets in the live snapshot
//! - `poller_snapshot_replacements_total` (counter): snapshot swaps
//! - `poller_store_errors_total` (counter): failed target loads by kind
//! - `poller_cycles_total` (counter): cycles by result

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to install Prometheus exporter: {0}")]
    Install(#[from] metrics_exporter_prometheus::BuildError),
}

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(outcome: &'static str) {
    counter!("poller_probes_total", "outcome" => outcome).increment(1);
}

pub fn record_probe_latency(latency: Duration) {
    histogram!("poller_probe_duration_seconds").record(latency.as_secs_f64());
}

pub fn record_snapshot_replaced(targets: usize) {
    counter!("poller_snapshot_replacements_total").increment(1);
    gauge!("poller_targets").set(targets as f64);
}

pub fn record_store_error(kind: &'static str) {
    counter!("poller_store_errors_total", "kind" => kind).increment(1);
}

pub fn record_cycle(result: &'static str) {
    counter!("poller_cycles_total", "result" => result).increment(1);
}
