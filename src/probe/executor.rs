//! Probe executor.
//!
//! # Responsibilities
//! - Time and issue a single GET against one target
//! - Convert every failure into a result value
//! - Report the result to the log stream and metrics

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::observability::metrics;
use crate::probe::result::{ProbeOutcome, ProbeResult};
use crate::probe::transport::{ProbeError, ProbeTransport};
use crate::store::Target;

/// Runs probes through a shared transport.
pub struct ProbeExecutor {
    transport: Arc<dyn ProbeTransport>,
    timeout: Duration,
}

impl ProbeExecutor {
    /// `timeout` bounds each request and is independent of any cycle deadline.
    pub fn new(transport: Arc<dyn ProbeTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Probe `target` once and log the outcome.
    pub async fn run(&self, target: &Target) -> ProbeResult {
        let started = Instant::now();

        let outcome = match self.transport.get(&target.address, self.timeout).await {
            Ok(response) => ProbeOutcome::Success {
                status: response.status,
                body_size: response.body.len(),
                latency: started.elapsed(),
            },
            Err(ProbeError::Transport(e)) => ProbeOutcome::TransportError(e),
            Err(ProbeError::Read(e)) => ProbeOutcome::ReadError(e),
        };

        let result = ProbeResult {
            target_id: target.id,
            address: target.address.clone(),
            outcome,
        };
        report(&result);
        result
    }
}

fn report(result: &ProbeResult) {
    match &result.outcome {
        ProbeOutcome::Success {
            status,
            body_size,
            latency,
        } => {
            tracing::info!(
                target_id = result.target_id,
                address = %result.address,
                status,
                bytes = body_size,
                latency_ms = latency.as_millis() as u64,
                "Probe succeeded"
            );
            metrics::record_probe_latency(*latency);
        }
        ProbeOutcome::TransportError(e) => {
            tracing::warn!(
                target_id = result.target_id,
                address = %result.address,
                error = %e,
                "Probe failed: target unreachable"
            );
        }
        ProbeOutcome::ReadError(e) => {
            tracing::warn!(
                target_id = result.target_id,
                address = %result.address,
                error = %e,
                "Probe failed: could not read response body"
            );
        }
    }
    metrics::record_probe(result.outcome.label());
}
