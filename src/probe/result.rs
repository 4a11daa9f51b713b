//! Probe result types.

use std::time::Duration;

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response was received and its body fully read.
    Success {
        status: u16,
        body_size: usize,
        latency: Duration,
    },
    /// The request could not be sent or no response arrived.
    TransportError(String),
    /// The response arrived but its body could not be read.
    ReadError(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Success { .. } => "success",
            ProbeOutcome::TransportError(_) => "transport_error",
            ProbeOutcome::ReadError(_) => "read_error",
        }
    }
}

/// Result of probing one target. Lives only until it is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub target_id: i64,
    pub address: String,
    pub outcome: ProbeOutcome,
}
