//! HTTP transport used by probes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Errors produced by a probe transport.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connecting, sending or awaiting the response headers failed.
    #[error("request failed: {0}")]
    Transport(String),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Read(String),
}

/// Issues one GET request per call, without retries.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn get(&self, address: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError>;
}

/// reqwest-backed transport sharing one connection pool across probes.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("uptime-poller/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn get(&self, address: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        let response = self
            .client
            .get(address)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Read(e.to_string()))?;

        Ok(ProbeResponse {
            status,
            body: body.to_vec(),
        })
    }
}
