//! Target type and store error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One endpoint to probe.
///
/// Immutable once read. Two targets with the same `id` but different
/// `address` values describe a changed target, not a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Store-assigned unique identifier.
    pub id: i64,
    /// URL issued the GET request.
    pub address: String,
}

impl Target {
    pub fn new(id: i64, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
        }
    }
}

impl From<(i64, String)> for Target {
    fn from((id, address): (i64, String)) -> Self {
        Self { id, address }
    }
}

/// Errors that can occur while loading targets.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (connection, TLS, pool exhaustion).
    #[error("target store unreachable: {0}")]
    Unreachable(String),

    /// The query was rejected or failed while executing.
    #[error("target query failed: {0}")]
    QueryFailed(String),

    /// A row could not be decoded into a target.
    #[error("failed to read target row: {0}")]
    ReadFailed(String),
}

impl StoreError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Unreachable(_) => "unreachable",
            StoreError::QueryFailed(_) => "query_failed",
            StoreError::ReadFailed(_) => "read_failed",
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
