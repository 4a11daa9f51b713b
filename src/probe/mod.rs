//! Probe subsystem.
//!
//! # Data Flow
//! ```text
//! Target
//!     → executor.rs (start clock, single GET, no retry)
//!     → transport.rs (reqwest client, per-request timeout)
//!     → result.rs (Success | TransportError | ReadError)
//!     → log + metrics, then discarded
//! ```
//!
//! # Design Decisions
//! - Probes never fail the caller; every failure is a result value
//! - Results are not stored anywhere beyond the log stream
//! - The transport is a trait so cycles can be driven without a network

pub mod executor;
pub mod result;
pub mod transport;

pub use executor::ProbeExecutor;
pub use result::{ProbeOutcome, ProbeResult};
pub use transport::{HttpTransport, ProbeError, ProbeResponse, ProbeTransport};
