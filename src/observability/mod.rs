//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! snapshot, probe, dispatch
//!     → tracing events (logging.rs installs the subscriber)
//!     → metrics.rs (counters, gauges, histograms)
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - The log stream is the only operator-facing error surface
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
