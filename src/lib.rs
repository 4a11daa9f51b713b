//! Uptime poller library.
//!
//! Periodically re-reads probe targets from a MySQL table and issues one
//! concurrent HTTP GET per target, with a cycle-wide deadline that stops
//! waiting for slow endpoints without cancelling them.

// Core
pub mod dispatch;
pub mod probe;
pub mod snapshot;
pub mod store;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

#[cfg(test)]
mod testing;

pub use config::PollerConfig;
pub use dispatch::{CycleDispatcher, CycleOutcome, Scheduler};
pub use lifecycle::Shutdown;
pub use probe::{HttpTransport, ProbeExecutor};
pub use snapshot::SnapshotManager;
pub use store::{MySqlTargetStore, Target, TargetStore};
