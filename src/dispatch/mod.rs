//! Polling and dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! scheduler.rs (fixed-interval ticker)
//!     → cycle.rs run_cycle():
//!         Idle → Refreshing   SnapshotManager::refresh()
//!              → Dispatching  one spawned probe per target, no cap
//!              → Waiting      all probes done OR cycle deadline
//!              → Done         stragglers keep running detached
//! ```
//!
//! # Design Decisions
//! - The deadline aborts waiting, never the probes themselves
//! - A cycle keeps no results once it returns
//! - Ticks missed during a long cycle are skipped, not queued

pub mod cycle;
pub mod scheduler;

pub use cycle::{CycleDispatcher, CycleOutcome};
pub use scheduler::Scheduler;
