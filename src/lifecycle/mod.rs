//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Connect store → Start scheduler
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Scheduler leaves its loop → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Startup failures are fatal; nothing after startup is
//! - Straggling probes are not awaited on exit

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
