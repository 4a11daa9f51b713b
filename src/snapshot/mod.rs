//! Target snapshot subsystem.
//!
//! # Data Flow
//! ```text
//! refresh():
//!     TargetStore::load_targets()
//!     → error or empty: keep current snapshot
//!     → exclusive lock: compare count, then id → address
//!     → differs: swap in a new Arc<Snapshot>
//!
//! read_snapshot():
//!     shared lock → clone Arc<Snapshot> → release
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; replacement is a pointer swap
//! - Comparison and swap happen in one critical section
//! - An empty read never clears a non-empty snapshot

pub mod manager;
pub mod state;

pub use manager::{RefreshOutcome, SnapshotManager};
pub use state::Snapshot;
