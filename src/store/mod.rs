//! Target store subsystem.
//!
//! # Data Flow
//! ```text
//! MySQL `urls` table
//!     → mysql.rs (pooled connection, single SELECT per call)
//!     → types.rs (rows decoded into Target)
//!     → snapshot manager (change detection)
//! ```
//!
//! # Design Decisions
//! - One attempt per call; retries belong to the next cycle
//! - Result order follows the store and carries no meaning
//! - The core only sees the `TargetStore` trait

pub mod mysql;
pub mod types;

use async_trait::async_trait;

pub use mysql::MySqlTargetStore;
pub use types::{StoreError, StoreResult, Target};

/// Source of the current set of targets.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Load every target currently held by the store.
    async fn load_targets(&self) -> StoreResult<Vec<Target>>;
}
