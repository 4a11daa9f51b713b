//! Snapshot manager.
//!
//! # Responsibilities
//! - Hold the last-known-good snapshot behind a read/write lock
//! - Refresh it from the target store
//! - Replace it wholesale only when the loaded set differs

use std::sync::Arc;

use parking_lot::RwLock;

use crate::observability::metrics;
use crate::snapshot::state::Snapshot;
use crate::store::{Target, TargetStore};

/// What a single refresh did to the held snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The store could not be read; the snapshot is stale but kept.
    StoreFailed,
    /// The store returned no targets; the snapshot is kept.
    Empty,
    /// The loaded set matched the held snapshot.
    Unchanged { targets: usize },
    /// The snapshot was swapped for the loaded set.
    Replaced { previous: usize, current: usize },
}

/// Owner of the live snapshot.
pub struct SnapshotManager {
    store: Arc<dyn TargetStore>,
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotManager {
    /// Create a manager holding an empty snapshot.
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    /// Reload targets and replace the snapshot if they changed.
    ///
    /// Never fails: store errors and empty reads are logged and leave the
    /// held snapshot untouched.
    pub async fn refresh(&self) -> RefreshOutcome {
        let loaded = match self.store.load_targets().await {
            Ok(targets) => targets,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load targets, keeping current snapshot");
                metrics::record_store_error(e.kind());
                return RefreshOutcome::StoreFailed;
            }
        };

        self.apply(loaded)
    }

    /// Compare `loaded` against the held snapshot and swap on change.
    ///
    /// Comparison and replacement share one exclusive critical section, so
    /// concurrent callers cannot lose each other's updates.
    pub fn apply(&self, loaded: Vec<Target>) -> RefreshOutcome {
        if loaded.is_empty() {
            tracing::warn!("No targets found in store, keeping current snapshot");
            return RefreshOutcome::Empty;
        }

        let mut current = self.current.write();
        let previous = current.len();

        if !current.differs_from(&loaded) {
            tracing::debug!(targets = previous, "Targets unchanged");
            return RefreshOutcome::Unchanged { targets: previous };
        }

        let replacement = Arc::new(Snapshot::new(loaded));
        let count = replacement.len();
        *current = replacement;
        drop(current);

        if previous != count {
            tracing::info!(previous, current = count, "Target set changed size");
        } else {
            tracing::info!(targets = count, "Target set changed");
        }
        metrics::record_snapshot_replaced(count);

        RefreshOutcome::Replaced {
            previous,
            current: count,
        }
    }

    /// The live snapshot, safe to iterate after the lock is released.
    pub fn read_snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedStore;
    use crate::store::StoreError;

    fn targets(pairs: &[(i64, &str)]) -> Vec<Target> {
        pairs.iter().map(|(id, a)| Target::new(*id, *a)).collect()
    }

    fn manager(script: Vec<Result<Vec<Target>, StoreError>>) -> SnapshotManager {
        SnapshotManager::new(Arc::new(ScriptedStore::new(script)))
    }

    #[tokio::test]
    async fn test_first_load_replaces_empty_snapshot() {
        let manager = manager(vec![Ok(targets(&[(1, "http://a")]))]);
        assert!(manager.read_snapshot().is_empty());

        let outcome = manager.refresh().await;
        assert_eq!(outcome, RefreshOutcome::Replaced { previous: 0, current: 1 });
        assert_eq!(manager.read_snapshot().targets(), targets(&[(1, "http://a")]).as_slice());
    }

    #[tokio::test]
    async fn test_unchanged_refresh_keeps_same_snapshot() {
        let manager = manager(vec![
            Ok(targets(&[(1, "http://a")])),
            Ok(targets(&[(1, "http://a")])),
            Ok(targets(&[(1, "http://a")])),
        ]);
        manager.refresh().await;
        let before = manager.read_snapshot();

        assert_eq!(manager.refresh().await, RefreshOutcome::Unchanged { targets: 1 });
        assert_eq!(manager.refresh().await, RefreshOutcome::Unchanged { targets: 1 });
        assert!(Arc::ptr_eq(&before, &manager.read_snapshot()));
    }

    #[tokio::test]
    async fn test_changed_address_replaces_snapshot() {
        let manager = manager(vec![
            Ok(targets(&[(1, "http://a")])),
            Ok(targets(&[(1, "http://b")])),
        ]);
        manager.refresh().await;
        let before = manager.read_snapshot();

        assert_eq!(
            manager.refresh().await,
            RefreshOutcome::Replaced { previous: 1, current: 1 }
        );
        let after = manager.read_snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.address_of(1), Some("http://b"));
        assert_eq!(before.address_of(1), Some("http://a"));
    }

    #[tokio::test]
    async fn test_empty_read_keeps_snapshot() {
        let manager = manager(vec![
            Ok(targets(&[(1, "http://a"), (2, "http://b")])),
            Ok(Vec::new()),
        ]);
        manager.refresh().await;
        let before = manager.read_snapshot();

        assert_eq!(manager.refresh().await, RefreshOutcome::Empty);
        let after = manager.read_snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
    }

    #[tokio::test]
    async fn test_store_error_keeps_stale_snapshot() {
        let manager = manager(vec![
            Ok(targets(&[(1, "http://a")])),
            Err(StoreError::Unreachable("connection refused".into())),
            Err(StoreError::QueryFailed("table missing".into())),
        ]);
        manager.refresh().await;
        let before = manager.read_snapshot();

        assert_eq!(manager.refresh().await, RefreshOutcome::StoreFailed);
        assert_eq!(manager.refresh().await, RefreshOutcome::StoreFailed);
        assert!(Arc::ptr_eq(&before, &manager.read_snapshot()));
    }

    #[tokio::test]
    async fn test_store_error_on_first_load_leaves_empty() {
        let manager = manager(vec![Err(StoreError::ReadFailed("bad row".into()))]);
        assert_eq!(manager.refresh().await, RefreshOutcome::StoreFailed);
        assert!(manager.read_snapshot().is_empty());
    }

    #[test]
    fn test_readers_never_see_partial_snapshot() {
        let manager = Arc::new(manager(Vec::new()));
        let generation = |tag: &str| -> Vec<Target> {
            (0..64).map(|i| Target::new(i, format!("http://{tag}/{i}"))).collect()
        };
        manager.apply(generation("old"));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let manager = manager.clone();
                std::thread::spawn(move || {
                    for _ in 0..2_000 {
                        let snapshot = manager.read_snapshot();
                        assert_eq!(snapshot.len(), 64);
                        let old = snapshot.targets()[0].address.starts_with("http://old/");
                        let prefix = if old { "http://old/" } else { "http://new/" };
                        assert!(snapshot.targets().iter().all(|t| t.address.starts_with(prefix)));
                    }
                })
            })
            .collect();

        for i in 0..500 {
            let tag = if i % 2 == 0 { "new" } else { "old" };
            manager.apply(generation(tag));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_writers_leave_one_complete_set() {
        let manager = Arc::new(manager(Vec::new()));
        let generation = |writer: usize, round: usize| -> Vec<Target> {
            let len = 8 + writer * 4;
            (0..len as i64)
                .map(|i| Target::new(i, format!("http://w{writer}-r{round}/{i}")))
                .collect()
        };

        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let manager = manager.clone();
                std::thread::spawn(move || {
                    for round in 0..300 {
                        manager.apply(generation(writer, round));
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let manager = manager.clone();
                std::thread::spawn(move || {
                    for _ in 0..2_000 {
                        let snapshot = manager.read_snapshot();
                        let Some(first) = snapshot.targets().first() else {
                            continue;
                        };
                        let prefix = first.address.rsplit_once('/').unwrap().0.to_string();
                        assert!(snapshot
                            .targets()
                            .iter()
                            .all(|t| t.address.starts_with(&format!("{prefix}/"))));
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        let last = manager.read_snapshot();
        let first = &last.targets()[0].address;
        let writer = (0..4)
            .find(|w| first.starts_with(&format!("http://w{w}-r299/")))
            .expect("final snapshot is a last round of some writer");
        assert_eq!(last.targets(), generation(writer, 299).as_slice());
    }
}
