//! Cycle dispatcher.
//!
//! # Responsibilities
//! - Refresh the snapshot before every dispatch
//! - Fan out one concurrent probe per target
//! - Bound the wait for fan-in with a cycle-wide deadline

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time;
use tracing::Instrument;

use crate::observability::metrics;
use crate::probe::ProbeExecutor;
use crate::snapshot::SnapshotManager;

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The snapshot was empty; nothing was probed.
    Skipped,
    /// Every launched probe finished before the deadline.
    Completed { probes: usize },
    /// The deadline fired first; `outstanding` probes were left running.
    DeadlineExceeded { launched: usize, outstanding: usize },
}

impl CycleOutcome {
    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::Skipped => "skipped",
            CycleOutcome::Completed { .. } => "completed",
            CycleOutcome::DeadlineExceeded { .. } => "deadline_exceeded",
        }
    }
}

/// Runs one refresh + fan-out + bounded wait per call.
pub struct CycleDispatcher {
    snapshots: Arc<SnapshotManager>,
    executor: Arc<ProbeExecutor>,
    deadline: Duration,
    cycles: AtomicU64,
}

impl CycleDispatcher {
    pub fn new(
        snapshots: Arc<SnapshotManager>,
        executor: Arc<ProbeExecutor>,
        deadline: Duration,
    ) -> Self {
        Self {
            snapshots,
            executor,
            deadline,
            cycles: AtomicU64::new(0),
        }
    }

    pub fn snapshots(&self) -> &Arc<SnapshotManager> {
        &self.snapshots
    }

    /// Run a full cycle.
    ///
    /// Returns once all probes have finished or the deadline has elapsed,
    /// whichever comes first. Probes still running at the deadline are
    /// neither cancelled nor tracked further; they log their own results.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let span = tracing::info_span!("cycle", cycle);

        let outcome = self.dispatch().instrument(span).await;
        metrics::record_cycle(outcome.label());
        outcome
    }

    async fn dispatch(&self) -> CycleOutcome {
        self.snapshots.refresh().await;

        let snapshot = self.snapshots.read_snapshot();
        if snapshot.is_empty() {
            tracing::warn!("No targets, skipping cycle");
            return CycleOutcome::Skipped;
        }

        let launched = snapshot.len();
        tracing::info!(targets = launched, "Dispatching probes");

        // Started before the first spawn; saturates instead of overflowing.
        let expiry = time::sleep(self.deadline);
        let outstanding = Arc::new(AtomicUsize::new(launched));

        let handles: Vec<_> = snapshot
            .targets()
            .iter()
            .cloned()
            .map(|target| {
                let executor = self.executor.clone();
                let outstanding = outstanding.clone();
                tokio::spawn(
                    async move {
                        executor.run(&target).await;
                        outstanding.fetch_sub(1, Ordering::SeqCst);
                    }
                    .in_current_span(),
                )
            })
            .collect();
        drop(snapshot);

        // Dropping the handles on timeout detaches the tasks.
        tokio::select! {
            biased;
            joined = join_all(handles) => {
                for res in joined {
                    if let Err(e) = res {
                        tracing::error!(error = %e, "Probe task failed");
                    }
                }
                tracing::info!(probes = launched, "All probes finished");
                CycleOutcome::Completed { probes: launched }
            }
            _ = expiry => {
                let outstanding = outstanding.load(Ordering::SeqCst);
                tracing::warn!(
                    launched,
                    outstanding,
                    deadline_secs = self.deadline.as_secs_f64(),
                    "Cycle deadline reached, some probes may still be outstanding"
                );
                CycleOutcome::DeadlineExceeded {
                    launched,
                    outstanding,
                }
            }
        }
    }
}
