//! Scheduler loop.
//!
//! # Responsibilities
//! - Report the initial target count before the first tick
//! - Drive the cycle dispatcher on a fixed period
//! - Stop on the shutdown signal

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::dispatch::cycle::CycleDispatcher;
use crate::snapshot::RefreshOutcome;

pub struct Scheduler {
    dispatcher: CycleDispatcher,
    interval: Duration,
}

impl Scheduler {
    pub fn new(dispatcher: CycleDispatcher, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
        }
    }

    pub fn dispatcher(&self) -> &CycleDispatcher {
        &self.dispatcher
    }

    /// Eager refresh without probing, so the target count is logged at once.
    pub async fn prime(&self) -> usize {
        let snapshots = self.dispatcher.snapshots();
        if let RefreshOutcome::StoreFailed = snapshots.refresh().await {
            tracing::warn!("Initial target load failed, will retry on the next tick");
        }

        let count = snapshots.read_snapshot().len();
        if count == 0 {
            tracing::warn!("No targets in store yet, waiting for data before probing");
        } else {
            tracing::info!(targets = count, "Starting with initial targets");
        }
        count
    }

    /// Prime, then run one cycle per tick until shutdown.
    ///
    /// The first tick fires one full period after start.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "Scheduler starting"
        );

        self.prime().await;

        let Some(start) = Instant::now().checked_add(self.interval) else {
            tracing::error!(
                interval_secs = self.interval.as_secs_f64(),
                "Polling interval out of range, no cycles will run"
            );
            let _ = shutdown.recv().await;
            return;
        };

        let mut ticker = time::interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.dispatcher.run_cycle().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Scheduler received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
