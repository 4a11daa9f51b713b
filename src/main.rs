//! Uptime poller daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐ tick  ┌────────────────┐ refresh ┌──────────────────┐
//!   │  Scheduler   │──────▶│ CycleDispatcher│────────▶│ SnapshotManager  │◀── MySQL
//!   │ (interval)   │       │  (deadline)    │         │ (RwLock<Arc<..>>)│
//!   └──────────────┘       └───────┬────────┘         └──────────────────┘
//!                                  │ spawn per target
//!                                  ▼
//!                          ┌────────────────┐  GET   ┌──────────┐
//!                          │ ProbeExecutor  │───────▶│ targets  │
//!                          └───────┬────────┘        └──────────┘
//!                                  ▼
//!                          tracing + metrics
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use uptime_poller::config::load_config;
use uptime_poller::lifecycle::signals;
use uptime_poller::observability::{logging, metrics};
use uptime_poller::{
    CycleDispatcher, HttpTransport, MySqlTargetStore, ProbeExecutor, Scheduler, Shutdown,
    SnapshotManager,
};

#[derive(Parser)]
#[command(name = "uptime-poller", version)]
#[command(about = "Periodically probes every URL stored in the targets table", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability.log_level);
    tracing::info!("uptime-poller v{} starting", env!("CARGO_PKG_VERSION"));

    let schedule = &config.poller;
    tracing::info!(
        interval_secs = schedule.interval_secs,
        cycle_deadline_secs = schedule.cycle_deadline_secs,
        probe_timeout_secs = schedule.probe_timeout_secs,
        "Configuration loaded"
    );
    if schedule.cycle_deadline_secs > schedule.interval_secs {
        tracing::warn!("Cycle deadline exceeds the polling interval; cycles will overlap with stragglers");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Metrics disabled");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(MySqlTargetStore::connect(&config.store).await?);
    let transport = Arc::new(HttpTransport::new()?);

    let snapshots = Arc::new(SnapshotManager::new(store));
    let executor = Arc::new(ProbeExecutor::new(transport, schedule.probe_timeout()));
    let dispatcher = CycleDispatcher::new(snapshots, executor, schedule.cycle_deadline());
    let scheduler = Scheduler::new(dispatcher, schedule.interval());

    if args.once {
        scheduler.prime().await;
        let outcome = scheduler.dispatcher().run_cycle().await;
        tracing::info!(?outcome, "Single cycle finished");
        return Ok(());
    }

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(scheduler.run(shutdown.subscribe()));

    signals::wait_for_termination().await;
    let loops = shutdown.trigger();
    tracing::info!(loops, "Stopping scheduler; in-flight probes are not awaited");
    handle.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
