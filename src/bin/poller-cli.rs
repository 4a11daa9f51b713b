use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use uptime_poller::config::load_config;
use uptime_poller::observability::logging;
use uptime_poller::probe::ProbeOutcome;
use uptime_poller::{HttpTransport, MySqlTargetStore, ProbeExecutor, Target, TargetStore};

#[derive(Parser)]
#[command(name = "poller-cli")]
#[command(about = "Operator CLI for the uptime poller", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the targets currently in the store
    Targets,
    /// Probe a single URL once
    Probe {
        /// URL to GET.
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init("warn");

    match cli.command {
        Commands::Targets => {
            let store = MySqlTargetStore::connect(&config.store).await?;
            let targets = store.load_targets().await?;
            println!("{}", serde_json::to_string_pretty(&targets)?);
        }
        Commands::Probe { url } => {
            let transport = Arc::new(HttpTransport::new()?);
            let executor = ProbeExecutor::new(transport, config.poller.probe_timeout());
            let result = executor.run(&Target::new(0, url)).await;

            match result.outcome {
                ProbeOutcome::Success {
                    status,
                    body_size,
                    latency,
                } => println!(
                    "{} - status: {}, size: {} bytes, time: {:?}",
                    result.address, status, body_size, latency
                ),
                ProbeOutcome::TransportError(e) => {
                    eprintln!("{} - unreachable: {}", result.address, e)
                }
                ProbeOutcome::ReadError(e) => {
                    eprintln!("{} - failed to read body: {}", result.address, e)
                }
            }
        }
    }

    Ok(())
}
