use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use watermark_coordinator::domain::snapshot_store::FileSnapshotStore;
use watermark_coordinator::{Shutdown, logger, start_clock_service};

/// Runs a standalone clock service that keeps the global min clock of a DAG and
/// snapshots it to a JSON file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// DAG descriptor, e.g. `{"taskGroups": [{"id": "source", "parallelism": 2}]}`
    #[arg(long)]
    dag: PathBuf,

    /// Optional service settings (intervals, store key, recovery timeout).
    #[arg(long)]
    config: Option<PathBuf>,

    /// File the global min clock is persisted to.
    #[arg(long, default_value = "snapshot.json")]
    store: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let system = actix::System::new();
    system.block_on(async {
        let store = Arc::new(FileSnapshotStore::new(&args.store));
        let service = start_clock_service(&args.dag, args.config.as_deref(), store)
            .with_context(|| format!("failed to start clock service for '{}'", args.dag.display()))?;

        tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
        log::info!("Ctrl-C received, shutting down.");

        service.send(Shutdown).await.context("clock service already stopped")?;
        anyhow::Ok(())
    })
}
