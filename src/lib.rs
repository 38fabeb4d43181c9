use std::path::Path;
use std::sync::Arc;

use actix::prelude::{Actor, Addr};

use crate::domain::clock_service::ClockService;
use crate::domain::clock_service::config::ClockServiceConfig;
use crate::domain::snapshot_store::SnapshotStore;
use crate::error::Result;
use crate::loader::parser::{load_config, load_dag};

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

pub use crate::domain::clock_service::error::ClockServiceError;
pub use crate::domain::clock_service::messages::{ClockUpdated, GetLatestMinClock, LatestMinClock, Shutdown, UpdateClock};
pub use crate::domain::dag::{DagDescriptor, TaskId};
pub use crate::domain::utils::time_stamp::TimeStamp;

/// Loads the DAG (and optional settings) from JSON files and starts a [`ClockService`]
/// on the current actix arbiter.
pub fn start_clock_service(
    dag_path: impl AsRef<Path>,
    config_path: Option<&Path>,
    store: Arc<dyn SnapshotStore>,
) -> Result<Addr<ClockService>> {
    let dag = load_dag(dag_path)?;
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => ClockServiceConfig::default(),
    };
    log::info!("Starting clock service with {:?}.", config);

    Ok(ClockService::new(dag, store, config).start())
}
