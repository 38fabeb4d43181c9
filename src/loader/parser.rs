use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::api::config_dto::ClockServiceConfigDto;
use crate::api::dag_dto::DagDto;
use crate::domain::clock_service::config::ClockServiceConfig;
use crate::domain::dag::DagDescriptor;
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Loads and validates the DAG topology.
pub fn load_dag(file_path: impl AsRef<Path>) -> Result<DagDescriptor> {
    let file_path = file_path.as_ref();
    let dto: DagDto = parse_json_file(file_path)?;
    let dag = DagDescriptor::try_from(dto)?;
    log::info!("Loaded DAG with {} task groups from '{}'.", dag.len(), file_path.display());
    Ok(dag)
}

/// Loads the clock service settings, filling omitted fields with defaults.
pub fn load_config(file_path: impl AsRef<Path>) -> Result<ClockServiceConfig> {
    let dto: ClockServiceConfigDto = parse_json_file(file_path)?;
    ClockServiceConfig::try_from(dto)
}
