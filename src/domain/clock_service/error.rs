use std::time::Duration;

use thiserror::Error;

use crate::domain::clock_registry::RegistryError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Recovering the start clock failed: {0}")]
    RecoveryFailed(String),

    #[error("Recovering the start clock did not finish within {0:?}")]
    RecoveryTimedOut(Duration),

    #[error("Clock service stopped before the request was answered")]
    ServiceStopped,
}
