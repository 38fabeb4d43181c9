mod file_store;
mod in_memory;

pub use file_store::FileSnapshotStore;
pub use in_memory::InMemorySnapshotStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::utils::time_stamp::TimeStamp;

/// Key under which the global minimum clock is persisted.
pub const START_CLOCK_KEY: &str = "startClock";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Snapshot store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot store content could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value store the coordinator recovers from and snapshots to.
///
/// An absent key is `Ok(None)`, never an error.
#[async_trait]
pub trait SnapshotStore: std::fmt::Debug + Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<TimeStamp>, StoreError>;

    async fn put(&self, key: &str, value: TimeStamp) -> Result<(), StoreError>;
}
