use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{SnapshotStore, StoreError};
use crate::domain::utils::time_stamp::TimeStamp;

/// Stores all keys in one JSON object on disk, e.g. `{"startClock": 150}`.
///
/// A missing file reads as an empty store. Writes go to a sibling temp file which is
/// then renamed over the target, so a crash mid-write keeps the previous snapshot.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the next snapshot is staged in, e.g. `snapshot.json.tmp`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn read_all(&self) -> Result<BTreeMap<String, TimeStamp>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<TimeStamp>, StoreError> {
        Ok(self.read_all().await?.get(key).copied())
    }

    async fn put(&self, key: &str, value: TimeStamp) -> Result<(), StoreError> {
        // Serialize read-modify-write cycles of overlapping snapshots.
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value);

        let staging_path = self.staging_path();
        tokio::fs::write(&staging_path, serde_json::to_vec_pretty(&values)?).await?;
        tokio::fs::rename(&staging_path, &self.path).await?;
        Ok(())
    }
}
