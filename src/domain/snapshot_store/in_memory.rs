use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{SnapshotStore, StoreError};
use crate::domain::utils::time_stamp::TimeStamp;

#[derive(Debug, Default)]
struct InMemoryState {
    values: HashMap<String, TimeStamp>,
    fail_reads: bool,
    fail_writes: bool,
    read_delay: Option<Duration>,
    writes: usize,
}

/// Process-local store. Clones share the same contents, so a test can keep a handle
/// while the coordinator owns another one.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: TimeStamp) -> Self {
        let store = Self::new();
        store.lock().values.insert(key.to_string(), value);
        store
    }

    /// Reads the current value without going through the async interface.
    pub fn value(&self, key: &str) -> Option<TimeStamp> {
        self.lock().values.get(key).copied()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Makes every subsequent `get` wait this long before answering.
    pub fn set_read_delay(&self, delay: Option<Duration>) {
        self.lock().read_delay = delay;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        // A poisoned lock only means a test panicked mid-write; the map itself is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<TimeStamp>, StoreError> {
        let delay = self.lock().read_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.lock();
        if state.fail_reads {
            return Err(StoreError::Unavailable(format!("read of '{}' rejected", key)));
        }
        Ok(state.values.get(key).copied())
    }

    async fn put(&self, key: &str, value: TimeStamp) -> Result<(), StoreError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::Unavailable(format!("write of '{}' rejected", key)));
        }
        state.values.insert(key.to_string(), value);
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_reads_as_none() {
        let store = InMemorySnapshotStore::new();
        assert_eq!(store.get("startClock").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemorySnapshotStore::new();
        store.put("startClock", 150).await.unwrap();
        assert_eq!(store.get("startClock").await.unwrap(), Some(150));
        assert_eq!(store.clone().value("startClock"), Some(150));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = InMemorySnapshotStore::with_value("startClock", 7);
        store.set_fail_reads(true);
        store.set_fail_writes(true);

        assert!(matches!(store.get("startClock").await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.put("startClock", 8).await, Err(StoreError::Unavailable(_))));
        assert_eq!(store.value("startClock"), Some(7));
        assert_eq!(store.write_count(), 0);
    }
}
