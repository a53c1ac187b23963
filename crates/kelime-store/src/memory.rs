//! In-memory progress store for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use kelime_core::model::ProgressRecord;
use kelime_core::store::{ProgressStore, StoreError, WordChange};

/// A progress store that lives entirely in memory.
///
/// Records every persist and can be told to fail, which makes it useful
/// for exercising degraded-persistence paths without a server.
pub struct MemoryStore {
    record: Mutex<ProgressRecord>,
    last_change: Mutex<Option<WordChange>>,
    hydrate_count: AtomicU32,
    persist_count: AtomicU32,
    fail_persists: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store (defaults on first hydrate).
    pub fn new() -> Self {
        Self::with_record(ProgressRecord::default())
    }

    /// Create a store seeded with an existing record.
    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: Mutex::new(record),
            last_change: Mutex::new(None),
            hydrate_count: AtomicU32::new(0),
            persist_count: AtomicU32::new(0),
            fail_persists: AtomicBool::new(false),
        }
    }

    /// While set, every persist fails with a network error.
    pub fn set_fail_persists(&self, fail: bool) {
        self.fail_persists.store(fail, Ordering::Relaxed);
    }

    /// The record as last persisted (or seeded).
    pub fn record(&self) -> ProgressRecord {
        self.record.lock().unwrap().clone()
    }

    /// The word change from the most recent persist.
    pub fn last_change(&self) -> Option<WordChange> {
        self.last_change.lock().unwrap().clone()
    }

    pub fn hydrate_count(&self) -> u32 {
        self.hydrate_count.load(Ordering::Relaxed)
    }

    pub fn persist_count(&self) -> u32 {
        self.persist_count.load(Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn hydrate(&self) -> Result<ProgressRecord, StoreError> {
        self.hydrate_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.record.lock().unwrap().clone())
    }

    async fn persist(
        &self,
        record: &ProgressRecord,
        change: Option<&WordChange>,
    ) -> Result<(), StoreError> {
        if self.fail_persists.load(Ordering::Relaxed) {
            return Err(StoreError::Network("memory store told to fail".into()));
        }
        self.persist_count.fetch_add(1, Ordering::Relaxed);
        *self.record.lock().unwrap() = record.clone();
        *self.last_change.lock().unwrap() = change.cloned();
        Ok(())
    }
}
