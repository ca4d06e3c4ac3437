//! In-process persistence store
//!
//! Backs tests and single-process demos. Clones share one record table, so
//! two engines built from clones of the same store behave like two editors
//! talking to one backend.

use crate::channels::ChangeChannels;
use async_trait::async_trait;
use chrono::Utc;
use loopdeck_core::types::{DeckDraft, DeckRecord, ProjectKey, RemoteChange, SavedVersion};
use loopdeck_core::{ChangeStream, LoopdeckError, PersistenceStore, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryInner {
    records: HashMap<ProjectKey, DeckRecord>,
    authors: HashMap<ProjectKey, String>,
    saves: usize,
    fail_saves: usize,
    fail_loads: bool,
}

/// Shared in-memory store with failure injection
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
    channels: ChangeChannels,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored record for `key`, if any
    pub fn record(&self, key: &ProjectKey) -> Option<DeckRecord> {
        self.lock().records.get(key).cloned()
    }

    /// Seed a record directly, without bumping the version or notifying
    pub fn insert(&self, key: ProjectKey, record: DeckRecord) {
        self.lock().records.insert(key, record);
    }

    /// Author of the last successful write for `key`
    pub fn last_author(&self, key: &ProjectKey) -> Option<String> {
        self.lock().authors.get(key).cloned()
    }

    /// Number of successful writes across all keys
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Make the next `count` saves fail
    pub fn fail_next_saves(&self, count: usize) {
        self.lock().fail_saves = count;
    }

    /// Make every load fail until switched back off
    pub fn fail_loads(&self, fail: bool) {
        self.lock().fail_loads = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn load(&self, key: &ProjectKey) -> Result<Option<DeckRecord>> {
        let inner = self.lock();
        if inner.fail_loads {
            return Err(LoopdeckError::store("memory store unavailable"));
        }
        Ok(inner.records.get(key).cloned())
    }

    async fn save(&self, key: &ProjectKey, draft: &DeckDraft) -> Result<SavedVersion> {
        let record = {
            let mut inner = self.lock();
            if inner.fail_saves > 0 {
                inner.fail_saves -= 1;
                return Err(LoopdeckError::store("injected save failure"));
            }

            let version = inner.records.get(key).map_or(1, |record| record.version + 1);
            let record = DeckRecord {
                slides: draft.slides.clone(),
                settings: draft.settings.clone(),
                version,
                updated_at: Utc::now(),
            };
            inner.records.insert(key.clone(), record.clone());
            inner.authors.insert(key.clone(), draft.updated_by.clone());
            inner.saves += 1;
            record
        };

        let saved = SavedVersion {
            version: record.version,
            updated_at: record.updated_at,
        };
        self.channels.publish(key, RemoteChange::from(record));
        Ok(saved)
    }

    fn subscribe(&self, key: &ProjectKey) -> Result<ChangeStream> {
        Ok(self.channels.subscribe(key))
    }
}
