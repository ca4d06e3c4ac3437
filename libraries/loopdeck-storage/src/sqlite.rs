//! `SQLite`-backed persistence store
//!
//! Change notifications are in-process only: every write made through this
//! store (or a clone of it) is broadcast to its subscribers. Writes from other
//! processes sharing the database file are picked up on the next load.

use crate::channels::ChangeChannels;
use crate::decks;
use async_trait::async_trait;
use loopdeck_core::types::{DeckDraft, DeckRecord, ProjectKey, RemoteChange, SavedVersion};
use loopdeck_core::{ChangeStream, PersistenceStore, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Persistence store over the `deck_records` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    channels: ChangeChannels,
}

impl SqliteStore {
    /// Wrap a pool whose migrations have already run
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            channels: ChangeChannels::default(),
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PersistenceStore for SqliteStore {
    async fn load(&self, key: &ProjectKey) -> Result<Option<DeckRecord>> {
        Ok(decks::get(&self.pool, key).await?)
    }

    async fn save(&self, key: &ProjectKey, draft: &DeckDraft) -> Result<SavedVersion> {
        let saved = decks::upsert(&self.pool, key, draft).await?;
        debug!(key = %key, version = saved.version, "Stored deck record");

        self.channels.publish(
            key,
            RemoteChange {
                slides: Some(draft.slides.clone()),
                settings: Some(draft.settings.clone().into()),
                version: saved.version,
                updated_at: saved.updated_at,
            },
        );
        Ok(saved)
    }

    fn subscribe(&self, key: &ProjectKey) -> Result<ChangeStream> {
        Ok(self.channels.subscribe(key))
    }
}
