//! JSON backup and restore of a stored deck
//!
//! A backup is a single pretty-printed JSON document:
//!
//! ```json
//! {
//!   "metadata": { "backupDate": "...", "backupVersion": 12, "totalSlides": 9, "projectKey": "default" },
//!   "record": { "slides": [...], "settings": {...}, "version": 12, "updatedAt": "..." }
//! }
//! ```
//!
//! Restoring writes through [`PersistenceStore::save`], so the store assigns
//! a fresh version above the current one instead of reusing the backed-up
//! version.

use crate::error::Result;
use crate::StorageError;
use chrono::{DateTime, Utc};
use loopdeck_core::types::{DeckDraft, DeckRecord, ProjectKey, SavedVersion};
use loopdeck_core::PersistenceStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Author recorded on writes made by a restore
pub const RESTORE_AUTHOR: &str = "restore";

/// Summary stored alongside the backed-up record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub backup_date: DateTime<Utc>,

    /// Store version of the record at backup time
    pub backup_version: u64,

    pub total_slides: usize,

    pub project_key: ProjectKey,
}

/// A backup file's contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckBackup {
    pub metadata: BackupMetadata,
    pub record: DeckRecord,
}

impl DeckBackup {
    /// Wrap `record` with freshly stamped metadata
    pub fn new(key: &ProjectKey, record: DeckRecord) -> Self {
        Self {
            metadata: BackupMetadata {
                backup_date: Utc::now(),
                backup_version: record.version,
                total_slides: record.slides.len(),
                project_key: key.clone(),
            },
            record,
        }
    }

    /// Read and parse a backup file
    pub async fn read(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        let backup: Self = serde_json::from_str(&json)?;

        if backup.metadata.total_slides != backup.record.slides.len() {
            return Err(StorageError::UnsupportedBackup(format!(
                "metadata lists {} slides, record holds {}",
                backup.metadata.total_slides,
                backup.record.slides.len()
            )));
        }
        Ok(backup)
    }

    /// Write the backup as pretty-printed JSON
    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Export the record stored under `key` to `path`
pub async fn export_backup<P>(store: &P, key: &ProjectKey, path: &Path) -> Result<DeckBackup>
where
    P: PersistenceStore + ?Sized,
{
    let record = store
        .load(key)
        .await?
        .ok_or_else(|| StorageError::not_found("Deck", key.as_str()))?;

    let backup = DeckBackup::new(key, record);
    backup.write(path).await?;

    info!(
        key = %key,
        version = backup.metadata.backup_version,
        slides = backup.metadata.total_slides,
        path = %path.display(),
        "Exported deck backup"
    );
    Ok(backup)
}

/// Restore the backup at `path` over the record stored under `key`
///
/// `key` may differ from the key the backup was taken from.
pub async fn restore_backup<P>(store: &P, key: &ProjectKey, path: &Path) -> Result<SavedVersion>
where
    P: PersistenceStore + ?Sized,
{
    let backup = DeckBackup::read(path).await?;
    let draft = DeckDraft::new(&backup.record.slides, &backup.record.settings)
        .with_author(RESTORE_AUTHOR);
    let saved = store.save(key, &draft).await?;

    info!(
        key = %key,
        from_version = backup.metadata.backup_version,
        version = saved.version,
        slides = draft.slides.len(),
        "Restored deck backup"
    );
    Ok(saved)
}
