//! Deck record queries

use crate::error::Result;
use crate::StorageError;
use chrono::{DateTime, Utc};
use loopdeck_core::types::{DeckDraft, DeckRecord, ProjectKey, SavedVersion, Settings};
use sqlx::{Row, SqlitePool};

fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(StorageError::InvalidTimestamp(millis))
}

fn version(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or_default()
}

/// Get the record stored under `key`
///
/// Rows written without settings load with default settings.
pub async fn get(pool: &SqlitePool, key: &ProjectKey) -> Result<Option<DeckRecord>> {
    let row = sqlx::query(
        "SELECT slides_json, settings_json, version, updated_at
         FROM deck_records WHERE project_key = ?",
    )
    .bind(key.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let slides_json: String = row.try_get("slides_json")?;
    let settings_json: Option<String> = row.try_get("settings_json")?;
    let settings = match settings_json {
        Some(json) => serde_json::from_str(&json)?,
        None => Settings::default(),
    };

    Ok(Some(DeckRecord {
        slides: serde_json::from_str(&slides_json)?,
        settings,
        version: version(row.try_get("version")?),
        updated_at: timestamp(row.try_get("updated_at")?)?,
    }))
}

/// Insert or overwrite the record under `key`
///
/// The version starts at 1 and is bumped inside the same statement, so
/// concurrent writers always get distinct versions.
pub async fn upsert(pool: &SqlitePool, key: &ProjectKey, draft: &DeckDraft) -> Result<SavedVersion> {
    let slides_json = serde_json::to_string(&draft.slides)?;
    let settings_json = serde_json::to_string(&draft.settings)?;
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query(
        "INSERT INTO deck_records
         (project_key, slides_json, settings_json, version, updated_at, updated_by)
         VALUES (?, ?, ?, 1, ?, ?)
         ON CONFLICT(project_key)
         DO UPDATE SET
            slides_json = excluded.slides_json,
            settings_json = excluded.settings_json,
            version = deck_records.version + 1,
            updated_at = excluded.updated_at,
            updated_by = excluded.updated_by
         RETURNING version, updated_at",
    )
    .bind(key.as_str())
    .bind(slides_json)
    .bind(settings_json)
    .bind(now)
    .bind(draft.updated_by.as_str())
    .fetch_one(pool)
    .await?;

    Ok(SavedVersion {
        version: version(row.try_get("version")?),
        updated_at: timestamp(row.try_get("updated_at")?)?,
    })
}

/// Author of the last write under `key`
pub async fn updated_by(pool: &SqlitePool, key: &ProjectKey) -> Result<Option<String>> {
    let author: Option<String> =
        sqlx::query_scalar("SELECT updated_by FROM deck_records WHERE project_key = ?")
            .bind(key.as_str())
            .fetch_optional(pool)
            .await?;
    Ok(author)
}

/// All stored project keys, sorted
pub async fn list_keys(pool: &SqlitePool) -> Result<Vec<ProjectKey>> {
    let keys: Vec<String> =
        sqlx::query_scalar("SELECT project_key FROM deck_records ORDER BY project_key")
            .fetch_all(pool)
            .await?;
    Ok(keys.into_iter().map(ProjectKey::new).collect())
}
