//! LoopDeck Storage
//!
//! Persistence stores for the shared deck record.
//!
//! This crate provides:
//! - [`MemoryStore`]: in-process store with failure injection, for tests
//! - [`SqliteStore`]: `SQLite` store over the `deck_records` table
//! - JSON backup and restore through any [`PersistenceStore`](loopdeck_core::PersistenceStore)
//!
//! # Example
//!
//! ```rust,no_run
//! use loopdeck_core::{types::ProjectKey, PersistenceStore};
//! use loopdeck_storage::{create_pool, run_migrations, SqliteStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://loopdeck.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! let record = store.load(&ProjectKey::default()).await?;
//! # Ok(())
//! # }
//! ```

mod channels;
mod error;
mod memory;
mod sqlite;

pub mod backup;
pub mod decks;

pub use backup::{export_backup, restore_backup, BackupMetadata, DeckBackup};
pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://loopdeck.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
