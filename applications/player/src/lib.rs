//! LoopDeck Player Library
//!
//! Headless booth player: loads the shared deck, plays it on a loop, and
//! follows changes published by editors.
//!
//! This library exposes the session pieces for testing purposes.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;

// Re-export commonly used types for convenience
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use scheduler::TokioScheduler;
pub use session::PlayerSession;

use loopdeck_storage::SqliteStore;

/// Open the configured database and apply migrations
pub async fn open_store(config: &PlayerConfig) -> Result<SqliteStore> {
    let pool = loopdeck_storage::create_pool(&config.storage.database_url).await?;
    loopdeck_storage::run_migrations(&pool).await?;
    Ok(SqliteStore::new(pool))
}
