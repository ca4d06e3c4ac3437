/// Player error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] loopdeck_core::LoopdeckError),

    #[error("Sync error: {0}")]
    Sync(#[from] loopdeck_sync::SyncError),

    #[error("Storage error: {0}")]
    Storage(#[from] loopdeck_storage::StorageError),
}
