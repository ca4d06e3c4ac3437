use loopdeck_core::LoopdeckError;
use thiserror::Error;

/// Errors that can occur during sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] LoopdeckError),

    #[error("Save failed for {key}: {source}")]
    SaveFailed {
        key: String,
        #[source]
        source: LoopdeckError,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
