/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored JSON could not be read back, or a record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored timestamp out of range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Backup file from an unsupported format
    #[error("Unsupported backup: {0}")]
    UnsupportedBackup(String),

    /// Error raised by a persistence store
    #[error(transparent)]
    Store(#[from] loopdeck_core::LoopdeckError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for loopdeck_core::LoopdeckError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Store(inner) => inner,
            StorageError::NotFound { entity, id } => Self::not_found(entity, id),
            other => Self::store(other.to_string()),
        }
    }
}
