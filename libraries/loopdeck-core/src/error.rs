/// Core error types for LoopDeck
use thiserror::Error;

/// Result type alias using `LoopdeckError`
pub type Result<T> = std::result::Result<T, LoopdeckError>;

/// Core error type for LoopDeck
#[derive(Error, Debug)]
pub enum LoopdeckError {
    /// Persistence store errors (unreachable backend, failed write)
    #[error("Store error: {0}")]
    Store(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

impl LoopdeckError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
