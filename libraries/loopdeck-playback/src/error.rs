//! Error types for slide playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Jump input that is not a decimal digit
    #[error("Invalid jump digit: {0}")]
    InvalidDigit(u8),

    /// Instance id string that does not match any known shape
    #[error("Invalid slide instance id: {0}")]
    InvalidInstanceId(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
