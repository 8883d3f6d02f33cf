use thiserror::Error;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Event already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the caller may reasonably try the same operation again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::IoError(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
