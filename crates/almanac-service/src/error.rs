use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] almanac_store::StoreError),

    #[error(transparent)]
    EngineError(#[from] almanac_engine::error::EngineError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Stored event {id} is unreadable: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("Notification dispatch failed: {0}")]
    DispatchError(String),
}

impl ServiceError {
    /// Storage failures the caller may retry. The service itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::StoreError(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
