use almanac_service::ServiceError;
use almanac_store::StoreError;
use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    EngineError(#[from] almanac_engine::error::EngineError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub retryable: bool,
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::EngineError(_)
            | Self::ServiceError(ServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::ServiceError(
                ServiceError::NotFound(_) | ServiceError::StoreError(StoreError::NotFound(_)),
            ) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::StoreError(StoreError::AlreadyExists(_))) => {
                StatusCode::CONFLICT
            }
            Self::ServiceError(ServiceError::CorruptRecord { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::ServiceError(e) if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::ServiceError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ServiceError(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// ## Summary
    /// Writes the error as a JSON body with the matching status code.
    ///
    /// Server-side failures are logged and reported with a generic message.
    pub fn render(&self, res: &mut salvo::Response) {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, %status, "Request failed");
            if self.is_retryable() {
                "Storage unavailable, try again".to_string()
            } else {
                "Internal server error".to_string()
            }
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse {
            error,
            retryable: self.is_retryable(),
        }));
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
