use thiserror::Error;

/// Errors raised while converting stored records into engine events.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Record has no identifier")]
    MissingId,
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
