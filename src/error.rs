use crate::domain::envelope::{ErrorBody, ErrorCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MissingParam(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// A timeout reported by a remote envelope, with its message.
    #[error("{0}")]
    TimedOut(String),
    #[error("Invalid wizard state: {0}")]
    InvalidState(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl MarketError {
    /// The envelope code this error is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            MarketError::ValidationError(_) | MarketError::InvalidState(_) => {
                ErrorCode::ValidationError
            }
            MarketError::NotFound(_) => ErrorCode::NotFound,
            MarketError::MissingParam(_) => ErrorCode::MissingParam,
            MarketError::NetworkError(_) => ErrorCode::NetworkError,
            MarketError::Timeout(_) | MarketError::TimedOut(_) => ErrorCode::Timeout,
            MarketError::SerializationError(_)
            | MarketError::CsvError(_)
            | MarketError::IoError(_)
            | MarketError::InternalError(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ErrorBody> for MarketError {
    fn from(body: ErrorBody) -> Self {
        match body.code {
            ErrorCode::NotFound => MarketError::NotFound(body.message),
            ErrorCode::MissingParam => MarketError::MissingParam(body.message),
            ErrorCode::ValidationError => MarketError::ValidationError(body.message),
            ErrorCode::NetworkError => MarketError::NetworkError(body.message),
            ErrorCode::Timeout => MarketError::TimedOut(body.message),
            ErrorCode::InternalError => {
                MarketError::InternalError(Box::new(std::io::Error::other(body.message)))
            }
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for MarketError {
    fn from(err: rocksdb::Error) -> Self {
        MarketError::InternalError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
