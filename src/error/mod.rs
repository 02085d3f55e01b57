//! Error types for Peptide.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Storage,
    Configuration,
    Serialization,
    Unknown,
}

/// Primary error type for all Peptide operations.
#[derive(Error, Debug)]
pub enum PeptideError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cancelled")]
    Cancelled,
}

impl PeptideError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) | Self::NotLoggedIn => ErrorCategory::Authentication,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Storage(_) => ErrorCategory::Storage,
            Self::Api(err) => match err {
                ApiError::Network(_) => ErrorCategory::Network,
                ApiError::Decode(_) => ErrorCategory::Serialization,
                ApiError::Typed { status, .. } | ApiError::Status { status, .. } => {
                    match status {
                        401 | 403 => ErrorCategory::Authentication,
                        429 => ErrorCategory::RateLimit,
                        500..=599 => ErrorCategory::Server,
                        _ => ErrorCategory::Api,
                    }
                }
                ApiError::MissingSession => ErrorCategory::Authentication,
            },
            _ => ErrorCategory::Unknown,
        }
    }

    /// Whether retrying the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PeptideError>;
