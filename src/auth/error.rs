use thiserror::Error;

use crate::api::ApiError;
use crate::error::PeptideError;
use crate::storage::StorageError;

use super::method::MfaMethod;

/// Errors raised by login and MFA flows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("A verification attempt is already in flight")]
    AttemptInFlight,
    #[error("Verification cancelled")]
    Cancelled,
    #[error("{0} is not an allowed verification method for this ticket")]
    MethodNotAllowed(MfaMethod),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AuthError> for PeptideError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Api(err) => PeptideError::Api(err),
            AuthError::Storage(err) => PeptideError::Storage(err),
            AuthError::Cancelled => PeptideError::Cancelled,
            other => PeptideError::Authentication(other.to_string()),
        }
    }
}
