use thiserror::Error;
use validator::ValidationErrors;

use crate::api::ApiError;

/// Errors returned by games store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The request was rejected before reaching the backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<ValidationErrors> for StoreError {
    fn from(err: ValidationErrors) -> Self {
        StoreError::InvalidInput(format!("validation failed: {}", err))
    }
}

impl StoreError {
    /// The game is already in the library.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Api(err) if err.is_conflict())
    }

    /// The targeted game does not exist on the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Api(err) if err.is_not_found())
    }

    /// The user must sign in (again) before retrying.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Api(err) if err.is_unauthorized())
    }
}
