//! Error types raised by the backend API client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::AuthError;

/// Convenient result alias returning [`ApiError`] failures.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that can occur while talking to the game-tracker backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// The configured backend URL cannot be used as a base for API paths.
    #[error("invalid backend URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// No ID token could be obtained for the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The request could not be sent or the connection dropped.
    #[error("failed to send request to `{path}`")]
    RequestSend {
        /// API path the request targeted.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    ///
    /// `message` is either the response body or a fixed description of the failed
    /// operation, depending on the endpoint.
    #[error("{message}")]
    RequestStatus {
        /// API path the request targeted.
        path: String,
        /// Status code returned by the backend.
        status: StatusCode,
        /// Human-readable failure description.
        message: String,
    },
    /// Response payload could not be decoded.
    #[error("failed to decode response for `{path}`")]
    DecodeResponse {
        /// API path the request targeted.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status returned by the backend, when the failure came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The game already exists in the library (duplicate catalogue id).
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    /// The targeted game does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Nobody is signed in, or the backend rejected the token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Auth(_))
            || matches!(
                self.status(),
                Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
            )
    }
}
