//! Error Types
//!
//! Typed errors at the API, session and storage seams. Screens turn these
//! into the fixed human-readable messages they display.

use thiserror::Error;

/// Errors returned by a records or auth API implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Transport(String),

    /// 401 / 403
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// The API answered `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Whether the server refused the caller's identity
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized | ApiError::Rejected(_) | ApiError::Status { status: 400, .. }
        )
    }
}

/// Errors from the token storage backends
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Token storage unavailable")]
    Unavailable,

    #[error("Token storage IO error: {0}")]
    Io(String),
}

/// Errors from session store actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("No token found")]
    NoToken,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;
