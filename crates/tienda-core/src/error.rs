//! Shared error type across Tienda crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No authenticated user, or the user could not be resolved.
    AuthFailed,
    /// Not allowed by policy.
    NotAllowed,
    /// Referenced record does not exist.
    NotFound,
    /// Uniqueness violation.
    Conflict,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TiendaError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TiendaError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TiendaError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TiendaError::BadRequest(_) => ClientCode::BadRequest,
            TiendaError::AuthFailed => ClientCode::AuthFailed,
            TiendaError::NotAllowed(_) => ClientCode::NotAllowed,
            TiendaError::NotFound(_) => ClientCode::NotFound,
            TiendaError::Conflict(_) => ClientCode::Conflict,
            TiendaError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TiendaError::Internal(_) => ClientCode::Internal,
        }
    }
}
