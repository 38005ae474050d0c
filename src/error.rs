//! Error types for the codex gateway
//!
//! Three layers, all built with thiserror:
//! - [`CodexError`]: what API callers see, mapped to HTTP statuses.
//! - [`BackendError`]: the remote weapon service contract.
//! - [`CacheError`]: cache backend failures. These are logged and swallowed
//!   by the weapon store and never reach a caller of a weapon operation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::cache::keys::region_names;
use crate::models::ErrorResponse;

// == Codex Error Enum ==
/// Unified error type for weapon operations and the HTTP surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodexError {
    /// Weapon absent in the backend
    #[error("Weapon not found: {0}")]
    NotFound(Uuid),

    /// Another weapon already uses this name
    #[error("Weapon already exists: {0}")]
    AlreadyExists(String),

    /// Input violates a domain constraint
    #[error("Invalid {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Remote weapon service unreachable or timed out
    #[error("Weapon service unavailable: {0}")]
    BackendUnavailable(String),

    /// Remote weapon service answered with an unexpected fault
    #[error("Weapon service error: {0}")]
    Backend(String),

    /// Unknown cache region on the management endpoints
    #[error("Cache region not found: {0}")]
    UnknownCacheRegion(String),

    /// Cache backend failed during an explicit management operation
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),
}

impl CodexError {
    /// Shorthand for a validation failure on a single field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CodexError::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status and stable error code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            CodexError::NotFound(_) => (StatusCode::NOT_FOUND, "WEAPON_NOT_FOUND"),
            CodexError::AlreadyExists(_) => (StatusCode::CONFLICT, "WEAPON_ALREADY_EXISTS"),
            CodexError::ValidationFailed { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CodexError::BackendUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "SERVICE_UNAVAILABLE")
            }
            CodexError::Backend(_) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
            CodexError::UnknownCacheRegion(_) => (StatusCode::NOT_FOUND, "CACHE_NOT_FOUND"),
            CodexError::CacheUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "CACHE_UNAVAILABLE")
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CodexError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let mut body = ErrorResponse::new(status.as_u16(), code, self.to_string());
        match &self {
            CodexError::ValidationFailed { field, reason } => {
                body = body.with_detail(field.clone(), reason.clone());
            }
            CodexError::UnknownCacheRegion(_) => {
                body = body.with_detail("availableCaches", region_names().join(", "));
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

// == Backend Error Enum ==
/// Errors raised by a remote weapon backend.
///
/// Domain outcomes (`NotFound`, `AlreadyExists`, `Rejected`) are kept apart
/// from transport failures (`Unavailable`) so callers never retry a domain
/// answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("weapon {0} not found")]
    NotFound(Uuid),

    #[error("weapon named '{0}' already exists")]
    AlreadyExists(String),

    /// The service refused the input (validation fault)
    #[error("rejected by weapon service: {0}")]
    Rejected(String),

    /// Connection refused, reset, or timed out
    #[error("weapon service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure reported by the service
    #[error("weapon service fault: {0}")]
    Fault(String),
}

impl From<BackendError> for CodexError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(id) => CodexError::NotFound(id),
            BackendError::AlreadyExists(name) => CodexError::AlreadyExists(name),
            BackendError::Rejected(reason) => CodexError::validation("weapon", reason),
            BackendError::Unavailable(msg) => CodexError::BackendUnavailable(msg),
            BackendError::Fault(msg) => CodexError::Backend(msg),
        }
    }
}

// == Cache Error Enum ==
/// Errors raised by a cache backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key exceeds the backend's key length limit
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Value exceeds the backend's size limit
    #[error("Value too large: {0}")]
    ValueTooLarge(String),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Connection to the cache was lost
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

impl From<CacheError> for CodexError {
    fn from(err: CacheError) -> Self {
        CodexError::CacheUnavailable(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for weapon operations.
pub type Result<T> = std::result::Result<T, CodexError>;
