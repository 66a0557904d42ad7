//! # API Error Types
//!
//! The error every command returns, serializable so `--json` output and a
//! future web front end see the same shape.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError  (rename to a duplicate label, negative price, ...)         │
//! │  StoreError (disk full, permissions)                                   │
//! │  ShareError (bad share_base_url)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { code, message } ← THIS MODULE                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CLI prints message (or JSON) and exits non-zero                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use cake_core::{CoreError, ShareError, ValidationError};
use cake_store::StoreError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Flavor 'Lemon' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Option or misc item not in the price table
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Reading or writing the store failed
    StorageError,

    /// Share link could not be built
    ShareError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OptionNotFound { category, key } => {
                ApiError::not_found(&category.to_string(), &key)
            }
            CoreError::MiscItemNotFound(id) => ApiError::not_found("Misc item", &id),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StorageUnavailable(reason) => {
                ApiError::new(ErrorCode::StorageError, format!("Storage unavailable: {}", reason))
            }
            StoreError::Io { path, source } => {
                // Log the OS error, show the path
                tracing::error!(path = %path.display(), error = %source, "Store I/O failed");
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Could not write {}", path.display()),
                )
            }
            StoreError::Serialization(e) => {
                tracing::error!("Store serialization failed: {}", e);
                ApiError::internal("Could not serialize price table")
            }
        }
    }
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        ApiError::new(ErrorCode::ShareError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
