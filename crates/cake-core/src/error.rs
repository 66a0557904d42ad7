//! # Error Types
//!
//! Domain-specific error types for cake-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cake-core errors (this file)                                          │
//! │  ├── CoreError        - Settings edits that cannot be applied          │
//! │  ├── ValidationError  - Input / table validation failures              │
//! │  └── ShareError       - Share link construction                        │
//! │                                                                         │
//! │  cake-store errors (separate crate)                                    │
//! │  └── StoreError       - Key-value storage failures                     │
//! │                                                                         │
//! │  cake-quote errors (in app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! Quoting is total. Stale selection keys price at zero, malformed counts
//! coerce to zero, and a bad persisted blob falls back to the defaults.
//! The errors below only come out of the settings edit surface.

use thiserror::Error;

use crate::types::Category;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by price table edits.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The option being edited is not in the table.
    ///
    /// ## When This Occurs
    /// - Renaming a flavor that another edit already renamed
    /// - Setting a price on a removed pan size
    #[error("{category} not found: {key}")]
    OptionNotFound { category: Category, key: String },

    /// The misc item id is not in the table.
    #[error("Misc item not found: {0}")]
    MiscItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Price is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Duplicate value (e.g., two flavors with the same label).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Share Error
// =============================================================================

/// Errors building a share link.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The configured base URL does not parse.
    #[error("Invalid share base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL cannot carry a query (e.g. `mailto:`).
    #[error("Share base URL cannot carry a query: {0}")]
    CannotBeABase(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OptionNotFound {
            category: Category::Flavor,
            key: "Pistachio".to_string(),
        };
        assert_eq!(err.to_string(), "Flavor not found: Pistachio");

        let err = CoreError::MiscItemNotFound("misc9".to_string());
        assert_eq!(err.to_string(), "Misc item not found: misc9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "label".to_string(),
        };
        assert_eq!(err.to_string(), "label is required");

        let err = ValidationError::Duplicate {
            field: "Shape".to_string(),
            value: "Heart".to_string(),
        };
        assert_eq!(err.to_string(), "Shape 'Heart' already exists");

        let err = ValidationError::TooLong {
            field: "Misc item name".to_string(),
            max: 80,
        };
        assert_eq!(err.to_string(), "Misc item name must be at most 80 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
