//! # Error Types
//!
//! Domain-specific error types for school-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  school-core errors (this file)                                        │
//! │  ├── CoreError        - Boundary parsing failures                      │
//! │  └── ValidationError  - Discount form field failures                   │
//! │                                                                         │
//! │  school-console errors (separate crate)                                │
//! │  └── ConsoleError     - Config loading / validation                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConsoleError                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Calculator and schedule operations never fail. An unknown discount type
//! yields a zero discount; an unknown day or index is a no-op. Errors only
//! appear where raw input is parsed into domain types.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A discount type tag other than `percent` or `fixed`.
    ///
    /// Only produced by strict parsing (`str::parse`). The lenient
    /// `DiscountType::from_tag` returns `None` instead.
    #[error("Unknown discount type: '{0}'")]
    UnknownDiscountType(String),

    /// A JSON payload could not be read or written.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidPayload(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The `Display` text is what the discount form shows next to a field.
/// Callers that localize messages should key off the field, not this text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
