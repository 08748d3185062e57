//! # Console Error Types
//!
//! Error types for the app-facing layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Console Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Parse       │  │      Domain             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  TomlParse      │  │  Core (school-core)     │ │
//! │  │  ConfigLoad...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use school_core::CoreError;
use thiserror::Error;

/// Result type alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value failed validation.
    #[error("Invalid console configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Error bubbled up from school-core (payload parsing, validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}
