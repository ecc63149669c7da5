//! Error types for Stratum.
//!
//! This module defines the error hierarchy used throughout the
//! Stratum configuration resolver. All errors implement the standard
//! `std::error::Error` trait via `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! Stratum follows Rust's explicit error handling approach:
//! - Functions that can fail return `Result<T, StratumError>`
//! - Errors are values, not control flow
//! - Errors should be handled at appropriate boundaries
//!
//! # Example
//!
//! ```
//! use stratum_core::{Result, StratumError};
//!
//! fn parse_profile(name: &str) -> Result<String> {
//!     if name.trim().is_empty() {
//!         return Err(StratumError::invalid_profile(
//!             name,
//!             "profile name must not be empty",
//!         ));
//!     }
//!     Ok(name.trim().to_string())
//! }
//!
//! match parse_profile("dev") {
//!     Ok(profile) => println!("Got profile: {}", profile),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Main error type for Stratum core operations.
///
/// This enum covers the error conditions that can occur when parsing
/// and querying configuration data. Each variant carries context
/// information to help diagnose the issue.
///
/// # Example
///
/// ```
/// use stratum_core::StratumError;
///
/// let error = StratumError::parse_error("application.yml", "mapping expected");
/// assert!(error.is_parse_error());
/// println!("{}", error);
/// ```
#[derive(Debug, Error)]
pub enum StratumError {
    /// Error parsing configuration content.
    #[error("Failed to parse configuration from '{source_name}': {message}")]
    ParseError {
        /// Source of the configuration (filename, location, etc.)
        source_name: String,
        /// Description of the parse error
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Profile name is invalid.
    #[error("Invalid profile name '{name}': {reason}")]
    InvalidProfile {
        /// The invalid profile name
        name: String,
        /// Why it's invalid
        reason: String,
    },

    /// A property source referenced by name does not exist.
    #[error("No property source named '{0}'")]
    UnknownPropertySource(String),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StratumError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a ParseError without a cause.
    pub fn parse_error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a ParseError with a cause.
    pub fn parse_error_with_cause<E>(
        source: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an InvalidProfile error.
    pub fn invalid_profile(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an UnknownPropertySource error.
    pub fn unknown_property_source(name: impl Into<String>) -> Self {
        Self::UnknownPropertySource(name.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this is a parse error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns true if this is an invalid profile error.
    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, Self::InvalidProfile { .. })
    }
}

/// Type alias for Results with StratumError.
///
/// Use this type for all Stratum core operations that can fail.
pub type Result<T> = std::result::Result<T, StratumError>;
