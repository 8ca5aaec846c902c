//! Error types for the Statutory Entitlement Engine.
//!
//! The calculators never fail: missing or malformed inputs zero out the affected
//! claim category instead. These errors belong to the collaborators around the
//! engine, i.e. loading the statutory limit table and validating employee records.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Statutory Entitlement Engine.
///
/// # Example
///
/// ```
/// use entitlement_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheme.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheme.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Two statutory limit entries share the same effective date.
    #[error("Duplicate statutory limit entry effective {date}")]
    DuplicateLimitEntry {
        /// The effective date that appears more than once.
        date: NaiveDate,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
