//! Error types for the Compensation Recommendation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Errors are split by how far they are allowed to travel:
//!
//! - [`EngineError`] is returned to callers. Data and match errors are
//!   record-level and the batch runner turns them into skips.
//! - [`BackendError`] describes a failed call to the text-generation backend.
//! - [`DecodeError`] describes an unusable backend response. It never leaves
//!   the recommendation parser, which converts it into a fallback outcome.

use thiserror::Error;

/// The main error type for the Compensation Recommendation Engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::NoBandMatch {
///     employee_id: "E-001".to_string(),
/// };
/// assert_eq!(error.to_string(), "No salary band matches employee 'E-001'");
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

    /// Configuration parsed but holds values the engine cannot run with.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// The backend credential variable is not set.
    #[error("Required environment variable '{variable}' is not set")]
    MissingCredential {
        /// The name of the environment variable.
        variable: String,
    },

    /// An employee record is missing a required field or holds an invalid value.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The ID of the offending employee.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A band policy record is missing a required field or holds an invalid value.
    #[error("Invalid band policy field '{field}': {message}")]
    InvalidBand {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No band policy applies to the employee.
    #[error("No salary band matches employee '{employee_id}'")]
    NoBandMatch {
        /// The ID of the unmatched employee.
        employee_id: String,
    },

    /// The text-generation backend could not be reached or refused the call.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The run was cancelled before it finished.
    #[error("Operation cancelled")]
    Cancelled,
}

impl EngineError {
    /// Returns true for errors scoped to a single employee record.
    ///
    /// The batch runner skips the record and continues on these; anything
    /// else is a run-level failure.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidEmployee { .. }
                | EngineError::InvalidBand { .. }
                | EngineError::NoBandMatch { .. }
        )
    }

    pub(crate) fn invalid_employee(
        employee_id: &str,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        EngineError::InvalidEmployee {
            employee_id: employee_id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_band(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidBand {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A failed call to the text-generation backend.
///
/// Kept apart from [`DecodeError`]: a transport or authentication failure
/// says nothing about the employee, so it is never turned into a
/// recommendation by the parser.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the backend.
        message: String,
    },

    /// Retries were exhausted without a usable answer.
    #[error("Backend unavailable after {retries} retries")]
    RateLimited {
        /// Number of retries attempted.
        retries: u32,
    },

    /// The backend answered successfully but the reply carried no message
    /// content (no choices, or null content).
    #[error("Backend returned empty content")]
    EmptyContent,
}

/// A backend response that could not be turned into a valid recommendation.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not a JSON document of the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document decoded but breaks a recommendation invariant.
    #[error("invalid recommendation: {0}")]
    Invalid(String),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
