//! Error types for the Pluck core library
//!
//! This module defines the error handling system for Pluck, using thiserror
//! for the error enum and anyhow for errors raised by caller-supplied
//! transform functions.

use crate::types::ValueKind;
use thiserror::Error;

/// Main error type for Pluck operations
#[derive(Error, Debug)]
pub enum Error {
    /// The projector configuration is structurally invalid
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The value handed to a projection is not a record
    #[error("Type mismatch: expected '{expected}', got '{found}'{}", describe_path(.path))]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
        path: Option<String>,
    },

    /// A rule's read or write path is malformed
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// Error raised by a caller-supplied transform function, passed through untouched
    #[error(transparent)]
    Transform(anyhow::Error),

    /// JSON parsing errors for textual configuration
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

fn describe_path(path: &Option<String>) -> String {
    match path {
        Some(path) => format!(" at '{}'", path),
        None => String::new(),
    }
}

impl Error {
    /// Shorthand for a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Build the error reported when a projection receives something other than a record
    pub fn not_a_record(found: ValueKind, path: Option<&str>) -> Self {
        Error::TypeMismatch {
            expected: ValueKind::Object,
            found,
            path: path.map(str::to_string),
        }
    }

    /// Attach the rule field to a type mismatch raised by a nested projection
    pub(crate) fn at_path(self, field: &str) -> Self {
        match self {
            Error::TypeMismatch {
                expected,
                found,
                path: None,
            } => Error::TypeMismatch {
                expected,
                found,
                path: Some(field.to_string()),
            },
            other => other,
        }
    }

    /// Returns true when this error came from a caller-supplied transform
    pub fn is_transform(&self) -> bool {
        matches!(self, Error::Transform(_))
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
