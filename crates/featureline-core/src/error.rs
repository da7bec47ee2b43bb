//! Core error types for featureline-core.
//!
//! The taxonomy is deliberately narrow: the engine itself is pure
//! computation and cannot fail once its inputs are valid. Errors only arise
//! at the boundary, when deserializing feature records or validating caller
//! configuration.

use thiserror::Error;

/// Core error type for featureline-core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A release date string could not be parsed as ISO-8601.
    #[error("Invalid release date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    /// A configuration value is degenerate (non-positive or non-finite).
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
