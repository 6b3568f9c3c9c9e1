//! Error types for the ERN generation pipeline.
//!
//! - [`InputError`] - Loading release bundles
//! - [`ErnError`] - Document compilation and serialization
//! - [`PipelineError`] - Top-level orchestration errors
//! - [`ServerError`] - HTTP layer errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while loading a release bundle.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON payload.
    #[error("Invalid release bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty payload.
    #[error("Release bundle is empty")]
    EmptyInput,
}

// =============================================================================
// Compilation Errors
// =============================================================================

/// Errors while compiling or serializing an ERN document.
///
/// Absent optional fields never produce an error; they are omitted or
/// replaced by their fallback. Only a present-but-unusable required value
/// ends up here.
#[derive(Debug, Error)]
pub enum ErnError {
    /// A required value exists but cannot be interpreted.
    #[error("Malformed value for '{field}' ('{value}'): {reason}")]
    MalformedInput {
        field: String,
        value: String,
        reason: String,
    },

    /// XML writer failure.
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Output buffer failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not UTF-8.
    #[error("Generated document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ErnError {
    pub fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller sent data the compiler cannot use.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::generate_from_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input loading error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Compilation error.
    #[error("ERN error: {0}")]
    Ern(#[from] ErnError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input loading.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for document compilation.
pub type ErnResult<T> = Result<T, ErnError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
