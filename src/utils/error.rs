//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a trace document
#[derive(Error, Debug)]
pub enum LoadError {
    /// Input is not well-formed JSON
    #[error("malformed trace document: {0}")]
    Parse(#[source] serde_json::Error),

    /// Well-formed JSON that does not match the trace schema
    #[error("trace schema violation: {0}")]
    Schema(String),

    #[error("failed to read trace file: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True for errors caused by the document's shape rather than its syntax
    pub fn is_schema(&self) -> bool {
        matches!(self, LoadError::Schema(_))
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
