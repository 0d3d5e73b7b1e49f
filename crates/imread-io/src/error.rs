//! Error types for I/O operations.
//!
//! Provides unified error handling for all image codec operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Source path did not resolve to a file.
    #[error("not found: {0}")]
    NotFound(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No codec registered for the requested or inferred format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed or truncated encoded bytes.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Buffer shape or depth not representable in the target format.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Buffer-level failure (geometry, planar merge).
    #[error(transparent)]
    Core(#[from] imread_core::Error),
}

impl IoError {
    /// Creates a [`IoError::NotFound`] from a path.
    pub fn not_found(path: &std::path::Path) -> Self {
        Self::NotFound(path.display().to_string())
    }

    /// Creates a [`IoError::UnsupportedFormat`] from a format id or extension.
    pub fn unsupported(id: impl Into<String>) -> Self {
        Self::UnsupportedFormat(id.into())
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
