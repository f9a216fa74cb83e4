//! Error types and handling infrastructure for rltail.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary wraps these in `anyhow` at the top level.
//!
//! ## Error policy
//!
//! - **Construction errors** (open, scan) are fatal to session startup
//! - **Out-of-bounds retrieval** is a contract violation of the caller, never a user error
//! - **Decode errors** are scoped to the single line that failed
//! - **Pattern errors** are reported without touching navigation state

use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// The main error type for rltail operations.
#[derive(Error, Debug)]
pub enum TailError {
    /// File system related errors (read failure, seek failure, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Permission denied accessing file
    #[error("Permission denied accessing file: {path}")]
    PermissionDenied { path: PathBuf },

    /// Line retrieval outside `[0, line_count)`
    #[error("Line {line} is out of bounds (line count is {line_count})")]
    LineOutOfBounds { line: u64, line_count: u64 },

    /// A line's bytes are not valid UTF-8
    #[error("Line {line} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        line: u64,
        #[source]
        source: Utf8Error,
    },

    /// Search pattern failed to compile
    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for rltail operations.
pub type Result<T> = std::result::Result<T, TailError>;

impl TailError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Map an io::Error raised while opening `path` to the most specific variant
    pub fn open_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::FileError {
                message: format!("Cannot open {}", path.display()),
                source,
            },
        }
    }

    /// Create an InvalidPattern error from a pattern and the engine's message
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Wrap a failed terminal call (raw mode, screen switch, draw, size, event read)
    pub fn terminal(action: &str, source: std::io::Error) -> Self {
        Self::UIError {
            message: format!("{}: {}", action, source),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True for the per-line decode failure that rendering turns into a marker
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::InvalidUtf8 { .. })
    }
}

// Automatic conversion from io::Error to TailError
impl From<std::io::Error> for TailError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
