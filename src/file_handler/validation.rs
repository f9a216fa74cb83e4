//! File validation utilities for ensuring a path can back a viewing session.
//!
//! These checks run before the file is opened so that the common failures surface with a
//! specific error variant instead of a generic I/O message.

use crate::error::{Result, TailError};
use std::path::Path;

/// Validate that a file path points at something the line index can scan
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (directories, sockets, etc. are rejected)
///
/// Empty files are accepted; they produce a session with zero lines.
pub fn validate_file_path(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| TailError::open_failed(path, e))?;

    if !metadata.is_file() {
        return Err(TailError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
