//! File handling: the line index and path validation.
//!
//! The index is the only component that touches the file. Everything above it works in terms
//! of zero-based line ordinals.

pub mod line_index;
pub mod validation;

pub use line_index::{LineIndex, SCAN_CHUNK_SIZE};
pub use validation::validate_file_path;
