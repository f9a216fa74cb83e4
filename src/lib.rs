//! # rltail - Terminal Line Viewer
//!
//! A line-oriented terminal viewer for text files. A file is scanned once to build a table of
//! line start offsets; any line can then be fetched by ordinal with a single seek and read, so
//! memory use grows with the number of lines rather than the size of the file.
//!
//! ## Features
//!
//! - **Random Line Access**: Byte-offset line index over any `Read + Seek` source
//! - **Regex Search**: Forward search from the cursor using ripgrep's regex matcher
//! - **Lock Mode**: Cursor and viewport can move together or independently
//! - **Terminal UI**: less-like key bindings, line numbers, wrapping and color themes
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`file_handler`] - Line index construction and line retrieval
//! - [`search`] - Forward regex search over the index
//! - [`viewport`] - Cursor, scroll position and navigation mode
//! - [`render`] - Row segments and the terminal user interface
//! - [`input`] - Key bindings and prompt editing
//! - [`config`] - User configuration
//! - [`app`] - Application core and component coordination

// Core modules
pub mod error;
pub mod file_handler;
pub mod search;
pub mod viewport;

// Presentation
pub mod input;
pub mod render;

pub mod app;
pub mod config;

// Re-export commonly used types for convenience
pub use error::{Result, TailError};

// Public API surface for external usage
pub use app::Application;
pub use config::Config;
pub use file_handler::LineIndex;
pub use search::{LineSearcher, SearchOptions};
pub use viewport::{NavigationEvent, NavigationMode, PageMode, ViewportController};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
