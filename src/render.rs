//! Rendering subsystem: the segment contract and the terminal front end.

pub mod segments;
pub mod ui;

pub use segments::{line_segments, segments_for, DisplayFlags, LineSegment};
