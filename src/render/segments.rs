//! Line-to-segment rendering contract.
//!
//! A rendered row is an ordered list of tagged segments. The terminal layer only styles and
//! draws segments; deciding what goes into a row happens here, as a pure function of the
//! display flags and the fetched line.

use crate::error::{Result, TailError};

/// Shown in place of a line whose bytes are not valid UTF-8
pub const INVALID_UTF8_MARKER: &str = "<invalid UTF-8>";

/// Shown in place of a line that could not be read
pub const READ_ERROR_MARKER: &str = "<read error>";

/// Smallest width of the line-number gutter
pub const MIN_NUMBER_WIDTH: usize = 3;

/// Display toggles owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    /// Prefix each row with its 1-based line number
    pub line_numbers: bool,
    /// Soft-wrap rows wider than the terminal
    pub wrap: bool,
    /// Digits reserved for line numbers
    pub number_width: usize,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            line_numbers: true,
            wrap: false,
            number_width: MIN_NUMBER_WIDTH,
        }
    }
}

impl DisplayFlags {
    /// Size the gutter so the largest ordinal of a `line_count`-line file fits
    pub fn fit_numbers_to(&mut self, line_count: u64) {
        self.number_width = line_count.to_string().len().max(MIN_NUMBER_WIDTH);
    }
}

/// One styled piece of a rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSegment {
    /// Gutter text, including its trailing separator
    LineNumber(String),
    /// Decoded line content
    Text(String),
    /// Placeholder for content that could not be shown
    Marker(String),
}

impl LineSegment {
    pub fn as_str(&self) -> &str {
        match self {
            LineSegment::LineNumber(s) | LineSegment::Text(s) | LineSegment::Marker(s) => s,
        }
    }
}

/// Segments for a successfully decoded line
pub fn line_segments(flags: &DisplayFlags, ordinal: u64, text: &str) -> Vec<LineSegment> {
    let mut segments = gutter(flags, ordinal);
    segments.push(LineSegment::Text(text.to_string()));
    segments
}

/// Segments for a line that is replaced by `marker`
pub fn marker_segments(flags: &DisplayFlags, ordinal: u64, marker: &str) -> Vec<LineSegment> {
    let mut segments = gutter(flags, ordinal);
    segments.push(LineSegment::Marker(marker.to_string()));
    segments
}

/// Segments for the outcome of `LineIndex::get_line`
///
/// Decode failures and read failures each become a marker for that row only.
pub fn segments_for(flags: &DisplayFlags, ordinal: u64, fetched: &Result<String>) -> Vec<LineSegment> {
    match fetched {
        Ok(text) => line_segments(flags, ordinal, text),
        Err(TailError::InvalidUtf8 { .. }) => marker_segments(flags, ordinal, INVALID_UTF8_MARKER),
        Err(_) => marker_segments(flags, ordinal, READ_ERROR_MARKER),
    }
}

fn gutter(flags: &DisplayFlags, ordinal: u64) -> Vec<LineSegment> {
    if flags.line_numbers {
        vec![LineSegment::LineNumber(format!(
            "{:>width$} ",
            ordinal + 1,
            width = flags.number_width
        ))]
    } else {
        Vec::new()
    }
}
